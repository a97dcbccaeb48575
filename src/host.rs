//! Messages posted by the embedding host.
//!
//! The host talks to the page with JSON objects carrying an `action` field.
//! Only the show/hide pair is meaningful to the desktop; anything else is
//! decoded but ignored.

use serde::Deserialize;

use crate::error::Result;

pub const ACTION_OPEN: &str = "desktop:open";
pub const ACTION_CLOSE: &str = "desktop:close";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    ShowDesktop,
    HideDesktop,
    Other(String),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    action: String,
}

impl HostMessage {
    pub fn from_action(action: &str) -> Self {
        match action {
            ACTION_OPEN => HostMessage::ShowDesktop,
            ACTION_CLOSE => HostMessage::HideDesktop,
            other => HostMessage::Other(other.to_string()),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(raw)?;
        Ok(Self::from_action(&envelope.action))
    }

    pub fn action(&self) -> &str {
        match self {
            HostMessage::ShowDesktop => ACTION_OPEN,
            HostMessage::HideDesktop => ACTION_CLOSE,
            HostMessage::Other(action) => action,
        }
    }
}
