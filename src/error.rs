use std::io;

use thiserror::Error;

use crate::registry::RegistryError;

/// Errors raised by the layers around the window manager. The window manager
/// itself never fails: operations on a missing window are no-ops.
#[derive(Debug, Error)]
pub enum DesktopError {
    #[error("unknown app `{0}`")]
    UnknownApp(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("malformed host message: {0}")]
    HostMessage(#[from] serde_json::Error),
    #[error("line {line}: {message}")]
    Command { line: usize, message: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DesktopError>;
