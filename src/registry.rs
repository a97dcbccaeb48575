//! Static catalog of launchable apps.
//!
//! The registry is built once at start-up and never changes afterwards.
//! Launchers enumerate it with [`AppRegistry::list_apps`] and hand the chosen
//! [`AppDescriptor`] straight to the window manager.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::renderable::{LoadError, Renderable};

/// Stable key of an app and of the window opened for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppId(Arc<str>);

impl AppId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AppId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AppId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AppId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for AppId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for AppId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Immutable metadata for one launchable app.
#[derive(Debug, Clone)]
pub struct AppDescriptor {
    id: AppId,
    name: String,
    icon: String,
    default_width: Option<u32>,
    default_height: Option<u32>,
    renderable: Renderable,
}

impl AppDescriptor {
    /// Describe an app with no default size and no content. Attach content
    /// with [`AppDescriptor::with_renderable`]; until then loading resolves to
    /// [`LoadError::Missing`].
    pub fn new(id: impl Into<AppId>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        let id = id.into();
        let missing = id.to_string();
        Self {
            renderable: Renderable::lazy(missing.clone(), move || {
                futures_util::future::ready(Err(LoadError::Missing(missing.clone())))
            }),
            id,
            name: name.into(),
            icon: icon.into(),
            default_width: None,
            default_height: None,
        }
    }

    pub fn with_default_size(mut self, width: u32, height: u32) -> Self {
        self.default_width = Some(width);
        self.default_height = Some(height);
        self
    }

    pub fn with_default_width(mut self, width: u32) -> Self {
        self.default_width = Some(width);
        self
    }

    pub fn with_default_height(mut self, height: u32) -> Self {
        self.default_height = Some(height);
        self
    }

    pub fn with_renderable(mut self, renderable: Renderable) -> Self {
        self.renderable = renderable;
        self
    }

    pub fn id(&self) -> &AppId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn default_width(&self) -> Option<u32> {
        self.default_width
    }

    pub fn default_height(&self) -> Option<u32> {
        self.default_height
    }

    pub fn renderable(&self) -> &Renderable {
        &self.renderable
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("app id must not be empty")]
    EmptyId,
    #[error("app `{0}` is registered more than once")]
    DuplicateId(AppId),
    #[error("app `{0}` declares a zero default dimension")]
    ZeroDimension(AppId),
}

/// Ordered, read-only catalog keyed by [`AppId`].
#[derive(Debug, Clone, Default)]
pub struct AppRegistry {
    apps: Vec<AppDescriptor>,
}

impl AppRegistry {
    /// Build a registry, keeping the given order. Malformed entries are
    /// rejected here so nothing downstream has to handle them.
    pub fn new(apps: Vec<AppDescriptor>) -> Result<Self, RegistryError> {
        let mut seen = BTreeSet::new();
        for app in &apps {
            if app.id.as_str().is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if app.default_width == Some(0) || app.default_height == Some(0) {
                return Err(RegistryError::ZeroDimension(app.id.clone()));
            }
            if !seen.insert(app.id.clone()) {
                return Err(RegistryError::DuplicateId(app.id.clone()));
            }
        }
        Ok(Self { apps })
    }

    /// All descriptors in registration order.
    pub fn list_apps(&self) -> &[AppDescriptor] {
        &self.apps
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter()
    }

    pub fn get(&self, id: &str) -> Option<&AppDescriptor> {
        self.apps.iter().find(|app| app.id == id)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}
