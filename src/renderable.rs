//! Lazily loaded view content for an app.
//!
//! A [`Renderable`] wraps an asynchronous factory. Nothing runs when the
//! handle is built; the first call to [`Renderable::load`] invokes the
//! factory and every later call, from this handle or any clone of it, gets
//! the same shared future back.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use thiserror::Error;

/// Loaded content of an app, ready for a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    component: Arc<str>,
}

impl View {
    pub fn new(component: impl Into<Arc<str>>) -> Self {
        Self {
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("component `{0}` is not available")]
    Missing(String),
    #[error("failed to load `{component}`: {reason}")]
    Failed { component: String, reason: String },
}

pub type ViewFuture = BoxFuture<'static, Result<View, LoadError>>;

/// Handle to an in-flight or finished load. Cloning is cheap and every clone
/// resolves to the same outcome.
pub type SharedLoad = Shared<ViewFuture>;

type Factory = Box<dyn Fn() -> ViewFuture + Send + Sync>;

struct Inner {
    component: Arc<str>,
    factory: Factory,
    load: OnceLock<SharedLoad>,
}

#[derive(Clone)]
pub struct Renderable {
    inner: Arc<Inner>,
}

impl Renderable {
    pub fn lazy<F, Fut>(component: impl Into<Arc<str>>, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<View, LoadError>> + Send + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                component: component.into(),
                factory: Box::new(move || factory().boxed()),
                load: OnceLock::new(),
            }),
        }
    }

    /// A handle whose content is available without any loading work.
    pub fn ready(view: View) -> Self {
        let component = view.component.clone();
        Self::lazy(component, move || futures_util::future::ready(Ok(view.clone())))
    }

    pub fn component(&self) -> &str {
        &self.inner.component
    }

    pub fn load(&self) -> SharedLoad {
        self.inner
            .load
            .get_or_init(|| {
                tracing::debug!(component = %self.inner.component, "loading renderable");
                (self.inner.factory)().shared()
            })
            .clone()
    }

    pub fn is_started(&self) -> bool {
        self.inner.load.get().is_some()
    }

    /// Outcome of the load if it has already resolved.
    pub fn peek(&self) -> Option<Result<View, LoadError>> {
        self.inner
            .load
            .get()
            .and_then(|load| load.peek().cloned())
    }

    /// Whether both handles share one factory and cache.
    pub fn ptr_eq(&self, other: &Renderable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderable")
            .field("component", &self.inner.component)
            .field("started", &self.is_started())
            .finish()
    }
}
