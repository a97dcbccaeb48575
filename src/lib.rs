//! Window manager core of an in-game desktop.
//!
//! The [`registry`] holds the launchable apps, the [`window`] module owns the
//! open windows and their stacking, and [`desktop`] ties both to the page
//! visibility the host controls. Rendering surfaces observe the window set
//! through [`events`] and load app content through [`surface`].

pub mod apps;
pub mod command;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod error;
pub mod events;
pub mod host;
pub mod preview;
pub mod registry;
pub mod renderable;
pub mod runner;
pub mod state;
pub mod surface;
pub mod tracing_sub;
pub mod window;

pub use desktop::{Desktop, TaskbarEntry};
pub use error::{DesktopError, Result};
pub use registry::{AppDescriptor, AppId, AppRegistry};
pub use window::{OpenOutcome, WindowManager, WindowPatch, WindowRecord};
