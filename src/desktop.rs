//! The desktop shell: app catalog, window set and page visibility together.

use crate::config::WmConfig;
use crate::error::{DesktopError, Result};
use crate::host::HostMessage;
use crate::registry::{AppDescriptor, AppId, AppRegistry};
use crate::state::AppState;
use crate::window::{OpenOutcome, WindowManager};

/// One button on the taskbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub id: AppId,
    pub title: String,
    pub icon: String,
    pub minimized: bool,
    /// Set for the frontmost window that is not minimized.
    pub active: bool,
}

#[derive(Debug)]
pub struct Desktop {
    registry: AppRegistry,
    windows: WindowManager,
    state: AppState,
}

impl Desktop {
    pub fn new(registry: AppRegistry, config: WmConfig) -> Self {
        Self {
            registry,
            windows: WindowManager::with_config(config),
            state: AppState::new(),
        }
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    pub fn list_apps(&self) -> &[AppDescriptor] {
        self.registry.list_apps()
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowManager {
        &mut self.windows
    }

    pub fn visible(&self) -> bool {
        self.state.visible()
    }

    pub fn take_visibility_change(&mut self) -> Option<bool> {
        self.state.take_visibility_change()
    }

    /// Open (or focus) the window of a registered app.
    pub fn launch(&mut self, id: &str) -> Result<OpenOutcome> {
        let app = self
            .registry
            .get(id)
            .ok_or_else(|| DesktopError::UnknownApp(id.to_string()))?;
        Ok(self.windows.open_app(app))
    }

    /// Apply a host message. Only visibility is affected; open windows
    /// survive being hidden. Returns whether the message was understood.
    pub fn handle_host_message(&mut self, message: &HostMessage) -> bool {
        match message {
            HostMessage::ShowDesktop => self.state.set_visible(true),
            HostMessage::HideDesktop => self.state.set_visible(false),
            HostMessage::Other(action) => {
                tracing::debug!(action = %action, "ignoring host message");
                return false;
            }
        }
        tracing::debug!(visible = self.state.visible(), "desktop visibility");
        true
    }

    pub fn taskbar(&self) -> Vec<TaskbarEntry> {
        let active = self.windows.frontmost().map(|w| w.id().clone());
        self.windows
            .windows()
            .iter()
            .map(|w| TaskbarEntry {
                id: w.id().clone(),
                title: w.title().to_string(),
                icon: w.icon().to_string(),
                minimized: w.minimized(),
                active: active.as_ref() == Some(w.id()),
            })
            .collect()
    }

    /// Taskbar click: minimize the active window, otherwise bring it forward.
    pub fn toggle_taskbar(&mut self, id: &str) -> bool {
        let is_active = self.windows.frontmost().is_some_and(|w| w.id() == id);
        if is_active {
            self.windows.minimize_window(id)
        } else {
            self.windows.focus_window(id)
        }
    }
}
