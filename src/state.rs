/// Desktop-wide UI state that lives outside the window set.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppState {
    visible: bool,
    visibility_dirty: bool,
}

impl AppState {
    /// The desktop starts hidden until the host asks to show it.
    pub fn new() -> Self {
        Self {
            visible: false,
            visibility_dirty: false,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        self.visibility_dirty = true;
    }

    pub fn toggle_visible(&mut self) {
        let visible = !self.visible;
        self.set_visible(visible);
    }

    pub fn take_visibility_change(&mut self) -> Option<bool> {
        if self.visibility_dirty {
            self.visibility_dirty = false;
            Some(self.visible)
        } else {
            None
        }
    }
}
