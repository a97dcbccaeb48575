mod window_manager;

use crate::config::WmConfig;
use crate::constants::Z_COUNTER_START;
use crate::registry::{AppDescriptor, AppId};
use crate::renderable::Renderable;

pub use window_manager::{OpenOutcome, WindowManager};

/// Signed origin with unsigned size, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowRect {
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
}

/// Run-time state of one open window.
///
/// Records are only handed out by reference; every change goes through the
/// [`WindowManager`] so that subscribers hear about it.
#[derive(Debug, Clone)]
pub struct WindowRecord {
    id: AppId,
    title: String,
    icon: String,
    renderable: Renderable,
    z_index: u64,
    minimized: bool,
    rect: WindowRect,
}

impl WindowRecord {
    fn from_descriptor(app: &AppDescriptor, config: &WmConfig, z_index: u64) -> Self {
        Self {
            id: app.id().clone(),
            title: app.name().to_string(),
            icon: app.icon().to_string(),
            renderable: app.renderable().clone(),
            z_index,
            minimized: false,
            rect: WindowRect {
                x: config.origin_x,
                y: config.origin_y,
                width: app.default_width().unwrap_or(config.default_width),
                height: app.default_height().unwrap_or(config.default_height),
            },
        }
    }

    pub fn id(&self) -> &AppId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn renderable(&self) -> &Renderable {
        &self.renderable
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn minimized(&self) -> bool {
        self.minimized
    }

    pub fn rect(&self) -> WindowRect {
        self.rect
    }

    pub fn x(&self) -> i32 {
        self.rect.x
    }

    pub fn y(&self) -> i32 {
        self.rect.y
    }

    pub fn width(&self) -> u32 {
        self.rect.width
    }

    pub fn height(&self) -> u32 {
        self.rect.height
    }

    fn apply(&mut self, patch: WindowPatch) {
        let WindowPatch {
            x,
            y,
            width,
            height,
            minimized,
            title,
            icon,
        } = patch;
        if let Some(x) = x {
            self.rect.x = x;
        }
        if let Some(y) = y {
            self.rect.y = y;
        }
        if let Some(width) = width {
            self.rect.width = width;
        }
        if let Some(height) = height {
            self.rect.height = height;
        }
        if let Some(minimized) = minimized {
            self.minimized = minimized;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(icon) = icon {
            self.icon = icon;
        }
    }
}

/// Subset of window fields to overwrite. Unset fields keep their value.
///
/// The id and z-index are not patchable: the id keys the window set and the
/// z-index is only ever handed out by the stacking counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowPatch {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub minimized: Option<bool>,
    pub title: Option<String>,
    pub icon: Option<String>,
}

impl WindowPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn x(mut self, x: i32) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: i32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn minimized(mut self, minimized: bool) -> Self {
        self.minimized = Some(minimized);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Process-wide stacking counter. Values only ever grow and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZOrder {
    last: u64,
}

impl ZOrder {
    pub const fn new() -> Self {
        Self {
            last: Z_COUNTER_START,
        }
    }

    /// Pre-increments and returns the new value, so the first allocation
    /// yields `Z_COUNTER_START + 1`.
    ///
    /// The counter stops at `u64::MAX`: once there, every further
    /// allocation returns `u64::MAX` and new windows tie with the last one
    /// raised instead of stacking above it.
    pub fn allocate(&mut self) -> u64 {
        self.last = self.last.saturating_add(1);
        self.last
    }

    pub fn last(&self) -> u64 {
        self.last
    }
}

impl Default for ZOrder {
    fn default() -> Self {
        Self::new()
    }
}
