//! Configuration for the window manager and the terminal preview.

use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_ORIGIN, DEFAULT_WINDOW_WIDTH, PREVIEW_CELL_HEIGHT_PX,
    PREVIEW_CELL_WIDTH_PX,
};

/// Geometry defaults applied when a window is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmConfig {
    pub default_width: u32,
    pub default_height: u32,
    pub origin_x: i32,
    pub origin_y: i32,
}

impl WmConfig {
    pub const fn new() -> Self {
        Self {
            default_width: DEFAULT_WINDOW_WIDTH,
            default_height: DEFAULT_WINDOW_HEIGHT,
            origin_x: DEFAULT_WINDOW_ORIGIN.0,
            origin_y: DEFAULT_WINDOW_ORIGIN.1,
        }
    }

    /// Returns a copy with a different fallback size. Zero dimensions are
    /// ignored so a window can never be created without an area.
    pub fn with_default_size(mut self, width: u32, height: u32) -> Self {
        if width > 0 {
            self.default_width = width;
        }
        if height > 0 {
            self.default_height = height;
        }
        self
    }

    pub const fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }
}

impl Default for WmConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How surface pixels map onto terminal cells in the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewConfig {
    cell_width_px: u32,
    cell_height_px: u32,
}

impl PreviewConfig {
    /// Zero sizes are raised to one pixel per cell.
    pub fn with_cell_size(width_px: u32, height_px: u32) -> Self {
        Self {
            cell_width_px: width_px.max(1),
            cell_height_px: height_px.max(1),
        }
    }

    pub fn cell_width_px(&self) -> u32 {
        self.cell_width_px
    }

    pub fn cell_height_px(&self) -> u32 {
        self.cell_height_px
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self::with_cell_size(PREVIEW_CELL_WIDTH_PX, PREVIEW_CELL_HEIGHT_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let cfg = WmConfig::default();
        assert_eq!(cfg.default_width, 1024);
        assert_eq!(cfg.default_height, 768);
        assert_eq!((cfg.origin_x, cfg.origin_y), (50, 50));
    }

    #[test]
    fn zero_default_size_is_ignored() {
        let cfg = WmConfig::default().with_default_size(0, 600);
        assert_eq!(cfg.default_width, 1024);
        assert_eq!(cfg.default_height, 600);
    }

    #[test]
    fn preview_cell_size_is_at_least_one() {
        let cfg = PreviewConfig::with_cell_size(0, 0);
        assert_eq!(cfg.cell_width_px(), 1);
        assert_eq!(cfg.cell_height_px(), 1);
    }

    #[test]
    fn preview_with_zero_cell_width_still_renders() {
        use crate::desktop::Desktop;
        use crate::host::HostMessage;
        use crate::preview::{Preview, buffer_lines};
        use crate::registry::{AppDescriptor, AppRegistry};
        use ratatui::layout::Rect;

        let registry = AppRegistry::new(vec![
            AppDescriptor::new("calc", "Calculator", "/c.png").with_default_size(300, 550),
        ])
        .unwrap();
        let mut desktop = Desktop::new(registry, WmConfig::default());
        desktop.handle_host_message(&HostMessage::ShowDesktop);
        desktop.launch("calc").unwrap();

        let config = PreviewConfig {
            cell_width_px: 0,
            cell_height_px: 16,
        };
        let area = Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 12,
        };
        let buf = Preview::new(config).render(&desktop, None, area);
        let lines = buffer_lines(&buf);
        assert!(lines.last().unwrap().contains("[Calculator]"));
    }
}
