//! Shared crate-wide constants.

/// Width given to a new window when its app declares no default width.
///
/// Units: surface pixels.
pub const DEFAULT_WINDOW_WIDTH: u32 = 1024;

/// Height given to a new window when its app declares no default height.
///
/// Units: surface pixels.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 768;

/// Position every new window opens at. There is no cascading offset, so two
/// windows opened back to back overlap exactly until one is dragged.
pub const DEFAULT_WINDOW_ORIGIN: (i32, i32) = (50, 50);

/// Value the z-order counter holds before the first allocation. Allocation
/// pre-increments, so the first window ever opened receives `Z_COUNTER_START + 1`.
pub const Z_COUNTER_START: u64 = 1;

/// Surface pixels covered by one terminal column in the preview renderer.
pub const PREVIEW_CELL_WIDTH_PX: u32 = 8;

/// Surface pixels covered by one terminal row in the preview renderer.
pub const PREVIEW_CELL_HEIGHT_PX: u32 = 16;
