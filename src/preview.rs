//! Terminal preview of the desktop.
//!
//! Window geometry is kept in surface pixels; the preview scales it down to
//! terminal cells, paints windows back to front and puts the taskbar on the
//! last row. Everything is clipped to the target area, so windows dragged
//! partly off screen render without touching cells outside the buffer.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Clear, Widget};

use crate::config::PreviewConfig;
use crate::desktop::{Desktop, TaskbarEntry};
use crate::surface::{ContentState, SurfaceLoads};
use crate::window::{WindowRecord, WindowRect};

#[derive(Debug, Clone, Copy, Default)]
pub struct Preview {
    config: PreviewConfig,
}

impl Preview {
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, desktop: &Desktop, loads: Option<&SurfaceLoads>, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        if !desktop.visible() || area.width == 0 || area.height == 0 {
            return buf;
        }
        let work = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        let bar = Rect {
            y: area.y.saturating_add(work.height),
            height: 1,
            ..area
        };

        let windows = desktop.windows();
        let active = windows.frontmost().map(|w| w.id().clone());
        for window in windows.visible_draw_order() {
            let rect = self.cell_rect(window.rect(), work).clip_to(work);
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            let focused = active.as_ref() == Some(window.id());
            render_window(&mut buf, rect, window, focused, loads);
        }
        render_taskbar(&mut buf, bar, &desktop.taskbar());
        buf
    }

    /// Window rectangle in cell units, relative to `origin`. May extend past it.
    fn cell_rect(&self, rect: WindowRect, origin: Rect) -> CellRect {
        let cw = i64::from(self.config.cell_width_px().max(1));
        let ch = i64::from(self.config.cell_height_px().max(1));
        CellRect {
            x: i64::from(origin.x) + i64::from(rect.x).div_euclid(cw),
            y: i64::from(origin.y) + i64::from(rect.y).div_euclid(ch),
            width: (i64::from(rect.width) + cw - 1) / cw,
            height: (i64::from(rect.height) + ch - 1) / ch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRect {
    x: i64,
    y: i64,
    width: i64,
    height: i64,
}

impl CellRect {
    /// Part of the rectangle inside `bounds`; empty when they do not overlap.
    fn clip_to(self, bounds: Rect) -> Rect {
        let (x, width) = clip_span(self.x, self.width, bounds.x, bounds.width);
        let (y, height) = clip_span(self.y, self.height, bounds.y, bounds.height);
        if width == 0 || height == 0 {
            return Rect::default();
        }
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Intersect the span `start..start + len` with `lo..lo + extent`.
fn clip_span(start: i64, len: i64, lo: u16, extent: u16) -> (u16, u16) {
    let lo_i = i64::from(lo);
    let hi_i = lo_i + i64::from(extent);
    let from = start.clamp(lo_i, hi_i);
    let to = start.saturating_add(len).clamp(lo_i, hi_i);
    // both ends were clamped into the u16 range of the bounds
    let from = u16::try_from(from).unwrap_or(lo);
    let to = u16::try_from(to).unwrap_or(from);
    (from, to.saturating_sub(from))
}

fn render_window(
    buf: &mut Buffer,
    rect: Rect,
    window: &WindowRecord,
    focused: bool,
    loads: Option<&SurfaceLoads>,
) {
    let border_style = if focused {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::bordered()
        .title(window.title().to_string())
        .border_style(border_style);
    let inner = block.inner(rect);
    Clear.render(rect, buf);
    block.render(rect, buf);

    let body = match loads.and_then(|l| l.state(window.id().as_str())) {
        Some(ContentState::Ready(view)) => view.component().to_string(),
        Some(ContentState::Placeholder(_)) => "(content unavailable)".to_string(),
        Some(ContentState::Loading) | None => "loading...".to_string(),
    };
    put_label(buf, inner, inner.x, inner.y, &body, Style::default());
}

fn render_taskbar(buf: &mut Buffer, bar: Rect, entries: &[TaskbarEntry]) {
    let bar_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    buf.set_style(bar, bar_style);
    let mut x = bar.x;
    for entry in entries {
        let (label, style) = if entry.active {
            (
                format!("[{}]", entry.title),
                bar_style.add_modifier(Modifier::BOLD),
            )
        } else if entry.minimized {
            (format!("({})", entry.title), bar_style.add_modifier(Modifier::DIM))
        } else {
            (format!(" {} ", entry.title), bar_style)
        };
        let end = put_label(buf, bar, x, bar.y, &label, style);
        if end == x {
            break;
        }
        x = end.saturating_add(1);
    }
}

/// Write `text` at (x, y), cut at the right edge of `bounds`. Returns the
/// column after the last cell written, or `x` if nothing fit.
fn put_label(buffer: &mut Buffer, bounds: Rect, x: u16, y: u16, text: &str, style: Style) -> u16 {
    if !bounds.contains(Position { x, y }) {
        return x;
    }
    let room = bounds.right().saturating_sub(x);
    let (end_x, _) = buffer.set_stringn(x, y, text, usize::from(room), style);
    end_x
}

/// Plain text rows of a rendered buffer, trailing spaces trimmed.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.y..area.y.saturating_add(area.height))
        .map(|y| {
            let row: String = (area.x..area.x.saturating_add(area.width))
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}
