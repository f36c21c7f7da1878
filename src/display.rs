//! Per-station screen cache.
//!
//! The panel has one display shared by every station.  Each station keeps
//! the text of its two status rows here so that switching stations can
//! rebuild the screen exactly as the station last left it.
//!
//! ```text
//!  row 0  station N        (header, drawn on refresh)
//!  row 1  liters: T        (target, follows the dial while idle)
//!  row 2  mix <- 12        (phase status, cached)
//!  row 3                   (auxiliary, cached)
//! ```
//!
//! Writes always land in the cache.  They reach the display only when the
//! owning station is the active one; the service decides that by either
//! calling [`StatusCache::flush`] or [`StatusCache::discard_pending`].

use core::fmt::{self, Write};

use heapless::String;

use crate::app::ports::DisplayPort;

/// Widest line the cache will hold (the 20-column module).
pub const LINE_CAPACITY: usize = 20;

pub const HEADER_ROW: u8 = 0;
pub const TARGET_ROW: u8 = 1;
pub const STATUS_ROW: u8 = 2;
pub const DETAIL_ROW: u8 = 3;

pub type Line = String<LINE_CAPACITY>;

/// `fmt::Write` adaptor that silently drops characters past capacity.
struct Truncating<'a>(&'a mut Line);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format into a fixed-capacity line, truncating overlong output.
pub fn format_line(args: fmt::Arguments<'_>) -> Line {
    let mut line = Line::new();
    // Truncating never reports an error.
    let _ = Truncating(&mut line).write_fmt(args);
    line
}

#[derive(Debug, Default)]
pub struct StatusCache {
    /// Cached text for rows 2 and 3.
    rows: [Line; 2],
    /// Rows written since the last flush.
    pending: [bool; 2],
    needs_refresh: bool,
    shown_target: Option<u16>,
    target_pending: bool,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text of a cached row (2 or 3).  Other rows are ignored.
    pub fn set_row(&mut self, row: u8, args: fmt::Arguments<'_>) {
        let Some(slot) = Self::slot(row) else {
            return;
        };
        self.rows[slot] = format_line(args);
        self.pending[slot] = true;
    }

    /// Shorthand for the phase status row.
    pub fn set_status(&mut self, args: fmt::Arguments<'_>) {
        self.set_row(STATUS_ROW, args);
    }

    pub fn row(&self, row: u8) -> &str {
        Self::slot(row).map_or("", |slot| self.rows[slot].as_str())
    }

    pub fn status(&self) -> &str {
        self.row(STATUS_ROW)
    }

    /// Force a full redraw on the next refresh check.
    pub fn mark_dirty(&mut self) {
        self.needs_refresh = true;
    }

    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Ask for the target row to show `target` if it does not already.
    pub fn request_target(&mut self, target: u16) {
        if self.shown_target != Some(target) {
            self.target_pending = true;
        }
    }

    /// Redraw the whole screen for station `index` (zero-based).
    pub fn render(&mut self, index: usize, target: u16, display: &mut impl DisplayPort) {
        display.clear();
        display.write_line(0, HEADER_ROW, &format_line(format_args!("station {}", index + 1)));
        display.write_line(0, TARGET_ROW, &format_line(format_args!("liters: {target}")));
        for (slot, row) in [STATUS_ROW, DETAIL_ROW].into_iter().enumerate() {
            if !self.rows[slot].is_empty() {
                display.write_line(0, row, &self.rows[slot]);
            }
        }
        self.pending = [false; 2];
        self.needs_refresh = false;
        self.target_pending = false;
        self.shown_target = Some(target);
    }

    /// Push rows written since the last flush to the display.
    pub fn flush(&mut self, target: u16, display: &mut impl DisplayPort) {
        if self.target_pending {
            display.write_line(0, TARGET_ROW, &format_line(format_args!("liters: {target}")));
            self.shown_target = Some(target);
            self.target_pending = false;
        }
        for (slot, row) in [STATUS_ROW, DETAIL_ROW].into_iter().enumerate() {
            if self.pending[slot] {
                display.write_line(0, row, &self.rows[slot]);
                self.pending[slot] = false;
            }
        }
    }

    /// Forget pending writes; the cache keeps the text for the next refresh.
    pub fn discard_pending(&mut self) {
        self.pending = [false; 2];
        self.target_pending = false;
    }

    fn slot(row: u8) -> Option<usize> {
        match row {
            STATUS_ROW => Some(0),
            DETAIL_ROW => Some(1),
            _ => None,
        }
    }
}
