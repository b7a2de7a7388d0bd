//! Viewport: the visible window over the text and the scroll rule.

/// Top-left visible cell and the size of the text area.
///
/// Offsets are in rows and render columns. The text area excludes the two
/// bar lines at the bottom of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First visible row.
    pub rowoff: usize,
    /// First visible render column.
    pub coloff: usize,
    /// Number of text rows on screen.
    pub screenrows: usize,
    /// Number of columns on screen.
    pub screencols: usize,
}

impl Viewport {
    /// Create a viewport at the origin.
    pub const fn new(screenrows: usize, screencols: usize) -> Self {
        Self {
            rowoff: 0,
            coloff: 0,
            screenrows,
            screencols,
        }
    }

    /// Move the offsets the minimum amount needed to show `(cy, rx)`.
    pub fn scroll(&mut self, cy: usize, rx: usize) {
        self.rowoff = clamp_offset(self.rowoff, cy, self.screenrows);
        self.coloff = clamp_offset(self.coloff, rx, self.screencols);
    }

    /// Whether `(cy, rx)` is inside the visible band.
    pub const fn contains(&self, cy: usize, rx: usize) -> bool {
        cy >= self.rowoff
            && cy < self.rowoff + self.screenrows
            && rx >= self.coloff
            && rx < self.coloff + self.screencols
    }

    /// Last row index that is on screen, or `rowoff` when the area is empty.
    pub const fn bottom(&self) -> usize {
        (self.rowoff + self.screenrows).saturating_sub(1)
    }
}

/// One axis of the scroll rule.
const fn clamp_offset(offset: usize, pos: usize, extent: usize) -> usize {
    if pos < offset {
        pos
    } else if pos >= offset + extent {
        (pos + 1).saturating_sub(extent)
    } else {
        offset
    }
}
