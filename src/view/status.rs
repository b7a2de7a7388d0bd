//! Status Bar: the inverted file/position line and the message line.
//!
//! Both lines are formatted into owned strings and then cut to a declared
//! maximum width. Truncation is part of the contract: a long file name or
//! message never wraps onto another screen row.

use crate::terminal::OutputBuffer;
use std::time::{Duration, Instant};

/// Longest file name prefix shown in the status bar, in bytes.
pub const FILENAME_MAX: usize = 20;

/// Shown in place of a file name for a buffer that was never saved.
pub const NO_NAME: &str = "[No Name]";

/// Cut `s` to at most `max` bytes without splitting a character.
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// A two-section status bar (left, right).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    /// File name, line count and modified flag.
    left: String,
    /// Cursor line over total lines.
    right: String,
}

impl StatusBar {
    /// Describe the file and cursor.
    ///
    /// `line` is the 0-based cursor row.
    pub fn new(filename: Option<&str>, numrows: usize, dirty: bool, line: usize) -> Self {
        let name = filename.map_or(NO_NAME, |f| truncate(f, FILENAME_MAX));
        let modified = if dirty { "(modified)" } else { "" };
        Self {
            left: format!("{name} - {numrows} lines {modified}"),
            right: format!("{}/{numrows}", line + 1),
        }
    }

    /// Get the left section content.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Get the right section content.
    pub fn right(&self) -> &str {
        &self.right
    }

    /// Lay the bar out in exactly `width` columns.
    ///
    /// The left section is truncated to the width; the right section is only
    /// drawn when it fits flush against the right edge after the left one.
    pub fn layout(&self, width: usize) -> String {
        let left = truncate(&self.left, width);
        let mut line = String::with_capacity(width);
        line.push_str(left);
        let gap = width - left.len();
        if self.right.len() <= gap {
            line.extend(std::iter::repeat_n(' ', gap - self.right.len()));
            line.push_str(&self.right);
        } else {
            line.extend(std::iter::repeat_n(' ', gap));
        }
        line
    }

    /// Render in inverted video.
    pub fn render(&self, out: &mut OutputBuffer, width: usize) {
        out.invert();
        out.write_str(&self.layout(width));
        out.reset_attrs();
    }
}

/// The most recent status message and when it was set.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    set_at: Instant,
}

impl StatusMessage {
    /// Create a message stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            set_at: Instant::now(),
        }
    }

    /// An empty message.
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Get the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text, if it is younger than `timeout` at `now`.
    pub fn visible(&self, now: Instant, timeout: Duration) -> Option<&str> {
        (now.saturating_duration_since(self.set_at) < timeout && !self.text.is_empty())
            .then_some(self.text.as_str())
    }

    /// Render the message line: erase it, then draw the visible text cut to
    /// `width`.
    pub fn render(&self, out: &mut OutputBuffer, width: usize, now: Instant, timeout: Duration) {
        out.erase_line();
        if let Some(text) = self.visible(now, timeout) {
            out.write_str(truncate(text, width));
        }
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::empty()
    }
}
