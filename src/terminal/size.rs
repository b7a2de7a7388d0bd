//! Window size detection.
//!
//! The native report comes from crossterm. When it fails or reports zero
//! columns, the cursor is pushed to the bottom-right corner and the terminal
//! is asked where it ended up (`ESC [ 6 n` answered by `ESC [ rows ; cols R`).

use crate::error::{EditorError, Result};
use crate::input::ByteSource;
use std::io::Write;

/// Upper bound on the bytes read while waiting for a cursor report.
const REPORT_MAX: usize = 32;

/// Size of the terminal window in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

/// Query the window size, falling back to a cursor-position round trip.
pub fn window_size<S, W>(input: &mut S, output: &mut W) -> Result<WindowSize>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 => {
            let size = WindowSize {
                rows: usize::from(rows),
                cols: usize::from(cols),
            };
            tracing::debug!(target: "size", rows = size.rows, cols = size.cols, "native_size");
            Ok(size)
        }
        other => {
            tracing::debug!(target: "size", native = ?other, "falling_back_to_cursor_report");
            output
                .write_all(b"\x1b[999C\x1b[999B")
                .and_then(|()| output.flush())
                .map_err(|_| EditorError::SizeUnavailable)?;
            cursor_position(input, output)
        }
    }
}

/// Ask the terminal for the cursor position and parse its reply.
pub fn cursor_position<S, W>(input: &mut S, output: &mut W) -> Result<WindowSize>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    output
        .write_all(b"\x1b[6n")
        .and_then(|()| output.flush())
        .map_err(|_| EditorError::SizeUnavailable)?;

    let mut reply = Vec::with_capacity(REPORT_MAX);
    while reply.len() < REPORT_MAX - 1 {
        match input.read_byte() {
            Ok(Some(b'R') | None) | Err(_) => break,
            Ok(Some(b)) => reply.push(b),
        }
    }

    parse_cursor_report(&reply).ok_or(EditorError::SizeUnavailable)
}

/// Parse `ESC [ rows ; cols` (the terminating `R` already stripped).
pub fn parse_cursor_report(reply: &[u8]) -> Option<WindowSize> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let body = std::str::from_utf8(body).ok()?;
    let (rows, cols) = body.split_once(';')?;
    Some(WindowSize {
        rows: rows.parse().ok()?,
        cols: cols.parse().ok()?,
    })
}
