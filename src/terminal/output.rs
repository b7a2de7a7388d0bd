//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use crate::error::{EditorError, Result};
use std::io::Write;

/// Pre-allocated buffer for building one frame of ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` call
/// to prevent terminal flickering.
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write `count` copies of `byte`.
    #[inline]
    pub fn write_repeat(&mut self, byte: u8, count: usize) {
        self.data.resize(self.data.len() + count, byte);
    }

    /// Move cursor to (row, col), both 0-indexed.
    #[inline]
    pub fn cursor_move(&mut self, row: usize, col: usize) {
        // CSI row ; col H
        let _ = write!(self.data, "\x1b[{};{}H", row + 1, col + 1);
    }

    /// Move cursor to the top-left corner.
    #[inline]
    pub fn cursor_home(&mut self) {
        self.data.extend_from_slice(b"\x1b[H");
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Erase from the cursor to the end of the line.
    #[inline]
    pub fn erase_line(&mut self) {
        self.data.extend_from_slice(b"\x1b[K");
    }

    /// Switch to inverted colors.
    #[inline]
    pub fn invert(&mut self) {
        self.data.extend_from_slice(b"\x1b[7m");
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[m");
    }

    /// Emit a line break. Output post-processing is off in raw mode, so both
    /// bytes are needed.
    #[inline]
    pub fn newline(&mut self) {
        self.data.extend_from_slice(b"\r\n");
    }

    /// Flush to a writer in a single call.
    ///
    /// A short write is not retried: the terminal state is unknown after it,
    /// so it surfaces as [`EditorError::IoWrite`].
    pub fn flush_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        match writer.write(&self.data) {
            Ok(n) if n == self.data.len() => {}
            Ok(n) => {
                return Err(EditorError::IoWrite(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    format!("partial frame: {n} of {} bytes", self.data.len()),
                )));
            }
            Err(e) => return Err(EditorError::IoWrite(e)),
        }
        writer.flush().map_err(EditorError::IoWrite)
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that accepts at most `limit` bytes per call.
    struct Short {
        limit: usize,
        written: Vec<u8>,
    }

    impl Write for Short {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_cursor_move_is_one_indexed() {
        let mut out = OutputBuffer::new();
        out.cursor_move(0, 0);
        out.cursor_move(4, 9);
        assert_eq!(out.as_bytes(), b"\x1b[1;1H\x1b[5;10H");
    }

    #[test]
    fn test_write_repeat() {
        let mut out = OutputBuffer::new();
        out.write_raw(b"~");
        out.write_repeat(b' ', 3);
        assert_eq!(out.as_bytes(), b"~   ");
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_flush_single_write() {
        let mut out = OutputBuffer::new();
        out.cursor_hide();
        out.write_str("hello");
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"\x1b[?25lhello");
    }

    #[test]
    fn test_partial_write_is_fatal() {
        let mut out = OutputBuffer::new();
        out.write_str("0123456789");
        let mut short = Short { limit: 4, written: Vec::new() };
        let err = out.flush_to(&mut short).unwrap_err();
        assert!(matches!(err, EditorError::IoWrite(_)));
        assert_eq!(short.written, b"0123");
    }
}
