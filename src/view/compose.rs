//! Screen Composer: build one complete frame and write it in one call.
//!
//! Frame layout:
//! 1. Hide the cursor and home it
//! 2. One line per text row: file content (render slice) or a `~` placeholder
//! 3. Status bar in inverted video
//! 4. Message line
//! 5. Place and show the cursor
//!
//! Every line is erased to its end after drawing, so no full-screen clear is
//! needed and the old frame never flashes.

use super::status::{StatusBar, StatusMessage};
use super::viewport::Viewport;
use crate::buffer::RowBuffer;
use crate::editor::Cursor;
use crate::error::Result;
use crate::terminal::OutputBuffer;
use std::io::Write;
use std::time::{Duration, Instant};

/// Everything a frame is drawn from, borrowed for the duration of one
/// composition.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// The text.
    pub rows: &'a RowBuffer,
    /// Scroll offsets and screen size.
    pub viewport: &'a Viewport,
    /// Cursor with an up-to-date `rx`.
    pub cursor: &'a Cursor,
    /// Status bar contents.
    pub status: &'a StatusBar,
    /// Message line contents.
    pub message: &'a StatusMessage,
    /// How long a message stays visible.
    pub message_timeout: Duration,
    /// Banner drawn on an empty buffer, if any.
    pub welcome: Option<&'a str>,
    /// Time used to age the message.
    pub now: Instant,
}

/// Reusable frame builder.
#[derive(Debug, Default)]
pub struct Composer {
    output: OutputBuffer,
}

impl Composer {
    /// Create a composer with a default-sized output buffer.
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
        }
    }

    /// Build the frame bytes.
    pub fn compose(&mut self, frame: &Frame<'_>) -> &[u8] {
        let out = &mut self.output;
        out.clear();
        out.cursor_hide();
        out.cursor_home();

        draw_rows(out, frame);

        let width = frame.viewport.screencols;
        frame.status.render(out, width);
        out.newline();
        frame
            .message
            .render(out, width, frame.now, frame.message_timeout);

        out.cursor_move(
            frame.cursor.cy.saturating_sub(frame.viewport.rowoff),
            frame.cursor.rx.saturating_sub(frame.viewport.coloff),
        );
        out.cursor_show();
        out.as_bytes()
    }

    /// Build the frame and write it to `writer` in a single call.
    pub fn present<W: Write + ?Sized>(&mut self, frame: &Frame<'_>, writer: &mut W) -> Result<()> {
        self.compose(frame);
        self.output.flush_to(writer)
    }
}

fn draw_rows(out: &mut OutputBuffer, frame: &Frame<'_>) {
    let vp = frame.viewport;
    for y in 0..vp.screenrows {
        let filerow = y + vp.rowoff;
        if let Some(row) = frame.rows.row(filerow) {
            out.write_raw(row.render_slice(vp.coloff, vp.screencols));
        } else if let Some(banner) = frame
            .welcome
            .filter(|_| frame.rows.is_empty() && y == vp.screenrows / 3)
        {
            draw_welcome(out, banner, vp.screencols);
        } else {
            out.write_raw(b"~");
        }
        out.erase_line();
        out.newline();
    }
}

/// Center `banner` on the line, keeping the `~` in the first column.
fn draw_welcome(out: &mut OutputBuffer, banner: &str, width: usize) {
    let banner = super::status::truncate(banner, width);
    let mut padding = (width - banner.len()) / 2;
    if padding > 0 {
        out.write_raw(b"~");
        padding -= 1;
    }
    out.write_repeat(b' ', padding);
    out.write_str(banner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RowBuffer;

    struct Fixture {
        rows: RowBuffer,
        viewport: Viewport,
        cursor: Cursor,
        status: StatusBar,
        message: StatusMessage,
    }

    impl Fixture {
        fn new(rows: RowBuffer, screenrows: usize, screencols: usize) -> Self {
            let status = StatusBar::new(Some("test.txt"), rows.len(), false, 0);
            Self {
                rows,
                viewport: Viewport::new(screenrows, screencols),
                cursor: Cursor::default(),
                status,
                message: StatusMessage::new("hello"),
            }
        }

        fn frame(&self) -> Frame<'_> {
            Frame {
                rows: &self.rows,
                viewport: &self.viewport,
                cursor: &self.cursor,
                status: &self.status,
                message: &self.message,
                message_timeout: Duration::from_secs(5),
                welcome: Some("Kilo editor -- version 0.1.0"),
                now: Instant::now(),
            }
        }

        /// Feed a composed frame through a VT100 emulator sized to the
        /// screen plus the two bar lines.
        fn screen(&self) -> vt100::Parser {
            let rows = u16::try_from(self.viewport.screenrows + 2).unwrap();
            let cols = u16::try_from(self.viewport.screencols).unwrap();
            let mut parser = vt100::Parser::new(rows, cols, 0);
            let mut composer = Composer::new();
            parser.process(composer.compose(&self.frame()));
            parser
        }
    }

    fn line(parser: &vt100::Parser, row: u16) -> String {
        let cols = parser.screen().size().1;
        parser.screen().contents_between(row, 0, row, cols).trim_end().to_string()
    }

    #[test]
    fn test_frame_structure() {
        let fixture = Fixture::new(RowBuffer::from_lines(["ab"]), 2, 20);
        let mut composer = Composer::new();
        let bytes = composer.compose(&fixture.frame()).to_vec();
        assert!(bytes.starts_with(b"\x1b[?25l\x1b[H"));
        assert!(bytes.ends_with(b"\x1b[1;1H\x1b[?25h"));
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("ab\x1b[K\r\n~\x1b[K\r\n\x1b[7m"));
        assert!(text.contains("\x1b[m\r\n\x1b[Khello"));
    }

    #[test]
    fn test_rows_and_placeholders() {
        let fixture = Fixture::new(RowBuffer::from_lines(["ab\tc", "", "xyz"]), 5, 20);
        let screen = fixture.screen();
        assert_eq!(line(&screen, 0), "ab      c");
        assert_eq!(line(&screen, 1), "");
        assert_eq!(line(&screen, 2), "xyz");
        assert_eq!(line(&screen, 3), "~");
        assert_eq!(line(&screen, 4), "~");
        assert!(line(&screen, 5).starts_with("test.txt - 3 lines"));
        assert_eq!(line(&screen, 6), "hello");
    }

    #[test]
    fn test_status_bar_is_inverted() {
        let fixture = Fixture::new(RowBuffer::from_lines(["a"]), 2, 30);
        let screen = fixture.screen();
        assert!(screen.screen().cell(2, 0).unwrap().inverse());
        assert!(!screen.screen().cell(0, 0).unwrap().inverse());
    }

    #[test]
    fn test_welcome_banner_on_empty_buffer() {
        let fixture = Fixture::new(RowBuffer::new(), 9, 40);
        let screen = fixture.screen();
        let banner = line(&screen, 3);
        assert!(banner.starts_with('~'));
        assert!(banner.ends_with("Kilo editor -- version 0.1.0"));
        assert_eq!(line(&screen, 0), "~");
    }

    #[test]
    fn test_welcome_banner_is_truncated() {
        let fixture = Fixture::new(RowBuffer::new(), 3, 10);
        let screen = fixture.screen();
        assert_eq!(line(&screen, 1), "Kilo edito");
    }

    #[test]
    fn test_horizontal_scroll_slices_render() {
        let mut fixture = Fixture::new(RowBuffer::from_lines(["0123456789abcdef"]), 1, 6);
        fixture.viewport.coloff = 4;
        fixture.cursor.rx = 6;
        let screen = fixture.screen();
        assert_eq!(line(&screen, 0), "456789");
        assert_eq!(screen.screen().cursor_position(), (0, 2));
    }

    #[test]
    fn test_cursor_placement_is_relative_to_viewport() {
        let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        let mut fixture = Fixture::new(RowBuffer::from_lines(lines), 10, 40);
        fixture.cursor = Cursor { cx: 3, cy: 27, rx: 3 };
        fixture.viewport.scroll(fixture.cursor.cy, fixture.cursor.rx);
        let screen = fixture.screen();
        assert_eq!(line(&screen, 0), "line 18");
        assert_eq!(screen.screen().cursor_position(), (9, 3));
    }

    #[test]
    fn test_present_writes_frame() {
        let fixture = Fixture::new(RowBuffer::new(), 1, 10);
        let mut composer = Composer::new();
        let mut sink = Vec::new();
        composer.present(&fixture.frame(), &mut sink).unwrap();
        assert_eq!(sink, composer.output.as_bytes());
    }

    #[test]
    fn test_present_to_trait_object() {
        let fixture = Fixture::new(RowBuffer::from_lines(["abc"]), 2, 10);
        let mut composer = Composer::new();
        let mut sink = Vec::new();
        let writer: &mut dyn Write = &mut sink;
        composer.present(&fixture.frame(), writer).unwrap();

        let mut parser = vt100::Parser::new(4, 10, 0);
        parser.process(&sink);
        assert_eq!(line(&parser, 0), "abc");
    }
}
