//! Editor Controller: the state machine between keys and the buffer.
//!
//! In `Normal` mode keys edit the buffer or move the cursor. `Ctrl-S` on an
//! unnamed buffer and `Ctrl-F` switch to a prompt mode that owns the message
//! line until it is accepted or cancelled.

use super::config::EditorConfig;
use super::cursor::{Cursor, Movement};
use super::file;
use super::prompt::{Prompt, PromptOutcome};
use crate::buffer::{RowBuffer, SearchDirection};
use crate::error::{EditorError, Result};
use crate::input::Key;
use crate::terminal::WindowSize;
use crate::view::{Frame, StatusBar, StatusMessage, Viewport};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Message shown when the editor starts.
pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// Lines reserved at the bottom of the screen for the status and message bars.
const BAR_LINES: usize = 2;

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep going.
    Continue,
    /// Leave the loop and exit.
    Quit,
}

/// State of an incremental search.
#[derive(Debug, Clone)]
struct Search {
    prompt: Prompt,
    last_match: Option<usize>,
    direction: SearchDirection,
    saved_cursor: Cursor,
    saved_viewport: Viewport,
}

/// Which keys the controller is currently interpreting.
#[derive(Debug, Clone)]
enum Mode {
    Normal,
    SaveAs(Prompt),
    Find(Search),
}

/// The editing session: buffer, cursor, viewport and bar contents.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    rows: RowBuffer,
    cursor: Cursor,
    viewport: Viewport,
    filename: Option<PathBuf>,
    status: StatusBar,
    message: StatusMessage,
    /// Ctrl-Q presses still needed to abandon unsaved changes.
    quit_times: usize,
    mode: Mode,
    welcome: String,
}

impl Editor {
    /// Create an editor with an empty buffer for a window of `size`.
    pub fn new(config: EditorConfig, size: WindowSize) -> Self {
        let rows = RowBuffer::new();
        let quit_times = config.quit_times;
        Self {
            config,
            status: StatusBar::new(None, rows.len(), false, 0),
            rows,
            cursor: Cursor::default(),
            viewport: Viewport::new(size.rows.saturating_sub(BAR_LINES), size.cols),
            filename: None,
            message: StatusMessage::new(HELP_MESSAGE),
            quit_times,
            mode: Mode::Normal,
            welcome: format!("Kilo editor -- version {}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Load `path` into the editor and remember it as the save target.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let rows = file::load(&path)?;
        self.set_buffer(rows);
        self.filename = Some(path);
        Ok(())
    }

    /// Replace the buffer and move the cursor to the origin.
    pub fn set_buffer(&mut self, rows: RowBuffer) {
        self.rows = rows;
        self.cursor = Cursor::default();
        self.viewport.rowoff = 0;
        self.viewport.coloff = 0;
    }

    /// Set the file the buffer is saved to.
    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        self.filename = Some(path.into());
    }

    /// The file the buffer is saved to.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// The text.
    pub const fn rows(&self) -> &RowBuffer {
        &self.rows
    }

    /// The cursor.
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The viewport.
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether the buffer has unsaved changes.
    pub const fn is_dirty(&self) -> bool {
        self.rows.is_dirty()
    }

    /// The current status message text.
    pub fn message(&self) -> &str {
        self.message.text()
    }

    /// Replace the status message.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.message = StatusMessage::new(text);
    }

    /// Handle one decoded key.
    pub fn process_key(&mut self, key: Key) -> Control {
        tracing::trace!(target: "editor", ?key, "key");
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Normal => self.process_normal(key),
            Mode::SaveAs(prompt) => {
                self.process_save_as(prompt, key);
                Control::Continue
            }
            Mode::Find(search) => {
                self.process_find(search, key);
                Control::Continue
            }
        }
    }

    /// Write the buffer to its file.
    ///
    /// On success the buffer is clean and the byte count is returned. On
    /// failure the buffer stays dirty.
    pub fn save(&mut self) -> Result<usize> {
        let Some(path) = self.filename.as_deref() else {
            return Err(EditorError::FileSave(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no file name",
            )));
        };
        let text = self.rows.rows_to_text();
        let written = file::persist(path, &text).map_err(EditorError::FileSave)?;
        self.rows.mark_clean();
        tracing::info!(target: "editor", path = %path.display(), bytes = written, "saved");
        Ok(written)
    }

    /// Bring the viewport to the cursor and refresh the status bar.
    ///
    /// Runs once per refresh, before [`Editor::frame`].
    pub fn scroll(&mut self) {
        self.cursor.clamp(&self.rows);
        self.cursor.update_rx(&self.rows);
        self.viewport.scroll(self.cursor.cy, self.cursor.rx);
        let name = self.filename.as_ref().map(|p| p.display().to_string());
        self.status = StatusBar::new(
            name.as_deref(),
            self.rows.len(),
            self.rows.is_dirty(),
            self.cursor.cy,
        );
    }

    /// Borrow everything the composer needs for one frame.
    pub fn frame(&self, now: Instant) -> Frame<'_> {
        Frame {
            rows: &self.rows,
            viewport: &self.viewport,
            cursor: &self.cursor,
            status: &self.status,
            message: &self.message,
            message_timeout: self.config.message_timeout,
            welcome: self.config.welcome.then_some(self.welcome.as_str()),
            now,
        }
    }

    fn process_normal(&mut self, key: Key) -> Control {
        match key {
            k if k.is_ctrl(b'q') => {
                if self.rows.is_dirty() && self.quit_times > 0 {
                    self.set_status(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                        self.quit_times
                    ));
                    self.quit_times -= 1;
                    return Control::Continue;
                }
                tracing::info!(target: "editor", dirty = self.rows.dirty(), "quit");
                return Control::Quit;
            }
            k if k.is_ctrl(b's') => self.save_or_prompt(),
            k if k.is_ctrl(b'f') => self.start_find(),
            k if k.is_ctrl(b'l') => {}
            Key::Escape => {}
            Key::Control(b'\r') => {
                let pos = self.rows.insert_newline(self.cursor.position());
                self.cursor.set_position(pos);
            }
            Key::Backspace => self.delete_char(),
            k if k.is_ctrl(b'h') => self.delete_char(),
            Key::Delete => {
                self.cursor.apply(Movement::Right, &self.rows);
                self.delete_char();
            }
            Key::ArrowLeft => self.cursor.apply(Movement::Left, &self.rows),
            Key::ArrowRight => self.cursor.apply(Movement::Right, &self.rows),
            Key::ArrowUp => self.cursor.apply(Movement::Up, &self.rows),
            Key::ArrowDown => self.cursor.apply(Movement::Down, &self.rows),
            Key::Home => self.cursor.apply(Movement::Home, &self.rows),
            Key::End => self.cursor.apply(Movement::End, &self.rows),
            Key::PageUp => self.page(Movement::Up),
            Key::PageDown => self.page(Movement::Down),
            Key::Char(b) | Key::Control(b) => {
                let pos = self.rows.insert_char(self.cursor.position(), b);
                self.cursor.set_position(pos);
            }
        }
        self.quit_times = self.config.quit_times;
        Control::Continue
    }

    fn delete_char(&mut self) {
        let pos = self.rows.delete_char(self.cursor.position());
        self.cursor.set_position(pos);
    }

    /// Jump to the top (or bottom) visible row, then move a full screen.
    fn page(&mut self, movement: Movement) {
        if movement == Movement::Up {
            self.cursor.cy = self.viewport.rowoff;
        } else {
            self.cursor.cy = self.viewport.bottom().min(self.rows.len());
        }
        self.cursor.clamp(&self.rows);
        for _ in 0..self.viewport.screenrows {
            self.cursor.apply(movement, &self.rows);
        }
    }

    fn save_or_prompt(&mut self) {
        if self.filename.is_none() {
            let prompt = Prompt::new("Save as: ", " (ESC to cancel)");
            self.set_status(prompt.message());
            self.mode = Mode::SaveAs(prompt);
            return;
        }
        self.write_out();
    }

    fn write_out(&mut self) {
        match self.save() {
            Ok(written) => self.set_status(format!("{written} bytes written to disk")),
            Err(e) => {
                tracing::warn!(target: "editor", error = %e, "save_failed");
                self.set_status(e.to_string());
            }
        }
    }

    fn process_save_as(&mut self, mut prompt: Prompt, key: Key) {
        match prompt.handle(key) {
            PromptOutcome::Pending => {
                self.set_status(prompt.message());
                self.mode = Mode::SaveAs(prompt);
            }
            PromptOutcome::Accepted(name) => {
                self.filename = Some(PathBuf::from(name));
                self.write_out();
            }
            PromptOutcome::Cancelled => self.set_status("Save aborted"),
        }
    }

    fn start_find(&mut self) {
        let search = Search {
            prompt: Prompt::new("Search: ", " (Use ESC/Arrows/Enter)"),
            last_match: None,
            direction: SearchDirection::Forward,
            saved_cursor: self.cursor,
            saved_viewport: self.viewport,
        };
        self.set_status(search.prompt.message());
        self.mode = Mode::Find(search);
    }

    fn process_find(&mut self, mut search: Search, key: Key) {
        match search.prompt.handle(key) {
            PromptOutcome::Accepted(_) => {
                self.set_status("");
                return;
            }
            PromptOutcome::Cancelled => {
                self.cursor = search.saved_cursor;
                self.viewport.rowoff = search.saved_viewport.rowoff;
                self.viewport.coloff = search.saved_viewport.coloff;
                self.set_status("");
                return;
            }
            PromptOutcome::Pending => {}
        }

        match key {
            Key::ArrowRight | Key::ArrowDown => search.direction = SearchDirection::Forward,
            Key::ArrowLeft | Key::ArrowUp => search.direction = SearchDirection::Backward,
            _ => {
                search.last_match = None;
                search.direction = SearchDirection::Forward;
            }
        }
        if search.last_match.is_none() {
            search.direction = SearchDirection::Forward;
        }

        let query = search.prompt.input().as_bytes();
        if !query.is_empty() {
            if let Some((row, rx)) = self.rows.find(query, search.last_match, search.direction) {
                search.last_match = Some(row);
                self.cursor.cy = row;
                self.cursor.cx = self.rows.row(row).map_or(0, |r| r.rx_to_cx(rx));
                // Scrolling from past the end puts the match on the top line.
                self.viewport.rowoff = self.rows.len();
            }
        }

        self.set_status(search.prompt.message());
        self.mode = Mode::Find(search);
    }
}
