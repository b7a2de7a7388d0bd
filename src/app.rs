//! The event loop: refresh, read one key, act, repeat.
//!
//! Everything runs on one thread. The only blocking point is the timed byte
//! read inside the decoder; decoding, editing and drawing each run to
//! completion within one iteration.

use crate::editor::{Control, Editor, EditorConfig};
use crate::error::Result;
use crate::input::{ByteSource, KeyDecoder};
use crate::terminal::{window_size, TerminalSession};
use crate::view::Composer;
use crossterm::{cursor::MoveTo, execute, terminal::Clear, terminal::ClearType};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Run an editing session on the controlling terminal until the user quits.
///
/// The terminal is switched to raw mode for the duration of the call and
/// restored on every return path, including errors.
pub fn run(config: EditorConfig, file: Option<PathBuf>) -> Result<()> {
    let session = TerminalSession::enter(config.read_timeout)?;
    let mut decoder = KeyDecoder::new(session);
    let mut stdout = io::stdout();

    let result = start(config, file, &mut decoder, &mut stdout);
    reset_screen(&mut stdout);
    result
    // `decoder` drops here, restoring the terminal mode.
}

fn start<S, W>(
    config: EditorConfig,
    file: Option<PathBuf>,
    decoder: &mut KeyDecoder<S>,
    out: &mut W,
) -> Result<()>
where
    S: ByteSource,
    W: Write,
{
    let size = window_size(decoder.source_mut(), out)?;
    tracing::info!(target: "editor", rows = size.rows, cols = size.cols, file = ?file, "starting");

    let mut editor = Editor::new(config, size);
    if let Some(path) = file {
        editor.open(path)?;
    }
    event_loop(&mut editor, decoder, out)
}

/// Drive `editor` from `decoder` until a quit, writing frames to `out`.
pub fn event_loop<S, W>(editor: &mut Editor, decoder: &mut KeyDecoder<S>, out: &mut W) -> Result<()>
where
    S: ByteSource,
    W: Write,
{
    let mut composer = Composer::new();
    loop {
        editor.scroll();
        composer.present(&editor.frame(Instant::now()), out)?;

        let key = decoder.next_key()?;
        if editor.process_key(key) == Control::Quit {
            return Ok(());
        }
    }
}

/// Clear the screen and home the cursor. Best effort: this runs on the way
/// out, where there is nobody left to report a failure to.
pub fn reset_screen<W: Write>(out: &mut W) {
    if let Err(e) = execute!(out, Clear(ClearType::All), MoveTo(0, 0)) {
        tracing::warn!(target: "editor", error = %e, "reset_screen_failed");
    }
}
