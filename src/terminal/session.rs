//! Terminal Session: raw-mode enter/exit and timed byte reads.
//!
//! Raw mode is applied through rustix's termios API rather than crossterm's
//! `enable_raw_mode`, because the key decoder needs `VMIN = 0` and a `VTIME`
//! read timeout so that "no input yet" can be told apart from a keypress.
//!
//! The attributes captured on entry live in a process-wide slot so that the
//! panic hook can restore them too, not only [`Drop`]. While the session is
//! active, termination signals are recorded and reported by the next
//! read as a [`Terminated`](super::Terminated) error.

use super::signals::{SignalWatch, TERMINATION_SIGNALS};
use crate::error::{EditorError, Result};
use crate::input::ByteSource;
use rustix::io::Errno;
use rustix::termios::{
    self, ControlModes, InputModes, LocalModes, OptionalActions, OutputModes, SpecialCodeIndex,
    Termios,
};
use std::io;
use std::sync::{LazyLock, Mutex};
use std::time::Duration;

/// Terminal attributes as they were before the session started.
static ORIGINAL_TERMIOS: LazyLock<Mutex<Option<Termios>>> = LazyLock::new(|| Mutex::new(None));

/// An active raw-mode session on stdin.
///
/// Dropping the session restores the original terminal attributes.
#[derive(Debug)]
pub struct TerminalSession {
    stdin: io::Stdin,
    signals: SignalWatch,
}

impl TerminalSession {
    /// Capture the current attributes and switch stdin to raw mode.
    ///
    /// Reads return after at most `read_timeout` (rounded up to tenths of a
    /// second, the `VTIME` unit) even when no byte arrived.
    pub fn enter(read_timeout: Duration) -> Result<Self> {
        let stdin = io::stdin();
        let signals = SignalWatch::register(&TERMINATION_SIGNALS).map_err(EditorError::Terminal)?;
        let original = termios::tcgetattr(&stdin).map_err(|e| EditorError::Terminal(e.into()))?;

        {
            let mut slot = ORIGINAL_TERMIOS
                .lock()
                .map_err(|_| EditorError::Terminal(io::Error::other("terminal state lock poisoned")))?;
            if slot.is_none() {
                *slot = Some(original.clone());
            }
        }

        let mut raw = original;
        raw.input_modes.remove(
            InputModes::BRKINT
                | InputModes::ICRNL
                | InputModes::INPCK
                | InputModes::ISTRIP
                | InputModes::IXON,
        );
        raw.output_modes.remove(OutputModes::OPOST);
        raw.control_modes.insert(ControlModes::CS8);
        raw.local_modes
            .remove(LocalModes::ECHO | LocalModes::ICANON | LocalModes::IEXTEN | LocalModes::ISIG);
        raw.special_codes[SpecialCodeIndex::VMIN] = 0;
        raw.special_codes[SpecialCodeIndex::VTIME] = deciseconds(read_timeout);

        termios::tcsetattr(&stdin, OptionalActions::Flush, &raw)
            .map_err(|e| EditorError::Terminal(e.into()))?;

        tracing::debug!(target: "session", timeout_ms = read_timeout.as_millis(), "raw_mode_entered");
        Ok(Self { stdin, signals })
    }
}

impl ByteSource for TerminalSession {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.signals.check()?;
        let mut buf = [0u8; 1];
        match rustix::io::read(&self.stdin, &mut buf[..]) {
            Ok(1) => Ok(Some(buf[0])),
            Ok(_) | Err(Errno::AGAIN | Errno::INTR) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            tracing::warn!(target: "session", error = %e, "restore_failed");
        }
    }
}

/// Put back the attributes captured by [`TerminalSession::enter`].
///
/// No-op when no session was ever entered. Safe to call more than once.
pub fn restore_terminal() -> Result<()> {
    let original = ORIGINAL_TERMIOS
        .lock()
        .map_err(|_| EditorError::Terminal(io::Error::other("terminal state lock poisoned")))?;

    if let Some(ref attrs) = *original {
        termios::tcsetattr(io::stdin(), OptionalActions::Flush, attrs)
            .map_err(|e| EditorError::Terminal(e.into()))?;
        tracing::debug!(target: "session", "raw_mode_exited");
    }
    Ok(())
}

/// Convert a timeout to `VTIME` units, clamped to `1..=255`.
fn deciseconds(timeout: Duration) -> u8 {
    let tenths = timeout.as_millis().div_ceil(100);
    u8::try_from(tenths.clamp(1, 255)).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deciseconds() {
        assert_eq!(deciseconds(Duration::from_millis(100)), 1);
        assert_eq!(deciseconds(Duration::from_millis(150)), 2);
        assert_eq!(deciseconds(Duration::ZERO), 1);
        assert_eq!(deciseconds(Duration::from_secs(60)), 255);
    }

    #[test]
    fn test_restore_without_session_is_noop() {
        // No test enters raw mode, so the slot stays empty.
        assert!(restore_terminal().is_ok());
    }
}
