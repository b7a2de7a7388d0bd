//! Error taxonomy for the editor.
//!
//! Everything except [`EditorError::FileSave`] is fatal: the caller is
//! expected to unwind to `main`, letting the terminal session restore the
//! original mode on the way out.

use crate::terminal::Terminated;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the editor core.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Getting or setting terminal attributes failed.
    #[error("terminal attributes: {0}")]
    Terminal(#[source] io::Error),

    /// Neither the native size report nor the cursor-position fallback worked.
    #[error("unable to determine the window size")]
    SizeUnavailable,

    /// The initial file could not be read.
    #[error("cannot open {}: {source}", path.display())]
    FileLoad {
        /// File that was being opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Persisting the buffer failed. Recoverable.
    #[error("Can't save! I/O error: {0}")]
    FileSave(#[source] io::Error),

    /// A frame could not be written in full.
    #[error("frame write failed: {0}")]
    IoWrite(#[source] io::Error),

    /// Reading from the terminal failed for a reason other than a timeout.
    #[error("read: {0}")]
    Input(#[source] io::Error),

    /// A termination signal arrived while the session was running.
    #[error("terminated by signal {0}")]
    Signal(i32),
}

impl EditorError {
    /// Classify a failed terminal read.
    pub(crate) fn from_read(err: io::Error) -> Self {
        match err.get_ref().and_then(|e| e.downcast_ref::<Terminated>()) {
            Some(&Terminated(signal)) => Self::Signal(signal),
            None => Self::Input(err),
        }
    }

    /// Whether the editing session can keep running after this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::FileSave(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EditorError>;
