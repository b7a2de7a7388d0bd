//! Termination signals observed while the terminal is in raw mode.
//!
//! Handlers only record the signal number. The timed read notices it on its
//! next return and unwinds through the normal exit path, so the screen is
//! reset and the terminal attributes are restored before the process dies.

use signal_hook::consts::{SIGHUP, SIGQUIT, SIGTERM};
use signal_hook::SigId;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Signals that end an editing session.
pub const TERMINATION_SIGNALS: [i32; 3] = [SIGTERM, SIGHUP, SIGQUIT];

/// Read error payload carrying the signal that interrupted the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("terminated by signal {0}")]
pub struct Terminated(pub i32);

/// Flag-style handlers for a set of signals, removed on drop.
#[derive(Debug)]
pub struct SignalWatch {
    pending: Arc<AtomicUsize>,
    ids: Vec<SigId>,
}

impl SignalWatch {
    /// Install handlers for `signals`.
    pub fn register(signals: &[i32]) -> io::Result<Self> {
        let pending = Arc::new(AtomicUsize::new(0));
        let mut watch = Self {
            pending,
            ids: Vec::with_capacity(signals.len()),
        };
        for &signal in signals {
            let value = usize::try_from(signal)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "negative signal"))?;
            let id = signal_hook::flag::register_usize(signal, Arc::clone(&watch.pending), value)?;
            watch.ids.push(id);
        }
        tracing::debug!(target: "session", ?signals, "signal_handlers_installed");
        Ok(watch)
    }

    /// The most recent signal received, if any.
    pub fn pending(&self) -> Option<i32> {
        match self.pending.load(Ordering::SeqCst) {
            0 => None,
            n => i32::try_from(n).ok(),
        }
    }

    /// Fail with [`Terminated`] once a signal has arrived.
    pub fn check(&self) -> io::Result<()> {
        match self.pending() {
            Some(signal) => Err(io::Error::new(io::ErrorKind::Interrupted, Terminated(signal))),
            None => Ok(()),
        }
    }
}

impl Drop for SignalWatch {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}
