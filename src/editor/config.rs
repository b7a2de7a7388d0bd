//! Editor configuration.

use std::time::Duration;

/// Configuration for the [`Editor`](super::Editor) and its event loop.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Extra Ctrl-Q presses required to quit with unsaved changes.
    pub quit_times: usize,
    /// How long a status message stays on screen.
    pub message_timeout: Duration,
    /// Read timeout for a single input byte.
    pub read_timeout: Duration,
    /// Whether to show the version banner on an empty buffer.
    pub welcome: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            quit_times: 3,
            message_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_millis(100),
            welcome: true,
        }
    }
}
