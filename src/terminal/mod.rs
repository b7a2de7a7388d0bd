//! Terminal module: raw mode, window size and frame output.
//!
//! This module contains:
//! - [`TerminalSession`]: Raw-mode guard that doubles as the input byte source
//! - [`SignalWatch`]: Records termination signals for the read loop
//! - [`window_size`]: Native size query with a cursor-report fallback
//! - [`OutputBuffer`]: Single-write frame accumulator

mod output;
mod session;
mod signals;
mod size;

pub use output::OutputBuffer;
pub use session::{restore_terminal, TerminalSession};
pub use signals::{SignalWatch, Terminated, TERMINATION_SIGNALS};
pub use size::{cursor_position, parse_cursor_report, window_size, WindowSize};
