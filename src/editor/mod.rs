//! Editor module: the session state and what keys do to it.
//!
//! - [`Editor`]: Owns the buffer, cursor and viewport; maps keys to edits
//! - [`Cursor`] / [`Movement`]: Cursor position and navigation rules
//! - [`EditorConfig`]: Tunables with sensible defaults
//! - [`file`]: Load and persist collaborators

mod config;
mod controller;
mod cursor;
pub mod file;
mod prompt;

pub use config::EditorConfig;
pub use controller::{Control, Editor, HELP_MESSAGE};
pub use cursor::{Cursor, Movement};
pub use prompt::{Prompt, PromptOutcome};
