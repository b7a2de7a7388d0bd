//! # Kilo
//!
//! A small terminal text editor that talks to the terminal directly: raw
//! mode, byte-level key decoding and one ANSI frame per keypress.
//!
//! ## Core Concepts
//!
//! - **Raw session**: termios raw mode with a short read timeout, restored on drop
//! - **Key decoding**: escape sequences resolved with a bounded lookahead
//! - **Row buffer**: lines as bytes, each with a tab-expanded rendering
//! - **Single-write frames**: every refresh is composed in memory and written once
//!
//! ## Example
//!
//! ```rust,ignore
//! use kilo::{Editor, EditorConfig, Key, WindowSize};
//!
//! let mut editor = Editor::new(EditorConfig::default(), WindowSize { rows: 24, cols: 80 });
//! editor.process_key(Key::Char(b'x'));
//! editor.scroll();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod buffer;
pub mod editor;
pub mod error;
pub mod input;
pub mod terminal;
pub mod view;

// Re-exports for convenience
pub use app::run;
pub use buffer::{Position, Row, RowBuffer, SearchDirection, TAB_STOP};
pub use editor::{Control, Cursor, Editor, EditorConfig, Movement};
pub use error::{EditorError, Result};
pub use input::{ByteSource, Key, KeyDecoder};
pub use terminal::{restore_terminal, OutputBuffer, TerminalSession, WindowSize};
pub use view::{Composer, Frame, StatusBar, StatusMessage, Viewport};
