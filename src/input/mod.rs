//! Input module: decoding raw terminal bytes into keys.
//!
//! - [`Key`]: A logical keypress
//! - [`KeyDecoder`]: Escape-sequence decoder over any [`ByteSource`]

mod decoder;
mod key;

pub use decoder::{ByteSource, KeyDecoder};
pub use key::{ctrl, Key, BACKSPACE, ESC};

#[cfg(test)]
pub(crate) use decoder::ScriptedBytes;
