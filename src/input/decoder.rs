//! Key Decoder: turn a raw byte stream into logical keys.
//!
//! Terminals report special keys as multi-byte escape sequences that look,
//! byte by byte, exactly like someone pressing Escape and then typing. The
//! decoder tells them apart with a bounded lookahead: after an escape byte it
//! waits at most one read timeout for each following byte, and anything it
//! cannot complete or recognise becomes [`Key::Escape`].

use super::key::{Key, ESC};
use crate::error::{EditorError, Result};
use std::io;

/// A source of raw bytes with a read timeout.
pub trait ByteSource {
    /// Read one byte.
    ///
    /// Returns `Ok(None)` when the timeout elapsed without input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }
}

/// Decodes keys from a [`ByteSource`].
///
/// Reading blocks (one timeout at a time) until a key arrives, so the
/// iterator never ends on its own; it yields `Err` only for read failures.
#[derive(Debug)]
pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    /// Wrap a byte source.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Borrow the underlying source.
    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Wait for and decode the next key.
    pub fn next_key(&mut self) -> Result<Key> {
        let byte = loop {
            if let Some(b) = self.read()? {
                break b;
            }
        };

        if byte != ESC {
            return Ok(Key::from_byte(byte));
        }
        self.decode_escape()
    }

    /// Decode the remainder of a sequence after the leading escape byte.
    fn decode_escape(&mut self) -> Result<Key> {
        let Some(first) = self.read()? else {
            return Ok(Key::Escape);
        };
        let Some(second) = self.read()? else {
            return Ok(Key::Escape);
        };

        let key = match first {
            b'[' if second.is_ascii_digit() => {
                let Some(third) = self.read()? else {
                    return Ok(Key::Escape);
                };
                if third == b'~' {
                    tilde_key(second)
                } else {
                    None
                }
            }
            b'[' => csi_key(second),
            b'O' => ss3_key(second),
            _ => None,
        };

        Ok(key.unwrap_or(Key::Escape))
    }

    fn read(&mut self) -> Result<Option<u8>> {
        self.source.read_byte().map_err(EditorError::from_read)
    }
}

impl<S: ByteSource> Iterator for KeyDecoder<S> {
    type Item = Result<Key>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_key())
    }
}

/// `ESC [ <digit> ~`
const fn tilde_key(digit: u8) -> Option<Key> {
    Some(match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => return None,
    })
}

/// `ESC [ <letter>`
const fn csi_key(letter: u8) -> Option<Key> {
    Some(match letter {
        b'A' => Key::ArrowUp,
        b'B' => Key::ArrowDown,
        b'C' => Key::ArrowRight,
        b'D' => Key::ArrowLeft,
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => return None,
    })
}

/// `ESC O <letter>`
const fn ss3_key(letter: u8) -> Option<Key> {
    match letter {
        b'H' => Some(Key::Home),
        b'F' => Some(Key::End),
        _ => None,
    }
}

/// A scripted [`ByteSource`] for tests.
///
/// `None` entries stand for a read that timed out. Once the script runs out
/// every read fails with `UnexpectedEof`, so a test can never hang waiting
/// for input.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedBytes {
    script: std::collections::VecDeque<Option<u8>>,
    signal: Option<i32>,
}

#[cfg(test)]
impl ScriptedBytes {
    /// Script that delivers `bytes` back to back.
    pub(crate) fn new(bytes: &[u8]) -> Self {
        Self {
            script: bytes.iter().copied().map(Some).collect(),
            signal: None,
        }
    }

    /// Append a timed-out read.
    pub(crate) fn timeout(mut self) -> Self {
        self.script.push_back(None);
        self
    }

    /// Append more bytes.
    pub(crate) fn then(mut self, bytes: &[u8]) -> Self {
        self.script.extend(bytes.iter().copied().map(Some));
        self
    }

    /// Once the script runs out, fail reads as if `signal` had arrived.
    pub(crate) const fn then_signal(mut self, signal: i32) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Entries not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[cfg(test)]
impl ByteSource for ScriptedBytes {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(entry) = self.script.pop_front() {
            return Ok(entry);
        }
        Err(match self.signal {
            Some(signal) => io::Error::new(
                io::ErrorKind::Interrupted,
                crate::terminal::Terminated(signal),
            ),
            None => io::Error::from(io::ErrorKind::UnexpectedEof),
        })
    }
}
