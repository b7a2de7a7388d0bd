//! Logical key events produced by the decoder.

/// The escape byte that starts every multi-byte key sequence.
pub const ESC: u8 = 0x1b;

/// Byte most terminals send for the Backspace key.
pub const BACKSPACE: u8 = 0x7f;

/// Map a letter to the byte produced when it is typed with Ctrl held.
#[inline]
pub const fn ctrl(byte: u8) -> u8 {
    byte & 0x1f
}

/// A decoded keypress.
///
/// Control bytes stay raw in [`Key::Control`], so `Enter` is
/// `Key::Control(b'\r')` and `Tab` is `Key::Control(b'\t')`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable byte (anything that is not a control byte or DEL).
    Char(u8),
    /// A control byte in `0x00..=0x1f` other than a lone escape.
    Control(u8),
    /// DEL (0x7f).
    Backspace,
    /// A bare escape, or a sequence the decoder did not recognise.
    Escape,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Forward delete.
    Delete,
}

impl Key {
    /// Classify a single byte that is not the start of an escape sequence.
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            ESC => Self::Escape,
            BACKSPACE => Self::Backspace,
            0x00..=0x1f => Self::Control(byte),
            _ => Self::Char(byte),
        }
    }

    /// Check whether this is the Ctrl+`letter` chord.
    pub const fn is_ctrl(self, letter: u8) -> bool {
        matches!(self, Self::Control(b) if b == ctrl(letter))
    }

    /// The byte to insert into the text for this key, if it has one.
    pub const fn as_byte(self) -> Option<u8> {
        match self {
            Self::Char(b) | Self::Control(b) => Some(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte() {
        assert_eq!(Key::from_byte(b'a'), Key::Char(b'a'));
        assert_eq!(Key::from_byte(b'\r'), Key::Control(b'\r'));
        assert_eq!(Key::from_byte(0), Key::Control(0));
        assert_eq!(Key::from_byte(0x7f), Key::Backspace);
        assert_eq!(Key::from_byte(0x1b), Key::Escape);
        assert_eq!(Key::from_byte(0xc3), Key::Char(0xc3));
    }

    #[test]
    fn test_ctrl_chords() {
        assert_eq!(ctrl(b'q'), 0x11);
        assert!(Key::Control(0x11).is_ctrl(b'q'));
        assert!(!Key::Char(b'q').is_ctrl(b'q'));
        assert!(Key::Control(b'\x08').is_ctrl(b'h'));
    }
}
