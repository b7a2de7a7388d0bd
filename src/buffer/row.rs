//! Row: one line of text plus its tab-expanded rendering.

/// Tab stops fall on every multiple of this many columns.
pub const TAB_STOP: usize = 8;

/// A single line of the file.
///
/// `chars` is the authoritative content without a line terminator. `render`
/// is derived from it (tabs expanded to spaces) and is regenerated by every
/// mutating method, so it is never stale when read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
}

impl Row {
    /// Create a row from raw bytes.
    pub fn new(chars: impl Into<Vec<u8>>) -> Self {
        let mut row = Self {
            chars: chars.into(),
            render: Vec::new(),
        };
        row.update();
        row
    }

    /// Number of bytes in `chars`.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check if the row has no content.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The stored bytes.
    #[inline]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// The tab-expanded bytes shown on screen.
    #[inline]
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// The part of `render` visible in `width` columns starting at `coloff`.
    pub fn render_slice(&self, coloff: usize, width: usize) -> &[u8] {
        let start = coloff.min(self.render.len());
        let end = start.saturating_add(width).min(self.render.len());
        &self.render[start..end]
    }

    /// Convert a `chars` index to a `render` column.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        self.chars
            .iter()
            .take(cx)
            .fold(0, |rx, &b| if b == b'\t' { next_tab_stop(rx) } else { rx + 1 })
    }

    /// Convert a `render` column back to a `chars` index.
    ///
    /// Returns the index of the byte whose rendering covers `rx`, or the row
    /// length when `rx` lies past the end.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &b) in self.chars.iter().enumerate() {
            cur_rx = if b == b'\t' { next_tab_stop(cur_rx) } else { cur_rx + 1 };
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }

    /// Insert `byte` at `at`, clamped to `0..=len`.
    pub fn insert(&mut self, at: usize, byte: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, byte);
        self.update();
    }

    /// Remove and return the byte at `at`, if there is one.
    pub fn remove(&mut self, at: usize) -> Option<u8> {
        if at >= self.chars.len() {
            return None;
        }
        let byte = self.chars.remove(at);
        self.update();
        Some(byte)
    }

    /// Append bytes to the end of the row.
    pub fn append(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
        self.update();
    }

    /// Split the row at `at`, keeping the head and returning the tail.
    pub fn split_off(&mut self, at: usize) -> Self {
        let at = at.min(self.chars.len());
        let tail = self.chars.split_off(at);
        self.update();
        Self::new(tail)
    }

    /// Byte offset in `render` of the first occurrence of `needle`.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        self.render.windows(needle.len()).position(|w| w == needle)
    }

    /// Regenerate `render` from `chars`.
    fn update(&mut self) {
        self.render.clear();
        for &b in &self.chars {
            if b == b'\t' {
                let target = next_tab_stop(self.render.len());
                self.render.resize(target, b' ');
            } else {
                self.render.push(b);
            }
        }
    }
}

/// The column a tab at `rx` advances to.
#[inline]
const fn next_tab_stop(rx: usize) -> usize {
    (rx / TAB_STOP + 1) * TAB_STOP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_tabs_matches_chars() {
        let row = Row::new("hello world");
        assert_eq!(row.render(), row.chars());
    }

    #[test]
    fn test_tab_expansion() {
        let row = Row::new("ab\tc");
        assert_eq!(row.render(), b"ab      c");
        assert_eq!(Row::new("\t").render(), b"        ");
        assert_eq!(Row::new("12345678\tx").render(), b"12345678        x");
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut row = Row::new("a\tb\tc");
        let first = row.render().to_vec();
        row.update();
        assert_eq!(row.render(), &first[..]);
    }

    #[test]
    fn test_cx_to_rx() {
        let row = Row::new("ab\tc");
        assert_eq!(row.cx_to_rx(0), 0);
        assert_eq!(row.cx_to_rx(2), 2);
        assert_eq!(row.cx_to_rx(3), 8);
        assert_eq!(row.cx_to_rx(4), 9);
        // Past the end behaves like the end.
        assert_eq!(row.cx_to_rx(10), 9);
    }

    #[test]
    fn test_cx_to_rx_is_monotonic() {
        let row = Row::new("\ta\t\tbc\t d");
        let mut last = 0;
        for cx in 0..=row.len() {
            let rx = row.cx_to_rx(cx);
            assert!(rx >= last);
            last = rx;
        }
        assert_eq!(last, row.render().len());
    }

    #[test]
    fn test_tab_advances_to_next_stop() {
        for k in 0..20 {
            let row = Row::new([vec![b'x'; k], vec![b'\t']].concat());
            assert_eq!(row.cx_to_rx(k + 1), 8 * (k / 8 + 1));
        }
    }

    #[test]
    fn test_rx_to_cx() {
        let row = Row::new("ab\tc");
        assert_eq!(row.rx_to_cx(0), 0);
        assert_eq!(row.rx_to_cx(2), 2);
        assert_eq!(row.rx_to_cx(5), 2);
        assert_eq!(row.rx_to_cx(8), 3);
        assert_eq!(row.rx_to_cx(50), 4);
        for cx in 0..row.len() {
            assert_eq!(row.rx_to_cx(row.cx_to_rx(cx)), cx);
        }
    }

    #[test]
    fn test_insert_clamps_and_rerenders() {
        let mut row = Row::new("ac");
        row.insert(1, b'b');
        row.insert(99, b'\t');
        assert_eq!(row.chars(), b"abc\t");
        assert_eq!(row.render(), b"abc     ");
    }

    #[test]
    fn test_remove() {
        let mut row = Row::new("a\tb");
        assert_eq!(row.remove(1), Some(b'\t'));
        assert_eq!(row.render(), b"ab");
        assert_eq!(row.remove(5), None);
    }

    #[test]
    fn test_split_and_append() {
        let mut row = Row::new("hello\tworld");
        let tail = row.split_off(5);
        assert_eq!(row.chars(), b"hello");
        assert_eq!(tail.chars(), b"\tworld");
        assert_eq!(tail.render(), b"        world");

        row.append(tail.chars());
        assert_eq!(row.render(), b"hello   world");
    }

    #[test]
    fn test_render_slice() {
        let row = Row::new("0123456789");
        assert_eq!(row.render_slice(2, 3), b"234");
        assert_eq!(row.render_slice(8, 10), b"89");
        assert_eq!(row.render_slice(20, 10), b"");
    }

    #[test]
    fn test_find_in_render() {
        let row = Row::new("\tneedle");
        assert_eq!(row.find(b"needle"), Some(8));
        assert_eq!(row.find(b"hay"), None);
    }
}
