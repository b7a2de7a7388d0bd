//! Row Buffer: the ordered rows of the open file and its edit operations.
//!
//! Edit operations take the position they act at and return where the
//! cursor should go next, leaving cursor bookkeeping to the caller.

use super::row::Row;

/// A (row, column) location in `chars` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Row index. May equal the row count (the implicit row past the end).
    pub row: usize,
    /// Byte index into the row's `chars`.
    pub col: usize,
}

impl Position {
    /// Create a position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Direction of a search through the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Towards the end of the file.
    Forward,
    /// Towards the start of the file.
    Backward,
}

/// The in-memory file as a list of rows.
#[derive(Debug, Clone, Default)]
pub struct RowBuffer {
    rows: Vec<Row>,
    /// Mutations since the last load or save.
    dirty: usize,
}

impl RowBuffer {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
        }
    }

    /// Build a buffer from file bytes.
    ///
    /// Lines are split on `\n` and stripped of trailing `\r`/`\n`. A final
    /// line without a terminator is kept; empty input yields no rows.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let rows = bytes
            .split_inclusive(|&b| b == b'\n')
            .map(|line| {
                let end = line
                    .iter()
                    .rposition(|&b| b != b'\n' && b != b'\r')
                    .map_or(0, |i| i + 1);
                Row::new(&line[..end])
            })
            .collect();
        Self { rows, dirty: 0 }
    }

    /// Build a buffer from already-split lines.
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        Self {
            rows: lines.into_iter().map(Row::new).collect(),
            dirty: 0,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the buffer has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by index.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Length of the row at `index`, or 0 for the implicit row past the end.
    #[inline]
    pub fn row_len(&self, index: usize) -> usize {
        self.rows.get(index).map_or(0, Row::len)
    }

    /// Iterate over all rows.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// The dirty counter.
    #[inline]
    pub const fn dirty(&self) -> usize {
        self.dirty
    }

    /// Whether there are unsaved mutations.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Reset the dirty counter after a successful save.
    #[inline]
    pub const fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    /// Insert a row before `at`. Ignored when `at` is past the end.
    pub fn insert_row(&mut self, at: usize, text: impl Into<Vec<u8>>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(text));
        self.dirty += 1;
    }

    /// Remove the row at `at`, if there is one.
    pub fn delete_row(&mut self, at: usize) -> Option<Row> {
        if at >= self.rows.len() {
            return None;
        }
        self.dirty += 1;
        Some(self.rows.remove(at))
    }

    /// Insert `byte` at `at`, returning the position just after it.
    ///
    /// Typing on the implicit row past the end first appends an empty row.
    pub fn insert_char(&mut self, at: Position, byte: u8) -> Position {
        if at.row > self.rows.len() {
            return at;
        }
        if at.row == self.rows.len() {
            self.rows.push(Row::default());
        }
        let row = &mut self.rows[at.row];
        let col = at.col.min(row.len());
        row.insert(col, byte);
        self.dirty += 1;
        Position::new(at.row, col + 1)
    }

    /// Split the row at `at`, returning the start of the new line.
    ///
    /// At column 0 an empty row is inserted above instead.
    pub fn insert_newline(&mut self, at: Position) -> Position {
        if at.row >= self.rows.len() {
            self.insert_row(self.rows.len().min(at.row), Vec::new());
            return Position::new(at.row + 1, 0);
        }
        if at.col == 0 {
            self.insert_row(at.row, Vec::new());
        } else {
            let tail = self.rows[at.row].split_off(at.col);
            self.rows.insert(at.row + 1, tail);
            self.dirty += 1;
        }
        Position::new(at.row + 1, 0)
    }

    /// Delete the byte left of `at` (Backspace), returning the new position.
    ///
    /// At column 0 the row is joined onto the previous one. Nothing happens at
    /// the very start of the buffer or on the implicit row past the end.
    pub fn delete_char(&mut self, at: Position) -> Position {
        if at.row >= self.rows.len() || (at.row == 0 && at.col == 0) {
            return at;
        }
        if at.col > 0 {
            let row = &mut self.rows[at.row];
            let col = at.col.min(row.len());
            if col == 0 {
                return Position::new(at.row, 0);
            }
            row.remove(col - 1);
            self.dirty += 1;
            return Position::new(at.row, col - 1);
        }

        let Some(removed) = self.delete_row(at.row) else {
            return at;
        };
        let prev = &mut self.rows[at.row - 1];
        let join_at = prev.len();
        prev.append(removed.chars());
        Position::new(at.row - 1, join_at)
    }

    /// Serialize every row followed by a `\n`.
    pub fn rows_to_text(&self) -> Vec<u8> {
        let total = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut text = Vec::with_capacity(total);
        for row in &self.rows {
            text.extend_from_slice(row.chars());
            text.push(b'\n');
        }
        text
    }

    /// Find `query` in the rendered rows, starting next to row `from`.
    ///
    /// With `from == None` the search starts at the first row (forward) or
    /// last row (backward). Wraps around and visits every row once. Returns
    /// the row index and the match's render column.
    pub fn find(
        &self,
        query: &[u8],
        from: Option<usize>,
        direction: SearchDirection,
    ) -> Option<(usize, usize)> {
        let n = self.rows.len();
        if n == 0 {
            return None;
        }
        let mut current = from;
        for _ in 0..n {
            let next = match (current, direction) {
                (None, SearchDirection::Forward) => 0,
                (None, SearchDirection::Backward) => n - 1,
                (Some(i), SearchDirection::Forward) => (i + 1) % n,
                (Some(i), SearchDirection::Backward) => (i + n - 1) % n,
            };
            current = Some(next);
            if let Some(rx) = self.rows[next].find(query) {
                return Some((next, rx));
            }
        }
        None
    }
}
