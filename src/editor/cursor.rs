//! Cursor position and movement rules.

use crate::buffer::{Position, RowBuffer};

/// The cursor in both `chars` and `render` coordinates.
///
/// `cy` may equal the row count (the implicit empty row past the end), in
/// which case `cx` is 0. Otherwise `cx` is at most the row length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Byte column in the row's `chars`.
    pub cx: usize,
    /// Row index.
    pub cy: usize,
    /// Render column derived from `cx`.
    pub rx: usize,
}

/// A single cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// One byte left, wrapping to the end of the previous row.
    Left,
    /// One byte right, wrapping to the start of the next row.
    Right,
    /// One row up.
    Up,
    /// One row down, as far as the implicit row past the end.
    Down,
    /// Start of the row.
    Home,
    /// End of the row.
    End,
}

impl Cursor {
    /// The cursor as a buffer position.
    pub const fn position(&self) -> Position {
        Position::new(self.cy, self.cx)
    }

    /// Move to `pos`, leaving `rx` for [`Cursor::update_rx`].
    pub const fn set_position(&mut self, pos: Position) {
        self.cy = pos.row;
        self.cx = pos.col;
    }

    /// Apply one movement, then snap `cx` into the new row.
    pub fn apply(&mut self, movement: Movement, rows: &RowBuffer) {
        let numrows = rows.len();
        match movement {
            Movement::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = rows.row_len(self.cy);
                }
            }
            Movement::Right => {
                if self.cy < numrows {
                    if self.cx < rows.row_len(self.cy) {
                        self.cx += 1;
                    } else {
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Movement::Up => self.cy = self.cy.saturating_sub(1),
            Movement::Down => {
                if self.cy < numrows {
                    self.cy += 1;
                }
            }
            Movement::Home => self.cx = 0,
            Movement::End => self.cx = rows.row_len(self.cy),
        }
        self.clamp(rows);
    }

    /// Pull the cursor back inside the buffer.
    pub fn clamp(&mut self, rows: &RowBuffer) {
        self.cy = self.cy.min(rows.len());
        self.cx = self.cx.min(rows.row_len(self.cy));
    }

    /// Recompute `rx` from `cx` for the current row.
    pub fn update_rx(&mut self, rows: &RowBuffer) {
        self.rx = rows.row(self.cy).map_or(0, |row| row.cx_to_rx(self.cx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> RowBuffer {
        RowBuffer::from_lines(["hello", "", "ab\tc"])
    }

    fn at(cy: usize, cx: usize) -> Cursor {
        Cursor { cx, cy, rx: 0 }
    }

    #[test]
    fn test_left_wraps_to_previous_row_end() {
        let rows = rows();
        let mut cursor = at(2, 0);
        cursor.apply(Movement::Left, &rows);
        assert_eq!(cursor.position(), Position::new(1, 0));
        cursor.apply(Movement::Left, &rows);
        assert_eq!(cursor.position(), Position::new(0, 5));
    }

    #[test]
    fn test_left_stops_at_origin() {
        let mut cursor = at(0, 0);
        cursor.apply(Movement::Left, &rows());
        assert_eq!(cursor.position(), Position::new(0, 0));
    }

    #[test]
    fn test_right_wraps_to_next_row_start() {
        let rows = rows();
        let mut cursor = at(0, 5);
        cursor.apply(Movement::Right, &rows);
        assert_eq!(cursor.position(), Position::new(1, 0));
    }

    #[test]
    fn test_right_stops_on_implicit_row() {
        let rows = rows();
        let mut cursor = at(2, 4);
        cursor.apply(Movement::Right, &rows);
        assert_eq!(cursor.position(), Position::new(3, 0));
        cursor.apply(Movement::Right, &rows);
        assert_eq!(cursor.position(), Position::new(3, 0));
    }

    #[test]
    fn test_vertical_moves_snap_column() {
        let rows = rows();
        let mut cursor = at(0, 5);
        cursor.apply(Movement::Down, &rows);
        assert_eq!(cursor.position(), Position::new(1, 0));
        cursor.apply(Movement::Down, &rows);
        cursor.apply(Movement::Down, &rows);
        cursor.apply(Movement::Down, &rows);
        assert_eq!(cursor.position(), Position::new(3, 0));
        cursor.apply(Movement::Up, &rows);
        assert_eq!(cursor.position(), Position::new(2, 0));
    }

    #[test]
    fn test_home_and_end() {
        let rows = rows();
        let mut cursor = at(2, 1);
        cursor.apply(Movement::End, &rows);
        assert_eq!(cursor.cx, 4);
        cursor.apply(Movement::Home, &rows);
        assert_eq!(cursor.cx, 0);

        let mut past_end = at(3, 0);
        past_end.apply(Movement::End, &rows);
        assert_eq!(past_end.cx, 0);
    }

    #[test]
    fn test_update_rx_follows_tabs() {
        let rows = rows();
        let mut cursor = at(2, 3);
        cursor.update_rx(&rows);
        assert_eq!(cursor.rx, 8);
        cursor.cx = 4;
        cursor.update_rx(&rows);
        assert_eq!(cursor.rx, 9);
        let mut past_end = at(3, 0);
        past_end.update_rx(&rows);
        assert_eq!(past_end.rx, 0);
    }

    #[test]
    fn test_invariants_hold_for_any_walk() {
        let rows = rows();
        let moves = [
            Movement::Down,
            Movement::End,
            Movement::Right,
            Movement::Right,
            Movement::Down,
            Movement::Down,
            Movement::Down,
            Movement::Left,
            Movement::Up,
            Movement::End,
            Movement::Up,
            Movement::Left,
            Movement::Left,
        ];
        let mut cursor = Cursor::default();
        for m in moves.iter().cycle().take(200) {
            cursor.apply(*m, &rows);
            assert!(cursor.cy <= rows.len());
            assert!(cursor.cx <= rows.row_len(cursor.cy));
        }
    }
}
