//! Buffer module: the text model.
//!
//! This module contains:
//! - [`Row`]: One line with its tab-expanded rendering
//! - [`RowBuffer`]: Ordered rows, edit operations and the dirty counter

mod row;
mod rows;

pub use row::{Row, TAB_STOP};
pub use rows::{Position, RowBuffer, SearchDirection};
