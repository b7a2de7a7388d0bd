//! View module: scrolling and frame composition.
//!
//! - [`Viewport`]: Visible window and the scroll rule
//! - [`StatusBar`] / [`StatusMessage`]: The two bottom lines
//! - [`Composer`]: Builds and writes one frame per refresh

mod compose;
mod status;
mod viewport;

pub use compose::{Composer, Frame};
pub use status::{truncate, StatusBar, StatusMessage, FILENAME_MAX, NO_NAME};
pub use viewport::Viewport;
