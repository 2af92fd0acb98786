//!
//! Data types for storing and interacting with the pixel grid
//!

mod color;
mod storage;

pub use color::Color;
pub use storage::{InvalidCoordinatesError, InvalidSizeError, Pixmap};

/// Width and height of the editable grid in cells
pub const GRID_DIM: usize = 16;

/// The color every cell of a fresh canvas starts out with
pub const BACKGROUND_COLOR: Color = Color::WHITE;
