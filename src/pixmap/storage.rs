use crate::pixmap::{Color, BACKGROUND_COLOR};
use itertools::iproduct;
use thiserror::Error;

/// The pixel buffer of the editor
///
/// Cells are addressed as `(x, y)` which is `(col, row)` and are stored row-major.
/// Every cell always holds a color; a new pixmap is filled with [`BACKGROUND_COLOR`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Pixmap {
    data: Vec<Color>,
    width: usize,
    height: usize,
}

/// An error which indicates that invalid coordinates could not be accessed
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("Could not access invalid coordinates {}x{} on pixmap of size {}x{}", .target.0, .target.1, .pixmap_size.0, .pixmap_size.1)]
pub struct InvalidCoordinatesError {
    target: (usize, usize),
    pixmap_size: (usize, usize),
}

/// An error which indicates that a pixmap of a given size cannot be constructed
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("Given size {}x{} is not valid for constructing a pixmap: {details}", .size.0, .size.1)]
pub struct InvalidSizeError {
    size: (usize, usize),
    details: &'static str,
}

impl Pixmap {
    /// Create a new Pixmap with the specified dimensions, filled with the background color
    pub fn new(width: usize, height: usize) -> Result<Self, InvalidSizeError> {
        if width == 0 || height == 0 {
            return Err(InvalidSizeError {
                size: (width, height),
                details: "Width and Height must both be greater than 0",
            });
        }

        Ok(Self {
            data: vec![BACKGROUND_COLOR; width * height],
            width,
            height,
        })
    }

    /// Create a Pixmap from row-major color data
    pub fn from_raw(width: usize, height: usize, data: Vec<Color>) -> Result<Self, InvalidSizeError> {
        let mut pixmap = Self::new(width, height)?;
        if data.len() != width * height {
            return Err(InvalidSizeError {
                size: (width, height),
                details: "Color data does not contain exactly width * height entries",
            });
        }
        pixmap.data = data;
        Ok(pixmap)
    }

    /// Get the size of this pixmap as `(width, height)` tuple
    pub fn get_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Whether `(x, y)` addresses a cell of this pixmap
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        self.contains(x, y).then(|| y * self.width + x)
    }

    /// Get the color value of the pixel at position (x,y)
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Color, InvalidCoordinatesError> {
        match self.index(x, y) {
            None => Err(InvalidCoordinatesError {
                target: (x, y),
                pixmap_size: self.get_size(),
            }),
            Some(i) => Ok(self.data[i]),
        }
    }

    /// Set the pixel at position (x,y) to the specified color
    ///
    /// Returns whether the stored color actually changed.
    /// Writing the color a cell already has and writing outside the pixmap both leave it untouched and return `false`.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> bool {
        let Some(i) = self.index(x, y) else {
            tracing::trace!("Ignoring write to {x},{y} outside of {}x{}", self.width, self.height);
            return false;
        };
        if self.data[i] == color {
            return false;
        }
        self.data[i] = color;
        true
    }

    /// Overwrite every cell inside the inclusive box `(min_x, min_y)..=(max_x, max_y)`
    ///
    /// The box is clipped to the pixmap. Cells are written unconditionally.
    pub fn fill_rect(&mut self, min_x: usize, min_y: usize, max_x: usize, max_y: usize, color: Color) {
        if min_x >= self.width || min_y >= self.height {
            return;
        }
        let max_x = max_x.min(self.width - 1);
        let max_y = max_y.min(self.height - 1);
        for (y, x) in iproduct!(min_y..=max_y, min_x..=max_x) {
            self.data[y * self.width + x] = color;
        }
    }

    /// Replace the complete content of this pixmap with the one of `other`
    ///
    /// Both pixmaps must have the same size, otherwise nothing is changed.
    pub fn replace_all(&mut self, other: Pixmap) -> Result<(), InvalidSizeError> {
        if other.get_size() != self.get_size() {
            return Err(InvalidSizeError {
                size: other.get_size(),
                details: "Replacement must have the same size as the pixmap it replaces",
            });
        }
        *self = other;
        Ok(())
    }

    /// Get the row-major color data of the pixmap
    pub fn get_color_data(&self) -> &[Color] {
        &self.data
    }

    /// Iterate over all cells as `(x, y, color)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, color)| (i % self.width, i / self.width, *color))
    }
}
