//!
//! Conversion between continuous pointer positions and discrete grid cells
//!

use thiserror::Error;

/// An axis aligned rectangle in screen coordinates
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

/// An error which indicates that a cell mapper cannot be constructed from the given geometry
#[derive(Debug, Error, Copy, Clone, PartialEq)]
#[error("Cannot map pointers onto a {grid_dim}x{grid_dim} grid with cells of size {cell_size}: {details}")]
pub struct InvalidGeometryError {
    cell_size: f32,
    grid_dim: usize,
    details: &'static str,
}

impl InvalidGeometryError {
    pub(crate) fn new(cell_size: f32, grid_dim: usize, details: &'static str) -> Self {
        Self {
            cell_size,
            grid_dim,
            details,
        }
    }
}

/// Describes where a square grid is placed on screen
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellMapper {
    origin: (f32, f32),
    cell_size: f32,
    grid_dim: usize,
}

impl CellMapper {
    /// Create a mapper for a `grid_dim`x`grid_dim` grid whose top-left corner is at `origin`
    pub fn new(origin: (f32, f32), cell_size: f32, grid_dim: usize) -> Result<Self, InvalidGeometryError> {
        let error = |details| InvalidGeometryError::new(cell_size, grid_dim, details);
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(error("cell size must be a positive finite number"));
        }
        if !origin.0.is_finite() || !origin.1.is_finite() {
            return Err(error("origin must be finite"));
        }
        if grid_dim == 0 {
            return Err(error("grid must have at least one cell"));
        }
        Ok(Self {
            origin,
            cell_size,
            grid_dim,
        })
    }

    /// Number of cells along each axis
    pub fn grid_dim(&self) -> usize {
        self.grid_dim
    }

    /// On-screen size of one cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Unbounded (col, row) of a position, `None` for non-finite input
    fn raw_cell(&self, x: f32, y: f32) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let cell_size = f64::from(self.cell_size);
        let col = ((f64::from(x) - f64::from(self.origin.0)) / cell_size).floor();
        let row = ((f64::from(y) - f64::from(self.origin.1)) / cell_size).floor();
        Some((col, row))
    }

    /// Map a pointer position to the cell below it
    ///
    /// Returns `None` if the position is not finite or lies outside of the grid.
    pub fn pointer_to_cell(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let (col, row) = self.raw_cell(x, y)?;
        let dim = self.grid_dim as f64;
        if col < 0.0 || row < 0.0 || col >= dim || row >= dim {
            return None;
        }
        Some((col as usize, row as usize))
    }

    /// Map a pointer position to the nearest cell, clamping positions outside of the grid onto its edge
    ///
    /// Returns `None` only if the position is not finite.
    pub fn clamp_pointer_to_cell(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let (col, row) = self.raw_cell(x, y)?;
        let max = (self.grid_dim - 1) as f64;
        Some((col.clamp(0.0, max) as usize, row.clamp(0.0, max) as usize))
    }

    /// The screen area covered by cell `(x, y)`
    pub fn cell_rect(&self, x: usize, y: usize) -> ScreenRect {
        ScreenRect {
            x: self.origin.0 + x as f32 * self.cell_size,
            y: self.origin.1 + y as f32 * self.cell_size,
            width: self.cell_size,
            height: self.cell_size,
        }
    }

    /// The screen area covered by the inclusive cell box `min..=max`
    pub fn box_rect(&self, min: (usize, usize), max: (usize, usize)) -> ScreenRect {
        let top_left = self.cell_rect(min.0, min.1);
        ScreenRect {
            width: (max.0 + 1 - min.0) as f32 * self.cell_size,
            height: (max.1 + 1 - min.1) as f32 * self.cell_size,
            ..top_left
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mapper() -> CellMapper {
        CellMapper::new((10.0, 20.0), 4.0, 16).unwrap()
    }

    #[test]
    fn test_pointer_to_cell() {
        let m = mapper();
        assert_eq!(m.pointer_to_cell(10.0, 20.0), Some((0, 0)));
        assert_eq!(m.pointer_to_cell(13.99, 23.99), Some((0, 0)));
        assert_eq!(m.pointer_to_cell(14.0, 28.5), Some((1, 2)));
        assert_eq!(m.pointer_to_cell(73.9, 83.9), Some((15, 15)));
    }

    #[test]
    fn test_pointer_just_before_cell_edge() {
        // 3.3f32 lies just below 3 * 1.1f32, dividing in f32 would round up onto the edge
        let m = CellMapper::new((0.0, 0.0), 1.1, 16).unwrap();
        assert_eq!(m.pointer_to_cell(3.3, 0.0), Some((2, 0)));
        assert_eq!(m.clamp_pointer_to_cell(3.3, -5.0), Some((2, 0)));
    }

    #[test]
    fn test_pointer_outside_grid() {
        let m = mapper();
        assert_eq!(m.pointer_to_cell(9.9, 20.0), None);
        assert_eq!(m.pointer_to_cell(10.0, 19.9), None);
        assert_eq!(m.pointer_to_cell(74.0, 30.0), None);
        assert_eq!(m.pointer_to_cell(30.0, 84.0), None);
    }

    #[test]
    fn test_non_finite_pointer() {
        let m = mapper();
        assert_eq!(m.pointer_to_cell(f32::NAN, 30.0), None);
        assert_eq!(m.clamp_pointer_to_cell(30.0, f32::INFINITY), None);
    }

    #[test]
    fn test_clamp_pointer_to_cell() {
        let m = mapper();
        assert_eq!(m.clamp_pointer_to_cell(-100.0, 30.0), Some((0, 2)));
        assert_eq!(m.clamp_pointer_to_cell(1000.0, 1000.0), Some((15, 15)));
        assert_eq!(m.clamp_pointer_to_cell(15.0, 25.0), Some((1, 1)));
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(CellMapper::new((0.0, 0.0), 0.0, 16).is_err());
        assert!(CellMapper::new((0.0, 0.0), f32::NAN, 16).is_err());
        assert!(CellMapper::new((0.0, 0.0), 1.0, 0).is_err());
    }

    #[test]
    fn test_rects() {
        let m = mapper();
        assert_eq!(
            m.cell_rect(2, 1),
            ScreenRect {
                x: 18.0,
                y: 24.0,
                width: 4.0,
                height: 4.0
            }
        );
        assert_eq!(
            m.box_rect((1, 1), (2, 3)),
            ScreenRect {
                x: 14.0,
                y: 24.0,
                width: 8.0,
                height: 12.0
            }
        );
    }
}
