//!
//! Rasterization of the editor's drawing primitives onto a [`Pixmap`]
//!
//! Incremental primitives ([`set_pixel`], [`draw_line`]) report every changed cell to a [`Feedback`] while bulk
//! primitives ([`draw_rectangle`]) stay silent.
//!

use crate::pixmap::{Color, Pixmap};
use crate::sinks::Feedback;

/// Set a single cell and notify `feedback` if its color actually changed
pub fn set_pixel(pixmap: &mut Pixmap, x: usize, y: usize, color: Color, feedback: &mut dyn Feedback) -> bool {
    let changed = pixmap.set_pixel(x, y, color);
    if changed {
        feedback.on_pixel_changed();
    }
    changed
}

/// All cells of the 8-connected line from `from` to `to`, both endpoints included, ordered from `from` to `to`
///
/// The walk always starts at the endpoint that comes first in row-major order so that swapping the endpoints
/// yields the same cells.
pub fn line_cells(from: (usize, usize), to: (usize, usize)) -> Vec<(usize, usize)> {
    let reversed = (to.1, to.0) < (from.1, from.0);
    let (start, end) = if reversed { (to, from) } else { (from, to) };

    let (mut x0, mut y0) = (start.0 as i64, start.1 as i64);
    let (x1, y1) = (end.0 as i64, end.1 as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut cells = Vec::with_capacity(dx.max(-dy) as usize + 1);
    loop {
        cells.push((x0 as usize, y0 as usize));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }

    if reversed {
        cells.reverse();
    }
    cells
}

/// Draw a line between two cells using Bresenham's algorithm
///
/// Every cell is written via [`set_pixel`] so feedback fires once per changed cell.
/// Returns the number of changed cells.
pub fn draw_line(
    pixmap: &mut Pixmap,
    from: (usize, usize),
    to: (usize, usize),
    color: Color,
    feedback: &mut dyn Feedback,
) -> usize {
    line_cells(from, to)
        .into_iter()
        .filter(|&(x, y)| set_pixel(pixmap, x, y, color, feedback))
        .count()
}

/// Fill the inclusive bounding box of two corner cells in one bulk operation without any feedback
pub fn draw_rectangle(pixmap: &mut Pixmap, corner_a: (usize, usize), corner_b: (usize, usize), color: Color) {
    let (min_x, max_x) = (corner_a.0.min(corner_b.0), corner_a.0.max(corner_b.0));
    let (min_y, max_y) = (corner_a.1.min(corner_b.1), corner_a.1.max(corner_b.1));
    tracing::debug!("Filling rectangle {min_x},{min_y} to {max_x},{max_y} with {color}");
    pixmap.fill_rect(min_x, min_y, max_x, max_y, color);
}
