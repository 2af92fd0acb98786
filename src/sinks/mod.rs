//!
//! Seams through which the editor talks to its surroundings
//!
//! The editor core never draws, plays sounds or touches the file system itself.
//! It calls into a [`Renderer`] to produce the current visual state, notifies a [`Feedback`] about cue-worthy
//! events and hands exported images to an [`ExportTarget`](pixmap_file::ExportTarget).
//!

pub mod pixmap_file;
#[cfg(feature = "windowing")]
pub mod window;

use crate::mapping::ScreenRect;
use crate::pixmap::Color;
use crate::tools::Preview;

/// Playback rate of the cue played for every changed cell
pub const TICK_RATE: f32 = 2.5;
/// Volume of the cue played for every changed cell
pub const TICK_VOLUME: f32 = 0.3;
/// Volume of the cue played when a rectangle footprint changes
pub const DRAG_VOLUME: f32 = 0.5;

const MIN_FOOTPRINT_PITCH: f32 = 0.5;
const MAX_FOOTPRINT_PITCH: f32 = 2.0;

/// Hooks for cosmetic feedback (sounds, animations) about editing activity
///
/// All methods default to doing nothing so that implementors only need to handle what they care about.
pub trait Feedback {
    /// A single cell changed its color because of an incremental tool
    fn on_pixel_changed(&mut self) {}

    /// The footprint of an in-progress rectangle gesture changed to `width`x`height` cells
    fn on_drag_footprint_changed(&mut self, _width: usize, _height: usize) {}
}

/// A [`Feedback`] that ignores everything
#[derive(Debug, Default, Copy, Clone)]
pub struct NoFeedback;

impl Feedback for NoFeedback {}

/// A [`Feedback`] that only logs cues
#[derive(Debug, Copy, Clone)]
pub struct TracingFeedback {
    grid_cells: usize,
}

impl TracingFeedback {
    /// Create a logger for a grid with `grid_cells` cells in total
    pub fn new(grid_cells: usize) -> Self {
        Self { grid_cells }
    }
}

impl Feedback for TracingFeedback {
    fn on_pixel_changed(&mut self) {
        tracing::trace!(rate = TICK_RATE, volume = TICK_VOLUME, "tick");
    }

    fn on_drag_footprint_changed(&mut self, width: usize, height: usize) {
        let rate = footprint_pitch(width, height, self.grid_cells);
        tracing::trace!(width, height, rate, volume = DRAG_VOLUME, "footprint");
    }
}

/// Playback rate for the footprint cue of a `width`x`height` rectangle on a grid of `grid_cells` cells
///
/// The area is normalized on a log scale so that small rectangles are already clearly distinguishable.
pub fn footprint_pitch(width: usize, height: usize, grid_cells: usize) -> f32 {
    let norm = if grid_cells <= 1 {
        0.0
    } else {
        let area = (width * height).max(1) as f32;
        (area.ln() / (grid_cells as f32).ln()).clamp(0.0, 1.0)
    };
    MIN_FOOTPRINT_PITCH + (MAX_FOOTPRINT_PITCH - MIN_FOOTPRINT_PITCH) * norm
}

/// Something that can display the editor's visual state
pub trait Renderer {
    /// Draw one grid cell covering `rect` on screen
    fn render_cell(&mut self, x: usize, y: usize, color: Color, rect: ScreenRect);

    /// Draw the overlay of the current gesture or hover position
    fn render_preview(&mut self, _preview: &Preview) {}
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_footprint_pitch_range() {
        assert_eq!(footprint_pitch(1, 1, 256), MIN_FOOTPRINT_PITCH);
        assert_eq!(footprint_pitch(16, 16, 256), MAX_FOOTPRINT_PITCH);
        assert_eq!(footprint_pitch(1, 1, 1), MIN_FOOTPRINT_PITCH);
    }

    #[test]
    fn test_footprint_pitch_grows_with_area() {
        let small = footprint_pitch(2, 2, 256);
        let large = footprint_pitch(8, 8, 256);
        assert!(MIN_FOOTPRINT_PITCH < small && small < large && large < MAX_FOOTPRINT_PITCH);
        // 16 cells is the square root of 256 so it lands right in the middle
        assert!((footprint_pitch(4, 4, 256) - 1.25).abs() < 1e-5);
    }
}
