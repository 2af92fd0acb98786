//!
//! The drawing tools and the gesture state machine driving them
//!
//! A [`ToolController`] consumes pointer events, maps them onto grid cells and rasterizes the current tool
//! into the pixmap of its [`EditorState`].
//!

use crate::mapping::{CellMapper, InvalidGeometryError, ScreenRect};
use crate::pixmap::{Color, InvalidSizeError, Pixmap, GRID_DIM};
use crate::raster;
use crate::sinks::{Feedback, Renderer};
use std::fmt::{Display, Formatter};

/// Alpha of the cell preview shown below an idle pointer
pub const HOVER_ALPHA: u8 = 150;

/// The available drawing tools
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Hash)]
pub enum Tool {
    /// Freehand drawing, cells are painted while the pointer moves
    #[default]
    Pencil,
    /// Axis aligned filled rectangles, committed when the pointer is released
    Rectangle,
}

impl Display for Tool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Tool::Pencil => f.write_str("pencil"),
            Tool::Rectangle => f.write_str("rectangle"),
        }
    }
}

/// Bookkeeping of an active gesture
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DragState {
    /// The tool that was selected when the gesture started
    pub tool: Tool,
    /// The cell on which the gesture started
    pub anchor: (usize, usize),
    /// The cell the gesture was most recently at
    pub last: (usize, usize),
}

/// Everything the editor knows about the current editing session
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EditorState {
    pixmap: Pixmap,
    tool: Tool,
    color: Color,
    drag: Option<DragState>,
}

impl EditorState {
    /// A blank `GRID_DIM`x`GRID_DIM` canvas with the pencil selected and black as drawing color
    pub fn new() -> Result<Self, InvalidSizeError> {
        Ok(Self::with_pixmap(Pixmap::new(GRID_DIM, GRID_DIM)?))
    }

    /// Start editing an existing pixmap
    pub fn with_pixmap(pixmap: Pixmap) -> Self {
        Self {
            pixmap,
            tool: Tool::default(),
            color: Color::BLACK,
            drag: None,
        }
    }

    /// The canvas
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// The currently selected tool
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// The currently selected drawing color
    pub fn color(&self) -> Color {
        self.color
    }

    /// The active gesture, if any
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }
}

/// Pointer input in screen coordinates
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    /// The primary button was pressed
    Down {
        /// horizontal position
        x: f32,
        /// vertical position
        y: f32,
    },
    /// The pointer moved while the primary button is held
    Move {
        /// horizontal position
        x: f32,
        /// vertical position
        y: f32,
    },
    /// The primary button was released
    Up {
        /// horizontal position
        x: f32,
        /// vertical position
        y: f32,
    },
}

/// An overlay that is drawn on top of the grid but is not part of the pixmap
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Preview {
    /// The box a rectangle gesture would fill if released now
    Rectangle {
        /// top-left cell
        min: (usize, usize),
        /// bottom-right cell
        max: (usize, usize),
        /// screen area covered by the box
        rect: ScreenRect,
    },
    /// The cell below an idle pointer in a translucent version of the drawing color
    Hover {
        /// hovered cell
        cell: (usize, usize),
        /// color to show
        color: Color,
        /// screen area of the cell
        rect: ScreenRect,
    },
}

/// The gesture state machine of the editor
///
/// It is either idle or tracks exactly one gesture from pointer-down to pointer-up.
#[derive(Debug, Clone)]
pub struct ToolController {
    state: EditorState,
    mapper: CellMapper,
    /// last footprint announced during the current rectangle gesture
    last_footprint: Option<(usize, usize)>,
}

impl ToolController {
    /// Create a controller that edits `state` which is shown on screen according to `mapper`
    pub fn new(state: EditorState, mapper: CellMapper) -> Result<Self, InvalidGeometryError> {
        Self::check_geometry(&state.pixmap, mapper)?;
        Ok(Self {
            state,
            mapper,
            last_footprint: None,
        })
    }

    fn check_geometry(pixmap: &Pixmap, mapper: CellMapper) -> Result<(), InvalidGeometryError> {
        let dim = mapper.grid_dim();
        if pixmap.get_size() != (dim, dim) {
            return Err(InvalidGeometryError::new(
                mapper.cell_size(),
                dim,
                "grid dimension does not match the pixmap",
            ));
        }
        Ok(())
    }

    /// The edited state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The canvas
    pub fn pixmap(&self) -> &Pixmap {
        &self.state.pixmap
    }

    /// Swap the whole canvas for one of the same size
    pub fn replace_pixmap(&mut self, pixmap: Pixmap) -> Result<(), InvalidSizeError> {
        self.state.pixmap.replace_all(pixmap)
    }

    /// The current screen placement of the grid
    pub fn mapper(&self) -> &CellMapper {
        &self.mapper
    }

    /// Move or rescale the grid on screen
    pub fn set_mapper(&mut self, mapper: CellMapper) -> Result<(), InvalidGeometryError> {
        Self::check_geometry(&self.state.pixmap, mapper)?;
        self.mapper = mapper;
        Ok(())
    }

    /// Select the tool used by the next gesture
    pub fn set_tool(&mut self, tool: Tool) {
        tracing::debug!("Selected tool {tool}");
        self.state.tool = tool;
    }

    /// Select the drawing color
    pub fn set_color(&mut self, color: Color) {
        tracing::debug!("Selected color {color}");
        self.state.color = color;
    }

    /// Feed a pointer event into the state machine
    pub fn handle(&mut self, event: PointerEvent, feedback: &mut dyn Feedback) {
        match event {
            PointerEvent::Down { x, y } => self.pointer_down(x, y, feedback),
            PointerEvent::Move { x, y } => self.pointer_move(x, y, feedback),
            PointerEvent::Up { x, y } => self.pointer_up(x, y),
        }
    }

    /// The pointer was pressed at a screen position; positions outside of the grid are ignored
    pub fn pointer_down(&mut self, x: f32, y: f32, feedback: &mut dyn Feedback) {
        match self.mapper.pointer_to_cell(x, y) {
            Some(cell) => self.press(cell, feedback),
            None => tracing::trace!("Ignoring press at {x},{y} outside of the grid"),
        }
    }

    /// The pointer moved to a screen position; positions outside of the grid are ignored
    pub fn pointer_move(&mut self, x: f32, y: f32, feedback: &mut dyn Feedback) {
        if let Some(cell) = self.mapper.pointer_to_cell(x, y) {
            self.drag_to(cell, feedback);
        }
    }

    /// The pointer was released at a screen position
    ///
    /// Positions outside of the grid are clamped onto the nearest cell so that a gesture always resolves.
    /// Non-finite positions are ignored.
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        match self.mapper.clamp_pointer_to_cell(x, y) {
            Some(cell) => self.release_at(cell),
            None => tracing::debug!("Ignoring release at non-finite position {x},{y}"),
        }
    }

    /// Start a gesture on `cell`
    pub fn press(&mut self, cell: (usize, usize), feedback: &mut dyn Feedback) {
        if let Some(drag) = &self.state.drag {
            tracing::trace!("Ignoring press while a {} gesture is active", drag.tool);
            return;
        }
        if !self.state.pixmap.contains(cell.0, cell.1) {
            return;
        }

        let tool = self.state.tool;
        tracing::trace!("Starting {tool} gesture at {},{}", cell.0, cell.1);
        if tool == Tool::Pencil {
            raster::set_pixel(&mut self.state.pixmap, cell.0, cell.1, self.state.color, feedback);
        }
        self.state.drag = Some(DragState {
            tool,
            anchor: cell,
            last: cell,
        });
    }

    /// Continue the active gesture at `cell`
    pub fn drag_to(&mut self, cell: (usize, usize), feedback: &mut dyn Feedback) {
        let Some(drag) = self.state.drag.as_mut() else {
            return;
        };
        if !self.state.pixmap.contains(cell.0, cell.1) {
            return;
        }

        match drag.tool {
            Tool::Pencil => {
                if cell != drag.last {
                    raster::draw_line(&mut self.state.pixmap, drag.last, cell, self.state.color, feedback);
                    drag.last = cell;
                }
            }
            Tool::Rectangle => {
                drag.last = cell;
                let footprint = (cell.0.abs_diff(drag.anchor.0) + 1, cell.1.abs_diff(drag.anchor.1) + 1);
                if self.last_footprint != Some(footprint) {
                    self.last_footprint = Some(footprint);
                    feedback.on_drag_footprint_changed(footprint.0, footprint.1);
                }
            }
        }
    }

    /// Finish the active gesture at `cell`, committing a rectangle if one was being drawn
    pub fn release_at(&mut self, cell: (usize, usize)) {
        let Some(drag) = self.state.drag.take() else {
            return;
        };
        self.last_footprint = None;

        if drag.tool == Tool::Rectangle {
            let (width, height) = self.state.pixmap.get_size();
            let cell = (cell.0.min(width - 1), cell.1.min(height - 1));
            raster::draw_rectangle(&mut self.state.pixmap, drag.anchor, cell, self.state.color);
        }
        tracing::trace!("Finished {} gesture at {},{}", drag.tool, cell.0, cell.1);
    }

    /// Drop the active gesture without committing anything
    pub fn cancel_gesture(&mut self) {
        if self.state.drag.take().is_some() {
            tracing::debug!("Cancelled active gesture");
        }
        self.last_footprint = None;
    }

    /// The overlay to show for the active gesture or, when idle, for the pointer hovering at `hover`
    pub fn preview(&self, hover: Option<(f32, f32)>) -> Option<Preview> {
        match &self.state.drag {
            Some(drag) if drag.tool == Tool::Rectangle => {
                let min = (drag.anchor.0.min(drag.last.0), drag.anchor.1.min(drag.last.1));
                let max = (drag.anchor.0.max(drag.last.0), drag.anchor.1.max(drag.last.1));
                Some(Preview::Rectangle {
                    min,
                    max,
                    rect: self.mapper.box_rect(min, max),
                })
            }
            Some(_) => None,
            None => {
                let (x, y) = hover?;
                let cell = self.mapper.pointer_to_cell(x, y)?;
                Some(Preview::Hover {
                    cell,
                    color: self.state.color.with_alpha(HOVER_ALPHA),
                    rect: self.mapper.cell_rect(cell.0, cell.1),
                })
            }
        }
    }

    /// Produce the current visual state: every cell once, then the preview overlay
    pub fn render(&self, renderer: &mut dyn Renderer, hover: Option<(f32, f32)>) {
        for (x, y, color) in self.state.pixmap.cells() {
            renderer.render_cell(x, y, color, self.mapper.cell_rect(x, y));
        }
        if let Some(preview) = self.preview(hover) {
            renderer.render_preview(&preview);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::raster::test::CueCounter;
    use crate::sinks::NoFeedback;

    /// A controller whose cells are 10x10 screen units large with the grid at the screen origin
    fn controller(tool: Tool) -> ToolController {
        let mapper = CellMapper::new((0.0, 0.0), 10.0, GRID_DIM).unwrap();
        let mut controller = ToolController::new(EditorState::new().unwrap(), mapper).unwrap();
        controller.set_tool(tool);
        controller
    }

    /// Screen position in the middle of a cell
    fn at(x: usize, y: usize) -> (f32, f32) {
        (x as f32 * 10.0 + 5.0, y as f32 * 10.0 + 5.0)
    }

    fn black_cells(controller: &ToolController) -> Vec<(usize, usize)> {
        controller
            .pixmap()
            .cells()
            .filter(|(_, _, c)| *c == Color::BLACK)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_pencil_gesture() {
        let mut controller = controller(Tool::Pencil);
        let mut cues = CueCounter::default();

        let (x, y) = at(0, 0);
        controller.handle(PointerEvent::Down { x, y }, &mut cues);
        assert_eq!(black_cells(&controller), vec![(0, 0)]);
        assert_eq!(cues.ticks, 1);

        let (x, y) = at(3, 0);
        controller.handle(PointerEvent::Move { x, y }, &mut cues);
        assert_eq!(black_cells(&controller), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(cues.ticks, 4);

        let before = controller.pixmap().clone();
        controller.handle(PointerEvent::Up { x, y }, &mut cues);
        assert!(controller.state().drag().is_none());
        assert_eq!(controller.pixmap(), &before);
        assert_eq!(cues.ticks, 4);
    }

    #[test]
    fn test_pencil_same_cell_move_does_nothing() {
        let mut controller = controller(Tool::Pencil);
        let mut cues = CueCounter::default();
        controller.press((4, 4), &mut cues);
        controller.drag_to((4, 4), &mut cues);
        assert_eq!(cues.ticks, 1);
        assert_eq!(controller.state().drag().unwrap().last, (4, 4));
    }

    #[test]
    fn test_rectangle_gesture() {
        let mut controller = controller(Tool::Rectangle);
        let mut cues = CueCounter::default();

        let (x, y) = at(2, 2);
        controller.pointer_down(x, y, &mut cues);
        assert!(black_cells(&controller).is_empty());

        let (x, y) = at(5, 5);
        controller.pointer_move(x, y, &mut cues);
        assert!(black_cells(&controller).is_empty());

        controller.pointer_up(x, y);
        let cells = black_cells(&controller);
        assert_eq!(cells.len(), 16);
        assert!(cells.iter().all(|&(x, y)| (2..=5).contains(&x) && (2..=5).contains(&y)));
        assert_eq!(cues.ticks, 0);
        assert!(controller.state().drag().is_none());
    }

    #[test]
    fn test_rectangle_footprint_cues_are_deduplicated() {
        let mut controller = controller(Tool::Rectangle);
        let mut cues = CueCounter::default();
        controller.press((2, 2), &mut cues);
        controller.drag_to((4, 3), &mut cues);
        controller.drag_to((0, 3), &mut cues);
        controller.drag_to((0, 1), &mut cues);
        controller.drag_to((5, 5), &mut cues);
        assert_eq!(cues.footprints, vec![(3, 2), (4, 4)]);

        controller.release_at((5, 5));
        controller.press((2, 2), &mut cues);
        controller.drag_to((4, 3), &mut cues);
        assert_eq!(cues.footprints, vec![(3, 2), (4, 4), (3, 2)]);
    }

    #[test]
    fn test_rectangle_release_outside_is_clamped() {
        let mut controller = controller(Tool::Rectangle);
        controller.press((13, 14), &mut NoFeedback);
        controller.pointer_up(1000.0, -50.0);
        let cells = black_cells(&controller);
        assert_eq!(cells.len(), 3 * 15);
        assert!(cells.contains(&(15, 0)));
        assert!(cells.contains(&(13, 14)));
    }

    #[test]
    fn test_events_outside_grid_while_idle_are_ignored() {
        let mut controller = controller(Tool::Pencil);
        let before = controller.state().clone();
        controller.pointer_down(-1.0, 5.0, &mut NoFeedback);
        controller.pointer_move(5.0, 5.0, &mut NoFeedback);
        controller.pointer_up(5.0, 5.0);
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_moves_outside_grid_are_ignored_while_dragging() {
        let mut controller = controller(Tool::Pencil);
        controller.press((1, 1), &mut NoFeedback);
        controller.pointer_move(500.0, 5.0, &mut NoFeedback);
        assert_eq!(controller.state().drag().unwrap().last, (1, 1));
        assert_eq!(black_cells(&controller), vec![(1, 1)]);
    }

    #[test]
    fn test_non_finite_events_are_ignored() {
        let mut controller = controller(Tool::Rectangle);
        controller.pointer_down(f32::NAN, 5.0, &mut NoFeedback);
        assert!(controller.state().drag().is_none());

        controller.press((1, 1), &mut NoFeedback);
        controller.pointer_up(f32::INFINITY, 5.0);
        assert!(controller.state().drag().is_some());
        assert!(black_cells(&controller).is_empty());
    }

    #[test]
    fn test_press_while_dragging_is_ignored() {
        let mut controller = controller(Tool::Rectangle);
        controller.press((1, 1), &mut NoFeedback);
        controller.press((7, 7), &mut NoFeedback);
        assert_eq!(controller.state().drag().unwrap().anchor, (1, 1));
    }

    #[test]
    fn test_tool_switch_applies_to_next_gesture() {
        let mut controller = controller(Tool::Rectangle);
        controller.press((1, 1), &mut NoFeedback);
        controller.set_tool(Tool::Pencil);
        controller.drag_to((2, 2), &mut NoFeedback);
        assert!(black_cells(&controller).is_empty());
        controller.release_at((2, 2));
        assert_eq!(black_cells(&controller).len(), 4);
    }

    #[test]
    fn test_cancel_gesture() {
        let mut controller = controller(Tool::Rectangle);
        controller.press((1, 1), &mut NoFeedback);
        controller.cancel_gesture();
        controller.release_at((3, 3));
        assert!(black_cells(&controller).is_empty());
    }

    #[test]
    fn test_preview() {
        let mut controller = controller(Tool::Rectangle);
        assert_eq!(controller.preview(None), None);
        assert_eq!(controller.preview(Some((-3.0, 2.0))), None);
        assert_eq!(
            controller.preview(Some(at(1, 2))),
            Some(Preview::Hover {
                cell: (1, 2),
                color: Color::BLACK.with_alpha(HOVER_ALPHA),
                rect: controller.mapper().cell_rect(1, 2),
            })
        );

        controller.press((4, 1), &mut NoFeedback);
        controller.drag_to((2, 3), &mut NoFeedback);
        let Some(Preview::Rectangle { min, max, .. }) = controller.preview(Some(at(9, 9))) else {
            panic!("expected a rectangle preview");
        };
        assert_eq!((min, max), ((2, 1), (4, 3)));
    }

    #[test]
    fn test_render_visits_every_cell_once() {
        #[derive(Default)]
        struct Collect {
            cells: Vec<(usize, usize)>,
            previews: usize,
        }
        impl Renderer for Collect {
            fn render_cell(&mut self, x: usize, y: usize, _color: Color, _rect: ScreenRect) {
                self.cells.push((x, y));
            }
            fn render_preview(&mut self, _preview: &Preview) {
                self.previews += 1;
            }
        }

        let controller = controller(Tool::Pencil);
        let mut renderer = Collect::default();
        controller.render(&mut renderer, Some(at(0, 0)));
        assert_eq!(renderer.cells.len(), GRID_DIM * GRID_DIM);
        assert_eq!(renderer.previews, 1);
    }

    #[test]
    fn test_mismatched_geometry() {
        let mapper = CellMapper::new((0.0, 0.0), 10.0, 8).unwrap();
        assert!(ToolController::new(EditorState::new().unwrap(), mapper).is_err());
    }
}
