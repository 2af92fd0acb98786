//! An interactive editor window on X or Wayland

use crate::editor::Editor;
use crate::mapping::{CellMapper, ScreenRect};
use crate::pixmap::{Color, GRID_DIM};
use crate::sinks::pixmap_file::ExportTarget;
use crate::sinks::{Renderer, TracingFeedback};
use crate::texts::WINDOW_HELP;
use crate::tools::{PointerEvent, Preview, Tool};
use anyhow::anyhow;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

const GRID_LINE_COLOR: Color = Color::rgb(180, 180, 180);
const PREVIEW_OUTLINE_COLOR: Color = Color::rgb(255, 0, 0);
const PREVIEW_OUTLINE_WIDTH: f32 = 2.0;

/// Configuration of the editor window
#[derive(Debug, Clone)]
pub struct EditorWindowOptions {
    /// On-screen size of one cell in pixels
    pub cell_size: usize,
    /// Name under which the canvas is saved
    pub file_name: String,
    /// Where saved canvases go
    pub target: Arc<dyn ExportTarget + Send + Sync>,
}

/// Window contents as `0RGB` words
struct Frame {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Frame {
    fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    /// Integer pixel bounds of a screen rect, clipped to the frame
    fn bounds(&self, rect: ScreenRect) -> (usize, usize, usize, usize) {
        let clip = |v: f32, max: usize| (v.max(0.0) as usize).min(max);
        (
            clip(rect.x, self.width),
            clip(rect.y, self.height),
            clip(rect.x + rect.width, self.width),
            clip(rect.y + rect.height, self.height),
        )
    }

    fn blend_rect(&mut self, rect: ScreenRect, color: Color) {
        let (x0, y0, x1, y1) = self.bounds(rect);
        for y in y0..y1 {
            for px in &mut self.pixels[y * self.width + x0..y * self.width + x1] {
                let below = Color::rgb((*px >> 16) as u8, (*px >> 8) as u8, *px as u8);
                *px = color.blend_over(below);
            }
        }
    }

    fn outline_rect(&mut self, rect: ScreenRect, color: Color, thickness: f32) {
        let edges = [
            ScreenRect { height: thickness, ..rect },
            ScreenRect { width: thickness, ..rect },
            ScreenRect {
                y: rect.y + rect.height - thickness,
                height: thickness,
                ..rect
            },
            ScreenRect {
                x: rect.x + rect.width - thickness,
                width: thickness,
                ..rect
            },
        ];
        for edge in edges {
            self.blend_rect(edge, color);
        }
    }
}

impl Renderer for Frame {
    fn render_cell(&mut self, _x: usize, _y: usize, color: Color, rect: ScreenRect) {
        self.blend_rect(rect, Color::WHITE);
        self.blend_rect(rect, color);
        self.outline_rect(rect, GRID_LINE_COLOR, 1.0);
    }

    fn render_preview(&mut self, preview: &Preview) {
        match *preview {
            Preview::Rectangle { rect, .. } => {
                self.outline_rect(rect, PREVIEW_OUTLINE_COLOR, PREVIEW_OUTLINE_WIDTH)
            }
            Preview::Hover { color, rect, .. } => self.blend_rect(rect, color),
        }
    }
}

/// Open the editor window and run it until it is closed
///
/// This blocks the calling thread. It must be called from within a tokio runtime because saving happens in
/// background tasks.
pub fn run(editor: &mut Editor, options: EditorWindowOptions) -> anyhow::Result<()> {
    let side = GRID_DIM * options.cell_size;
    let mapper = CellMapper::new((0.0, 0.0), options.cell_size as f32, GRID_DIM)?;
    editor.tools_mut().set_mapper(mapper)?;

    let mut window = Window::new("pixelsketch", side, side, minifb::WindowOptions::default())
        .map_err(|e| anyhow!("Could not create window: {e}"))?;
    // Limit to max ~60 fps update rate
    #[allow(deprecated)]
    window.limit_update_rate(Some(Duration::from_micros(16600)));
    tracing::info!("{WINDOW_HELP}");

    let runtime = Handle::current();
    let mut feedback = TracingFeedback::new(GRID_DIM * GRID_DIM);
    let mut frame = Frame::new(side, side);
    let mut was_down = false;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        handle_keys(&window, editor, &options, &runtime);

        let down = window.get_mouse_down(MouseButton::Left);
        match window.get_mouse_pos(MouseMode::Pass) {
            Some((x, y)) => {
                let event = match (was_down, down) {
                    (false, true) => Some(PointerEvent::Down { x, y }),
                    (true, true) => Some(PointerEvent::Move { x, y }),
                    (true, false) => Some(PointerEvent::Up { x, y }),
                    (false, false) => None,
                };
                if let Some(event) = event {
                    editor.handle(event, &mut feedback);
                }
            }
            None if was_down && !down => editor.tools_mut().cancel_gesture(),
            None => {}
        }
        was_down = down;

        editor.tools().render(&mut frame, window.get_mouse_pos(MouseMode::Discard));
        window
            .update_with_buffer(&frame.pixels, side, side)
            .map_err(|e| anyhow!("Could not update window data: {e}"))?;
    }

    Ok(())
}

fn handle_keys(window: &Window, editor: &mut Editor, options: &EditorWindowOptions, runtime: &Handle) {
    let pressed = |key| window.is_key_pressed(key, KeyRepeat::No);
    if pressed(Key::P) {
        editor.tools_mut().set_tool(Tool::Pencil);
    }
    if pressed(Key::R) {
        editor.tools_mut().set_tool(Tool::Rectangle);
    }
    if pressed(Key::B) {
        editor.tools_mut().set_color(Color::BLACK);
    }
    if pressed(Key::W) {
        editor.tools_mut().set_color(Color::WHITE);
    }
    if pressed(Key::S) {
        match editor.export(&options.file_name) {
            Ok(image) => {
                let target = options.target.clone();
                runtime.spawn(async move {
                    if let Err(e) = target.save(&image).await {
                        tracing::error!("Could not save canvas: {e:#}");
                    }
                });
            }
            Err(e) => tracing::error!("{e}"),
        }
    }
}
