//! A renderer that records draw calls instead of rasterizing them.
//!
//! Useful for headless runs and for asserting on what a component tree drew.

use crate::renderer::{RenderStateStack, Renderer};
use crate::types::{Color, Point, Rect, Size, Sprite};

/// One recorded primitive, in absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Frame cleared.
    Clear { color: Color, viewport: Size },
    /// Solid rectangle.
    FillRect {
        rect: Rect,
        color: Color,
        clip: Option<Rect>,
    },
    /// Rectangle outline.
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
        clip: Option<Rect>,
    },
    /// Textured quad.
    Sprite {
        sprite: Sprite,
        rect: Rect,
        tint: Color,
        clip: Option<Rect>,
    },
    /// Text run.
    Text {
        text: String,
        origin: Point,
        color: Color,
        clip: Option<Rect>,
    },
}

impl DrawCommand {
    /// The absolute rectangle a shape command covers (text has none).
    pub fn rect(&self) -> Option<Rect> {
        match self {
            DrawCommand::FillRect { rect, .. }
            | DrawCommand::StrokeRect { rect, .. }
            | DrawCommand::Sprite { rect, .. } => Some(*rect),
            DrawCommand::Clear { .. } | DrawCommand::Text { .. } => None,
        }
    }
}

/// Records every primitive that survives scissoring.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    state: RenderStateStack,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last [`Renderer::begin_frame`].
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text runs recorded this frame, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Discard recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Whether a shape at `rect` (local) would be visible through the scissor.
    fn visible(&self, rect: Rect) -> bool {
        match self.state.clip_bounds() {
            Some(clip) => clip.intersect(&self.state.to_absolute(rect)).is_some(),
            None => true,
        }
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size) {
        self.commands.clear();
        self.state.reset();
        self.commands.push(DrawCommand::Clear {
            color: clear_color,
            viewport: viewport_size,
        });
        tracing::trace!(target: "trellis_render", ?viewport_size, "begin frame");
    }

    fn end_frame(&mut self) {
        self.frames += 1;
        tracing::trace!(
            target: "trellis_render",
            commands = self.commands.len(),
            frame = self.frames,
            "end frame"
        );
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.state.translate(tx, ty);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip_rect(rect);
    }

    fn clip_bounds(&self) -> Option<Rect> {
        self.state.clip_bounds()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if self.visible(rect) {
            self.commands.push(DrawCommand::FillRect {
                rect: self.state.to_absolute(rect),
                color,
                clip: self.state.clip_bounds(),
            });
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        if self.visible(rect) {
            self.commands.push(DrawCommand::StrokeRect {
                rect: self.state.to_absolute(rect),
                color,
                width,
                clip: self.state.clip_bounds(),
            });
        }
    }

    fn draw_sprite(&mut self, sprite: &Sprite, rect: Rect, tint: Color) {
        if self.visible(rect) {
            self.commands.push(DrawCommand::Sprite {
                sprite: *sprite,
                rect: self.state.to_absolute(rect),
                tint,
                clip: self.state.clip_bounds(),
            });
        }
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color) {
        if self.is_clipped_out() {
            return;
        }
        let offset = self.state.current().offset;
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin: origin + offset,
            color,
            clip: self.state.clip_bounds(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_absolute_coordinates() {
        let mut renderer = RecordingRenderer::new();
        renderer.begin_frame(Color::WHITE, Size::new(100.0, 100.0));
        renderer.translate(10.0, 5.0);
        renderer.fill_rect(Rect::new(0.0, 0.0, 20.0, 20.0), Color::RED);
        renderer.draw_text("hi", Point::new(1.0, 1.0), Color::BLACK);
        renderer.end_frame();

        assert_eq!(renderer.commands().len(), 3);
        assert_eq!(
            renderer.commands()[1].rect(),
            Some(Rect::new(10.0, 5.0, 20.0, 20.0))
        );
        assert_eq!(renderer.texts(), vec!["hi"]);
        assert_eq!(renderer.frame_count(), 1);
    }

    #[test]
    fn test_scissored_shapes_are_dropped() {
        let mut renderer = RecordingRenderer::new();
        renderer.begin_frame(Color::WHITE, Size::new(100.0, 100.0));
        renderer.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        renderer.fill_rect(Rect::new(60.0, 60.0, 10.0, 10.0), Color::RED);
        renderer.fill_rect(Rect::new(40.0, 40.0, 20.0, 20.0), Color::BLUE);

        assert_eq!(renderer.commands().len(), 2);
        match &renderer.commands()[1] {
            DrawCommand::FillRect { color, clip, .. } => {
                assert_eq!(*color, Color::BLUE);
                assert_eq!(*clip, Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
