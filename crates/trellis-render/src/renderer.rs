//! The rendering collaborator interface.
//!
//! Trellis does not rasterize anything itself. Components draw through a
//! [`Renderer`] that is passed explicitly into every draw call; a backend
//! (GPU, software, or the [`RecordingRenderer`](crate::RecordingRenderer) used
//! in tests) implements the primitives.
//!
//! Backends usually delegate their state handling to [`RenderStateStack`],
//! which tracks the current translation and the scissor rectangle.

use crate::types::{Color, Point, Rect, Size, Sprite};

/// Draw-primitive operations consumed by the component tree.
///
/// All drawing coordinates are relative to the current translation. Scissor
/// rectangles intersect with any scissor already in effect.
pub trait Renderer {
    /// Begin a new frame, clearing to `clear_color`.
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size);

    /// End the current frame and present it.
    fn end_frame(&mut self);

    // =========================================================================
    // State Management
    // =========================================================================

    /// Save the current render state (translation and scissor).
    fn save(&mut self);

    /// Restore the previously saved render state.
    fn restore(&mut self);

    /// Apply a translation to the current state.
    fn translate(&mut self, tx: f32, ty: f32);

    // =========================================================================
    // Clipping
    // =========================================================================

    /// Intersect the scissor rectangle with `rect` (in local coordinates).
    fn clip_rect(&mut self, rect: Rect);

    /// The current scissor rectangle in absolute coordinates, if any.
    fn clip_bounds(&self) -> Option<Rect>;

    /// Whether the scissor rectangle has collapsed to nothing.
    fn is_clipped_out(&self) -> bool {
        self.clip_bounds().is_some_and(|clip| clip.is_empty())
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw a textured quad stretched over `rect`.
    fn draw_sprite(&mut self, sprite: &Sprite, rect: Rect, tint: Color);

    /// Draw a single line of text with its baseline box starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color);
}

/// Render state captured by [`Renderer::save`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderState {
    /// Accumulated translation.
    pub offset: Point,
    /// Scissor rectangle in absolute coordinates. An empty rectangle means
    /// everything is clipped.
    pub clip: Option<Rect>,
}

/// Stack of render states for backends to build on.
#[derive(Debug, Clone, Default)]
pub struct RenderStateStack {
    stack: Vec<RenderState>,
    current: RenderState,
}

impl RenderStateStack {
    /// Create a new state stack with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state.
    #[inline]
    pub fn current(&self) -> &RenderState {
        &self.current
    }

    /// Save the current state.
    pub fn save(&mut self) {
        self.stack.push(self.current);
    }

    /// Restore the previously saved state.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.current = state;
        }
    }

    /// Reset to default state and clear the stack.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.current = RenderState::default();
    }

    /// Apply a translation.
    #[inline]
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.current.offset = self.current.offset + Point::new(tx, ty);
    }

    /// Map a local rectangle to absolute coordinates.
    #[inline]
    pub fn to_absolute(&self, rect: Rect) -> Rect {
        rect.offset(self.current.offset.x, self.current.offset.y)
    }

    /// Set a clip rect, intersecting with any existing clip.
    ///
    /// Disjoint rectangles collapse the clip to an empty rectangle rather than
    /// lifting it.
    pub fn clip_rect(&mut self, rect: Rect) {
        let absolute = self.to_absolute(rect);
        self.current.clip = Some(match self.current.clip {
            Some(existing) => existing
                .intersect(&absolute)
                .unwrap_or(Rect::from_origin_size(absolute.origin, Size::ZERO)),
            None => absolute,
        });
    }

    /// Get the current clip bounds.
    #[inline]
    pub fn clip_bounds(&self) -> Option<Rect> {
        self.current.clip
    }

    /// Get the stack depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_save_restore() {
        let mut stack = RenderStateStack::new();

        stack.translate(10.0, 20.0);
        stack.save();
        stack.translate(5.0, 5.0);
        assert_eq!(stack.current().offset, Point::new(15.0, 25.0));

        stack.restore();
        assert_eq!(stack.current().offset, Point::new(10.0, 20.0));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_clip_intersection() {
        let mut stack = RenderStateStack::new();

        stack.clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(stack.clip_bounds(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));

        stack.clip_rect(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(stack.clip_bounds(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn test_clip_uses_translation() {
        let mut stack = RenderStateStack::new();
        stack.clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        stack.translate(90.0, 0.0);
        stack.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(stack.clip_bounds(), Some(Rect::new(90.0, 0.0, 10.0, 50.0)));
    }

    #[test]
    fn test_disjoint_clip_collapses() {
        let mut stack = RenderStateStack::new();
        stack.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        stack.clip_rect(Rect::new(20.0, 20.0, 10.0, 10.0));
        assert!(stack.clip_bounds().is_some_and(|clip| clip.is_empty()));

        // A nested clip cannot widen an empty one again.
        stack.clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(stack.clip_bounds().is_some_and(|clip| clip.is_empty()));
    }
}
