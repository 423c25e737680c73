//! Rendering collaborator interface for Trellis.
//!
//! Trellis components never talk to a graphics API directly. They draw through
//! the [`Renderer`] trait, which a backend implements. This crate provides:
//!
//! - Geometry and color types ([`Point`], [`Size`], [`Rect`], [`Color`],
//!   [`Sprite`])
//! - The [`Renderer`] trait and [`RenderStateStack`] for translation and
//!   scissor intersection
//! - [`RecordingRenderer`], a headless backend that records draw calls
//! - The [`TextMeasure`] collaborator used to size text-bearing widgets
//!
//! # Example
//!
//! ```
//! use trellis_render::{Color, RecordingRenderer, Rect, Renderer, Size};
//!
//! let mut renderer = RecordingRenderer::new();
//! renderer.begin_frame(Color::WHITE, Size::new(640.0, 480.0));
//! renderer.fill_rect(Rect::new(10.0, 10.0, 100.0, 50.0), Color::BLUE);
//! renderer.end_frame();
//!
//! assert_eq!(renderer.commands().len(), 2);
//! ```

mod recording;
mod renderer;
mod text;
mod types;

pub use recording::{DrawCommand, RecordingRenderer};
pub use renderer::{RenderState, RenderStateStack, Renderer};
pub use text::{FixedAdvanceMetrics, TextMeasure};
pub use types::{Color, Point, Rect, Size, Sprite, TextureId};
