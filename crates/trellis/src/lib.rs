//! Trellis - a retained-mode 2D widget toolkit.
//!
//! A UI is a tree of rectangular components owned by a [`ComponentTree`].
//! Panels hold children and delegate their geometry to a pluggable
//! [`LayoutManager`]; leaves carry a [`Widget`] that opts into drawing, mouse
//! and keyboard handling. The tree routes input by hit-testing, tracks
//! hover, press, focus and priority, and cycles focus through
//! [`TraversalGroup`]s. A [`Frame`] binds the tree to a window: it translates
//! winit events, switches between top-level panels and drives one update per
//! frame through a [`Renderer`](trellis_render::Renderer).
//!
//! Coordinates have a bottom-left origin. A child's location is relative to
//! its parent panel.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use trellis::prelude::*;
//! use trellis::widgets::{default_metrics, Button, Label};
//! use trellis_render::RecordingRenderer;
//!
//! let mut frame = Frame::new(FrameConfig::new("Hello").with_size(200, 100));
//! let label = frame.tree_mut().create_component(Label::new("Hello", default_metrics()));
//! let button = frame.tree_mut().create_component(Button::new("Quit", default_metrics()));
//! frame.add(BorderLayout::CENTER, label);
//! frame.add(BorderLayout::SOUTH, button);
//!
//! let mut renderer = RecordingRenderer::new();
//! frame.update(Duration::from_millis(16), &mut renderer).unwrap();
//! assert_eq!(renderer.texts(), vec!["Hello", "Quit"]);
//! ```

pub mod clipboard;
pub mod component;
pub mod config;
pub mod error;
pub mod events;
pub mod frame;
pub mod input;
pub mod layout;
pub mod prelude;
pub mod traversal;
mod tree;
pub mod widgets;

pub use component::{
    ComponentBase, ComponentId, ComponentKind, Drawable, KeyTarget, MouseTarget, Widget, WidgetContext,
};
pub use config::FrameConfig;
pub use error::{ClipboardError, ConfigError, ConfigResult, TreeError, TreeResult};
pub use events::{Key, KeyEvent, KeyboardModifiers, MouseButton, MouseEvent, MouseEventKind};
pub use frame::{Frame, FrameEvent};
pub use layout::{
    BorderLayout, FlowAlignment, FlowLayout, GridLayout, HorizontalAlignment, HorizontalLayout, LayoutChild,
    LayoutContainer, LayoutManager, VerticalAlignment, VerticalLayout,
};
pub use traversal::{TraversalAccess, TraversalConfig, TraversalGroup};
pub use tree::{BORDER_WIDTH, ComponentTree, DEFAULT_PANEL_SIZE};

/// Rendering collaborator types.
pub mod render {
    pub use trellis_render::*;
}
