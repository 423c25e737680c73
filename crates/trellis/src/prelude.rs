//! Commonly used types in one import:
//!
//! ```
//! use trellis::prelude::*;
//! ```

// ============================================================================
// Tree and components
// ============================================================================

pub use crate::component::{ComponentBase, ComponentId, Drawable, KeyTarget, MouseTarget, Widget, WidgetContext};
pub use crate::error::{TreeError, TreeResult};
pub use crate::tree::ComponentTree;

// ============================================================================
// Layout and traversal
// ============================================================================

pub use crate::layout::{BorderLayout, FlowLayout, GridLayout, HorizontalLayout, LayoutManager, VerticalLayout};
pub use crate::traversal::TraversalGroup;

// ============================================================================
// Frame and input
// ============================================================================

pub use crate::config::FrameConfig;
pub use crate::events::{Key, KeyEvent, MouseButton, MouseEvent};
pub use crate::frame::{Frame, FrameEvent};

// ============================================================================
// Geometry
// ============================================================================

pub use trellis_core::{Connection, Signal};
pub use trellis_render::{Color, Point, Rect, Size};
