//! Layout managers.
//!
//! A [`LayoutManager`] assigns each child of a panel its location and size.
//! The panel calls it from `validate()` with a [`LayoutContainer`]: the panel's
//! current size plus one [`LayoutChild`] per child. A child exposes its
//! preferred size, visibility and layout index, and accepts a placement. It
//! deliberately does not expose its current geometry, so layouts cannot feed
//! back on themselves and stay idempotent.
//!
//! All coordinates use a bottom-left origin.
//!
//! # Provided Layouts
//!
//! - [`BorderLayout`] - Compass regions selected by layout index
//! - [`FlowLayout`] - Rows of preferred-size children, wrapping
//! - [`GridLayout`] - Uniform cells
//! - [`VerticalLayout`] / [`HorizontalLayout`] - Single column or row

mod border;
mod flow;
mod grid;
mod stack;

pub use border::BorderLayout;
pub use flow::{FlowAlignment, FlowLayout};
pub use grid::GridLayout;
pub use stack::{HorizontalAlignment, HorizontalLayout, VerticalAlignment, VerticalLayout};

use trellis_render::{Point, Rect, Size};

use crate::component::{ComponentBase, ComponentId};

/// Strategy that computes child geometry for a panel.
///
/// Implementations must be idempotent and may only read the container size
/// and each child's preferred size, visibility and layout index.
///
/// # Panics
///
/// Implementations that give layout indices a meaning panic on indices they do
/// not recognize; the index is a static contract between the code adding a
/// child and the layout assigned to its panel.
pub trait LayoutManager: Send {
    /// Assign geometry to the children of `container`.
    fn layout_container(&self, container: &mut LayoutContainer<'_>);
}

// =========================================================================
// Layout input/output
// =========================================================================

/// One child as seen by a layout manager.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutChild {
    id: ComponentId,
    layout_index: i32,
    visible: bool,
    preferred_size: Size,
    placement: Option<Rect>,
}

impl LayoutChild {
    pub(crate) fn from_base(id: ComponentId, base: &ComponentBase) -> Self {
        Self {
            id,
            layout_index: base.layout_index,
            visible: base.visible,
            preferred_size: base.preferred_size,
            placement: None,
        }
    }

    /// Build a child directly; useful for exercising a layout in isolation.
    pub fn new(id: ComponentId, layout_index: i32, visible: bool, preferred_size: Size) -> Self {
        Self {
            id,
            layout_index,
            visible,
            preferred_size,
            placement: None,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn layout_index(&self) -> i32 {
        self.layout_index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn preferred_size(&self) -> Size {
        self.preferred_size
    }

    /// Assign this child's location and size.
    pub fn place(&mut self, location: Point, size: Size) {
        self.placement = Some(Rect::from_origin_size(location, size));
    }

    /// The geometry assigned during this pass, if any.
    pub fn placement(&self) -> Option<Rect> {
        self.placement
    }
}

/// The panel being laid out.
#[derive(Debug)]
pub struct LayoutContainer<'a> {
    size: Size,
    children: &'a mut [LayoutChild],
}

impl<'a> LayoutContainer<'a> {
    pub fn new(size: Size, children: &'a mut [LayoutChild]) -> Self {
        Self { size, children }
    }

    /// The panel's current size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of children, visible or not.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All children in insertion order.
    pub fn children(&self) -> &[LayoutChild] {
        self.children
    }

    /// All children in insertion order, for placement.
    pub fn children_mut(&mut self) -> &mut [LayoutChild] {
        self.children
    }

    /// Visible children in insertion order.
    pub fn visible_children(&self) -> impl Iterator<Item = &LayoutChild> + '_ {
        self.children.iter().filter(|child| child.visible)
    }

    /// Visible children in insertion order, for placement.
    pub fn visible_children_mut(&mut self) -> impl Iterator<Item = &mut LayoutChild> + '_ {
        self.children.iter_mut().filter(|child| child.visible)
    }
}
