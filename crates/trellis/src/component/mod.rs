//! Component records and their capabilities.
//!
//! A component is a rectangular UI element stored in the
//! [`ComponentTree`](crate::ComponentTree). Its shared state lives in
//! [`ComponentBase`]; behavior specific to a widget is supplied through the
//! capability traits in [`capability`].
//!
//! # Related
//!
//! - [`crate::ComponentTree`] - Owns components and performs every mutation
//! - [`Widget`] - Optional behavior attached to a leaf component

pub mod capability;

pub use capability::{Drawable, KeyTarget, MouseTarget, Widget, WidgetContext};

use slotmap::new_key_type;
use trellis_core::{Connection, Signal};
use trellis_render::{Color, Point, Rect, Size, Sprite};

use crate::events::{KeyEvent, MouseEvent};

new_key_type! {
    /// Handle to a component in a [`ComponentTree`](crate::ComponentTree).
    ///
    /// Ids are non-owning: the panel a component was added to owns it, and
    /// an id becomes stale once the component is destroyed.
    pub struct ComponentId;
}

/// Structural kind of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// A leaf component, optionally carrying a widget.
    Leaf,
    /// A container with children, a layout manager and a traversal group.
    Panel,
}

/// The listener lists of a component, one per event category.
///
/// Every list is a [`Signal`] so listeners are invoked in registration order.
#[derive(Debug, Default)]
pub struct Listeners {
    pub(crate) mouse: Signal<(ComponentId, MouseEvent)>,
    pub(crate) keyboard: Signal<(ComponentId, KeyEvent)>,
    pub(crate) focus: Signal<(ComponentId, bool)>,
    pub(crate) action: Signal<ComponentId>,
    pub(crate) panel_change: Signal<(ComponentId, bool)>,
}

/// State shared by every component.
///
/// Read access is public; mutation goes through the tree so that re-layout
/// and focus rules are applied.
#[derive(Debug)]
pub struct ComponentBase {
    pub(crate) name: Option<String>,
    pub(crate) location: Point,
    pub(crate) size: Size,
    pub(crate) preferred_size: Size,
    pub(crate) visible: bool,
    pub(crate) focus: bool,
    pub(crate) grab_focus: bool,
    /// Number of descendants that declared grab focus.
    pub(crate) child_grab_focus: u32,
    pub(crate) layout_index: i32,
    pub(crate) background: Color,
    pub(crate) border: Color,
    pub(crate) sprite: Option<Sprite>,
    /// Local area that answers hit tests in place of the bounds.
    pub(crate) hit_area: Option<Rect>,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) added: bool,
    pub(crate) listeners: Listeners,
}

impl Default for ComponentBase {
    fn default() -> Self {
        Self {
            name: None,
            location: Point::ZERO,
            size: Size::ZERO,
            preferred_size: Size::ZERO,
            visible: true,
            focus: false,
            grab_focus: false,
            child_grab_focus: 0,
            layout_index: 0,
            background: Color::TRANSPARENT,
            border: Color::BLACK,
            sprite: None,
            hit_area: None,
            parent: None,
            added: false,
            listeners: Listeners::default(),
        }
    }
}

impl ComponentBase {
    /// Debug name, if one was assigned.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Location in the parent's coordinate space (bottom-left origin).
    pub fn location(&self) -> Point {
        self.location
    }

    /// Current size, as assigned by the last layout pass.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The rectangle this component occupies in its parent.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.location, self.size)
    }

    /// The rectangle, in the parent's space, that the parent hit-tests.
    ///
    /// This is [`bounds`](Self::bounds) unless the component set a hit area.
    pub fn hit_bounds(&self) -> Rect {
        match self.hit_area {
            Some(area) => area.offset(self.location.x, self.location.y),
            None => self.bounds(),
        }
    }

    /// The size this component asks its layout manager for.
    pub fn preferred_size(&self) -> Size {
        self.preferred_size
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn has_focus(&self) -> bool {
        self.focus
    }

    pub fn is_grab_focus(&self) -> bool {
        self.grab_focus
    }

    /// How many descendants currently demand focus.
    pub fn child_grab_focus_count(&self) -> u32 {
        self.child_grab_focus
    }

    /// Role tag interpreted by the parent's layout manager.
    pub fn layout_index(&self) -> i32 {
        self.layout_index
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    pub fn border_color(&self) -> Color {
        self.border
    }

    pub fn background_sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }

    /// The owning panel, if this component has been added to one.
    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    /// Whether this component has been added to a panel.
    pub fn is_added(&self) -> bool {
        self.added
    }

    /// Listen to mouse events delivered to (or routed through) this component.
    pub fn add_mouse_listener<F>(&self, listener: F) -> Connection
    where
        F: Fn(&(ComponentId, MouseEvent)) + Send + Sync + 'static,
    {
        self.listeners.mouse.connect_handle(listener)
    }

    /// Listen to keyboard and text events delivered to this component.
    pub fn add_key_listener<F>(&self, listener: F) -> Connection
    where
        F: Fn(&(ComponentId, KeyEvent)) + Send + Sync + 'static,
    {
        self.listeners.keyboard.connect_handle(listener)
    }

    /// Listen to focus gains and losses.
    pub fn add_focus_listener<F>(&self, listener: F) -> Connection
    where
        F: Fn(&(ComponentId, bool)) + Send + Sync + 'static,
    {
        self.listeners.focus.connect_handle(listener)
    }

    /// Listen to the component's action (button click, Enter, ...).
    pub fn add_action_listener<F>(&self, listener: F) -> Connection
    where
        F: Fn(&ComponentId) + Send + Sync + 'static,
    {
        self.listeners.action.connect_handle(listener)
    }

    /// Listen to the owning frame switching panels.
    pub fn add_panel_change_listener<F>(&self, listener: F) -> Connection
    where
        F: Fn(&(ComponentId, bool)) + Send + Sync + 'static,
    {
        self.listeners.panel_change.connect_handle(listener)
    }
}
