//! Capability traits for widget behavior.
//!
//! A widget implements [`Widget`] and opts into the capabilities it needs by
//! returning itself from [`Widget::drawable`], [`Widget::mouse_target`] or
//! [`Widget::key_target`]. A component without a capability falls back to the
//! base behavior: draw background, sprite and border; publish input to its
//! listeners.
//!
//! Hooks receive a [`WidgetContext`] for the component they are attached to.
//! Requests made through the context (do action, take focus, resize,
//! priority) are applied by the tree as soon as the hook returns, within the
//! same dispatch.

use std::any::Any;
use std::time::Duration;

use trellis_render::{Color, Rect, Renderer, Size};

use super::{ComponentBase, ComponentId};
use crate::events::{KeyEvent, MouseEvent};

/// Custom rendering on top of the base background/sprite/border.
pub trait Drawable {
    /// Draw in local coordinates; the renderer is already translated to the
    /// component's location. `delta` is the time since the previous frame.
    fn draw(&mut self, base: &ComponentBase, renderer: &mut dyn Renderer, delta: Duration);
}

/// Reaction to mouse events routed to the component.
pub trait MouseTarget {
    /// Handle an event whose position is already in local coordinates.
    fn handle_mouse(&mut self, cx: &mut WidgetContext<'_>, event: &MouseEvent);

    /// The pointer left the component.
    fn mouse_motion_leave(&mut self, _cx: &mut WidgetContext<'_>) {}

    /// A button pressed on this component was released elsewhere.
    fn mouse_outside_up(&mut self, _cx: &mut WidgetContext<'_>) {}
}

/// Reaction to keyboard and text events while the component has focus.
pub trait KeyTarget {
    /// Returns `true` if the event was consumed. A consumed event is not
    /// used for traversal by the parent panel's group.
    fn handle_keyboard(&mut self, cx: &mut WidgetContext<'_>, event: &KeyEvent) -> bool;
}

/// Behavior attached to a leaf component.
pub trait Widget: Any + Send {
    /// Short type name used in tree dumps.
    fn type_name(&self) -> &'static str;

    fn drawable(&mut self) -> Option<&mut dyn Drawable> {
        None
    }

    fn mouse_target(&mut self) -> Option<&mut dyn MouseTarget> {
        None
    }

    fn key_target(&mut self) -> Option<&mut dyn KeyTarget> {
        None
    }

    /// Called once when the component is created, to set the initial
    /// preferred size and colors.
    fn attached(&mut self, _cx: &mut WidgetContext<'_>) {}

    /// Runs before the component's action listeners.
    fn on_action(&mut self, _cx: &mut WidgetContext<'_>) {}

    /// The owning panel granted or revoked draw/hit-test priority.
    fn priority_changed(&mut self, _cx: &mut WidgetContext<'_>, _has_priority: bool) {}
}

/// A deferred change requested by a widget hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum WidgetRequest {
    DoAction,
    SetFocus(bool),
    SetPreferredSize(Size),
    SetBackgroundColor(Color),
    SetBorderColor(Color),
    DemandPriority,
    ReleasePriority,
    SetHitArea(Option<Rect>),
}

/// A widget's view of its own component during a hook.
#[derive(Debug)]
pub struct WidgetContext<'a> {
    id: ComponentId,
    base: &'a ComponentBase,
    requests: Vec<WidgetRequest>,
}

impl<'a> WidgetContext<'a> {
    pub(crate) fn new(id: ComponentId, base: &'a ComponentBase) -> Self {
        Self {
            id,
            base,
            requests: Vec::new(),
        }
    }

    pub(crate) fn into_requests(self) -> Vec<WidgetRequest> {
        self.requests
    }

    /// The component this widget is attached to.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The component's shared state, as it was when the hook started.
    pub fn base(&self) -> &ComponentBase {
        self.base
    }

    pub fn has_focus(&self) -> bool {
        self.base.focus
    }

    pub fn size(&self) -> Size {
        self.base.size
    }

    /// Fire the component's action: the widget's `on_action` hook, then the
    /// action listeners.
    pub fn do_action(&mut self) {
        self.requests.push(WidgetRequest::DoAction);
    }

    /// Ask for focus to be set or cleared, subject to the grab-focus rules.
    pub fn set_focus(&mut self, focus: bool) {
        self.requests.push(WidgetRequest::SetFocus(focus));
    }

    /// Change the preferred size; the parent re-lays out.
    pub fn set_preferred_size(&mut self, size: Size) {
        self.requests.push(WidgetRequest::SetPreferredSize(size));
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.requests.push(WidgetRequest::SetBackgroundColor(color));
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.requests.push(WidgetRequest::SetBorderColor(color));
    }

    /// Ask the parent panel to draw and hit-test this component first.
    pub fn demand_priority(&mut self) {
        self.requests.push(WidgetRequest::DemandPriority);
    }

    /// Give priority back to the parent panel.
    pub fn release_priority(&mut self) {
        self.requests.push(WidgetRequest::ReleasePriority);
    }

    /// Answer hit tests over `area` (local coordinates) instead of the
    /// component's bounds. `None` restores the bounds.
    pub fn set_hit_area(&mut self, area: Option<Rect>) {
        self.requests.push(WidgetRequest::SetHitArea(area));
    }
}
