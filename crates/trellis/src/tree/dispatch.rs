//! Mouse and keyboard routing.
//!
//! A panel hit-tests its visible children (priority child first, then the
//! rest in insertion order), translates the event into the hit child's local
//! space and forwards it. Panels track the hovered and pressed child so they
//! can send leave and outside-release notifications. Every panel publishes
//! the events it routes to its own listeners afterwards.

use trellis_core::logging::{span_names, targets};
use trellis_render::{Point, Rect};

use super::ComponentTree;
use crate::component::ComponentId;
use crate::error::TreeResult;
use crate::events::{KeyEvent, MouseEvent, MouseEventKind};
use crate::traversal::{TraversalAccess, TraversalGroup};

impl ComponentTree {
    /// The visible child of `panel` under `position` (panel-local), if any.
    ///
    /// The priority child is checked first. Children are assumed not to
    /// overlap, so the first match wins.
    pub fn child_at(&self, panel: ComponentId, position: Point) -> TreeResult<Option<ComponentId>> {
        let state = self.panel_state(panel)?;
        let ordinary = state.children.iter().copied().filter(|&child| Some(child) != state.priority);
        Ok(state.priority.into_iter().chain(ordinary).find(|&child| {
            self.get(child)
                .is_some_and(|base| base.visible && base.hit_bounds().contains(position))
        }))
    }

    /// Deliver a mouse event, in `id`'s local coordinates.
    pub fn handle_mouse(&mut self, id: ComponentId, event: &MouseEvent) -> TreeResult<()> {
        if !self.is_panel(id) {
            self.node(id)?;
            self.with_widget(id, |widget, cx| {
                if let Some(target) = widget.mouse_target() {
                    target.handle_mouse(cx, event);
                }
            });
            self.component(id)?.listeners.mouse.emit((id, *event));
            return Ok(());
        }

        let _span = tracing::trace_span!(target: targets::DISPATCH, span_names::MOUSE_DISPATCH, ?id).entered();
        let hit = self.child_at(id, event.position)?;
        match event.kind {
            MouseEventKind::Motion => {
                let previous = self.panel_state(id)?.hovered;
                if let Some(previous) = previous.filter(|&previous| Some(previous) != hit) {
                    tracing::trace!(target: targets::DISPATCH, panel = ?id, child = ?previous, "mouse left child");
                    self.mouse_motion_leave(previous)?;
                }
                self.panel_state_mut(id)?.hovered = hit;
                if let Some(child) = hit {
                    self.forward_mouse(child, event)?;
                }
            }
            MouseEventKind::ButtonDown(_) => {
                if let Some(child) = hit {
                    self.forward_mouse(child, event)?;
                }
                for child in self.children(id).to_vec() {
                    if self.get(child).is_some_and(|base| base.visible) {
                        self.set_focus(child, Some(child) == hit)?;
                    }
                }
                self.panel_state_mut(id)?.pressed = hit;
            }
            MouseEventKind::ButtonUp(_) => {
                if let Some(child) = hit {
                    self.forward_mouse(child, event)?;
                }
                let pressed = self.panel_state_mut(id)?.pressed.take();
                if let Some(pressed) = pressed.filter(|&pressed| Some(pressed) != hit) {
                    tracing::trace!(target: targets::DISPATCH, panel = ?id, child = ?pressed, "released outside");
                    self.mouse_outside_up(pressed)?;
                }
            }
        }

        self.component(id)?.listeners.mouse.emit((id, *event));
        Ok(())
    }

    fn forward_mouse(&mut self, child: ComponentId, event: &MouseEvent) -> TreeResult<()> {
        let origin = self.component(child)?.location;
        self.handle_mouse(child, &event.translated(origin))
    }

    /// The pointer left `id`. A panel passes this on to all its children.
    pub fn mouse_motion_leave(&mut self, id: ComponentId) -> TreeResult<()> {
        if self.is_panel(id) {
            self.panel_state_mut(id)?.hovered = None;
            for child in self.children(id).to_vec() {
                self.mouse_motion_leave(child)?;
            }
        } else {
            self.node(id)?;
            self.with_widget(id, |widget, cx| {
                if let Some(target) = widget.mouse_target() {
                    target.mouse_motion_leave(cx);
                }
            });
        }
        Ok(())
    }

    /// A button pressed on `id` was released elsewhere. A panel passes this
    /// on to all its children.
    pub fn mouse_outside_up(&mut self, id: ComponentId) -> TreeResult<()> {
        if self.is_panel(id) {
            self.panel_state_mut(id)?.pressed = None;
            for child in self.children(id).to_vec() {
                self.mouse_outside_up(child)?;
            }
        } else {
            self.node(id)?;
            self.with_widget(id, |widget, cx| {
                if let Some(target) = widget.mouse_target() {
                    target.mouse_outside_up(cx);
                }
            });
        }
        Ok(())
    }

    /// Deliver a keyboard or text event.
    ///
    /// A panel hands it to every visible child holding focus, then to its
    /// own listeners, then to its traversal group. Tab and enabled arrow keys
    /// always reach the group. Other keys a child consumed do not.
    pub fn handle_keyboard(&mut self, id: ComponentId, event: &KeyEvent) -> TreeResult<()> {
        self.dispatch_keyboard(id, event).map(|_| ())
    }

    fn dispatch_keyboard(&mut self, id: ComponentId, event: &KeyEvent) -> TreeResult<bool> {
        if !self.is_panel(id) {
            self.node(id)?;
            let consumed = self
                .with_widget(id, |widget, cx| {
                    widget
                        .key_target()
                        .is_some_and(|target| target.handle_keyboard(cx, event))
                })
                .unwrap_or(false);
            self.component(id)?.listeners.keyboard.emit((id, event.clone()));
            return Ok(consumed);
        }

        let _span = tracing::trace_span!(target: targets::DISPATCH, span_names::KEY_DISPATCH, ?id).entered();
        let mut consumed = false;
        for child in self.children(id).to_vec() {
            if self.get(child).is_some_and(|base| base.visible && base.focus) {
                consumed |= self.dispatch_keyboard(child, event)?;
            }
        }
        self.component(id)?.listeners.keyboard.emit((id, event.clone()));

        if let Some(mut group) = self.panel_state_mut(id)?.group.take() {
            if (!consumed || group.navigates(event)) && group.handle_keyboard(&mut TreeAccess { tree: self }, event) {
                tracing::trace!(target: targets::TRAVERSAL, panel = ?id, "traversal consumed key");
                consumed = true;
            }
            self.restore_group(id, group)?;
        }
        Ok(consumed)
    }

    /// Move focus within the panel's traversal group.
    pub fn change_to_next(&mut self, panel: ComponentId, forward: bool) -> TreeResult<()> {
        if let Some(mut group) = self.panel_state_mut(panel)?.group.take() {
            group.change_to_next(&mut TreeAccess { tree: self }, forward);
            self.restore_group(panel, group)?;
        }
        Ok(())
    }

    /// Re-sort the panel's traversal group into reading order.
    pub(crate) fn sort_group(&mut self, panel: ComponentId) -> TreeResult<()> {
        if let Some(mut group) = self.panel_state_mut(panel)?.group.take() {
            group.sort(&TreeAccess { tree: self });
            self.restore_group(panel, group)?;
        }
        Ok(())
    }

    fn restore_group(&mut self, panel: ComponentId, group: TraversalGroup) -> TreeResult<()> {
        self.panel_state_mut(panel)?.group = Some(group);
        Ok(())
    }
}

/// The tree as seen by a traversal group that has been taken out of its
/// panel for the duration of a call.
struct TreeAccess<'a> {
    tree: &'a mut ComponentTree,
}

impl TraversalAccess for TreeAccess<'_> {
    fn is_visible(&self, id: ComponentId) -> bool {
        self.tree.get(id).is_some_and(|base| base.visible)
    }

    fn has_focus(&self, id: ComponentId) -> bool {
        self.tree.get(id).is_some_and(|base| base.focus)
    }

    fn bounds(&self, id: ComponentId) -> Option<Rect> {
        self.tree.get(id).map(|base| base.bounds())
    }

    fn set_focus(&mut self, id: ComponentId, focus: bool) {
        if let Err(error) = self.tree.set_focus(id, focus) {
            tracing::warn!(target: targets::TRAVERSAL, ?id, %error, "traversal focus change failed");
        }
    }

    fn do_action(&mut self, id: ComponentId) {
        if let Err(error) = self.tree.do_action(id) {
            tracing::warn!(target: targets::TRAVERSAL, ?id, %error, "traversal action failed");
        }
    }
}
