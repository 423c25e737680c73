//! Push button.

use std::time::Duration;

use trellis_render::{Color, Point, Rect, Renderer};

use super::{SharedTextMeasure, TextAlignment, centered_y, padded};
use crate::component::{ComponentBase, Drawable, KeyTarget, MouseTarget, Widget, WidgetContext};
use crate::events::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

/// Pointer state shared by button-like widgets.
///
/// The action fires on a left release that follows a left press on the same
/// widget. A release elsewhere, reported through
/// [`MouseTarget::mouse_outside_up`], cancels the pending click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    mouse_inside: bool,
    pushed: bool,
    mouse_down: bool,
}

impl ButtonState {
    /// Whether the pointer is over the button.
    pub fn is_mouse_inside(&self) -> bool {
        self.mouse_inside
    }

    /// Whether the button is held down.
    pub fn is_pushed(&self) -> bool {
        self.pushed
    }

    /// Whether the left button went down on this button and has not been
    /// released yet.
    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    pub(crate) fn handle_mouse(&mut self, cx: &mut WidgetContext<'_>, event: &MouseEvent) {
        match event.kind {
            MouseEventKind::Motion => self.mouse_inside = true,
            MouseEventKind::ButtonDown(MouseButton::Left) => {
                self.pushed = true;
                self.mouse_down = true;
            }
            MouseEventKind::ButtonUp(MouseButton::Left) if self.mouse_down => {
                self.mouse_down = false;
                self.pushed = false;
                cx.do_action();
            }
            _ => {}
        }
    }

    pub(crate) fn leave(&mut self) {
        self.mouse_inside = false;
    }

    pub(crate) fn outside_up(&mut self) {
        self.mouse_down = false;
        self.pushed = false;
    }
}

/// Fire the action on Enter while focused.
pub(crate) fn activate_on_enter(cx: &mut WidgetContext<'_>, event: &KeyEvent) -> bool {
    if let KeyEvent::KeyDown { key, .. } = event
        && key.is_enter()
        && cx.has_focus()
    {
        cx.do_action();
        return true;
    }
    false
}

/// A clickable button with a text label.
///
/// Hovering, holding and focus each tint the background with a translucent
/// overlay.
pub struct Button {
    label: String,
    metrics: SharedTextMeasure,
    alignment: TextAlignment,
    text_color: Color,
    hover_color: Color,
    focus_color: Color,
    push_color: Color,
    state: ButtonState,
}

impl Button {
    /// Background of a new button.
    pub const BACKGROUND: Color = Color::from_rgb(0.9, 0.9, 0.9);

    pub fn new(label: impl Into<String>, metrics: SharedTextMeasure) -> Self {
        Self {
            label: label.into(),
            metrics,
            alignment: TextAlignment::Center,
            text_color: Color::BLACK,
            hover_color: Color::BLACK.with_alpha(0.1),
            focus_color: Color::BLACK.with_alpha(0.05),
            push_color: Color::BLACK.with_alpha(0.15),
            state: ButtonState::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Change the label and resize to fit it.
    pub fn set_label(&mut self, cx: &mut WidgetContext<'_>, label: impl Into<String>) {
        self.label = label.into();
        cx.set_preferred_size(padded(self.metrics.measure(&self.label)));
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: TextAlignment) {
        self.alignment = alignment;
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn set_hover_color(&mut self, color: Color) {
        self.hover_color = color;
    }

    pub fn set_focus_color(&mut self, color: Color) {
        self.focus_color = color;
    }

    pub fn set_push_color(&mut self, color: Color) {
        self.push_color = color;
    }

    fn overlay(&self, base: &ComponentBase) -> Option<Color> {
        if self.state.pushed && self.state.mouse_inside {
            Some(self.push_color)
        } else if self.state.mouse_inside {
            Some(self.hover_color)
        } else if base.has_focus() {
            Some(self.focus_color)
        } else {
            None
        }
    }
}

impl Widget for Button {
    fn type_name(&self) -> &'static str {
        "Button"
    }

    fn drawable(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }

    fn mouse_target(&mut self) -> Option<&mut dyn MouseTarget> {
        Some(self)
    }

    fn key_target(&mut self) -> Option<&mut dyn KeyTarget> {
        Some(self)
    }

    fn attached(&mut self, cx: &mut WidgetContext<'_>) {
        cx.set_background_color(Self::BACKGROUND);
        cx.set_preferred_size(padded(self.metrics.measure(&self.label)));
    }
}

impl MouseTarget for Button {
    fn handle_mouse(&mut self, cx: &mut WidgetContext<'_>, event: &MouseEvent) {
        self.state.handle_mouse(cx, event);
    }

    fn mouse_motion_leave(&mut self, _cx: &mut WidgetContext<'_>) {
        self.state.leave();
    }

    fn mouse_outside_up(&mut self, _cx: &mut WidgetContext<'_>) {
        self.state.outside_up();
    }
}

impl KeyTarget for Button {
    fn handle_keyboard(&mut self, cx: &mut WidgetContext<'_>, event: &KeyEvent) -> bool {
        activate_on_enter(cx, event)
    }
}

impl Drawable for Button {
    fn draw(&mut self, base: &ComponentBase, renderer: &mut dyn Renderer, _delta: Duration) {
        let size = base.size();
        if let Some(overlay) = self.overlay(base) {
            renderer.fill_rect(Rect::new(0.0, 0.0, size.width, size.height), overlay);
        }
        let text = self.metrics.measure(&self.label);
        // Labels wider than the button are not drawn.
        if text.width < size.width {
            let origin = Point::new(
                self.alignment.x(size.width, text.width, 0.0),
                centered_y(size.height, text.height),
            );
            renderer.draw_text(&self.label, origin, self.text_color);
        }
    }
}
