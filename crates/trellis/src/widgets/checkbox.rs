//! Check box.

use std::time::Duration;

use trellis_render::{Color, Point, Rect, Renderer, Size};

use super::button::{ButtonState, activate_on_enter};
use super::{SharedTextMeasure, TEXT_PADDING};
use crate::component::{ComponentBase, Drawable, KeyTarget, MouseTarget, Widget, WidgetContext};
use crate::events::{KeyEvent, MouseEvent};

/// Inset of the check mark inside the box.
const CHECK_INSET: f32 = 3.0;

/// A box with a label. Clicking it, or Enter while focused, fires the action,
/// and the action toggles the selected flag before any listener runs.
pub struct CheckBox {
    label: String,
    metrics: SharedTextMeasure,
    selected: bool,
    text_color: Color,
    box_color: Color,
    check_color: Color,
    state: ButtonState,
}

impl CheckBox {
    pub fn new(label: impl Into<String>, metrics: SharedTextMeasure) -> Self {
        Self {
            label: label.into(),
            metrics,
            selected: false,
            text_color: Color::BLACK,
            box_color: Color::BLACK,
            check_color: Color::BLACK,
            state: ButtonState::default(),
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Change the flag without firing the action.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, cx: &mut WidgetContext<'_>, label: impl Into<String>) {
        self.label = label.into();
        cx.set_preferred_size(self.fitted_size());
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn set_box_color(&mut self, color: Color) {
        self.box_color = color;
    }

    pub fn set_check_color(&mut self, color: Color) {
        self.check_color = color;
    }

    /// Side of the square box, one line of text high.
    fn box_size(&self) -> f32 {
        self.metrics.measure("").height
    }

    fn fitted_size(&self) -> Size {
        let text = self.metrics.measure(&self.label);
        Size::new(self.box_size() + text.width + 1.0, text.height + TEXT_PADDING)
    }
}

impl Widget for CheckBox {
    fn type_name(&self) -> &'static str {
        "CheckBox"
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
        cx.set_background_color(Color::TRANSPARENT);
        cx.set_border_color(Color::TRANSPARENT);
        cx.set_preferred_size(self.fitted_size());
    }

    fn on_action(&mut self, _cx: &mut WidgetContext<'_>) {
        self.selected = !self.selected;
    }
}

impl MouseTarget for CheckBox {
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

impl KeyTarget for CheckBox {
    fn handle_keyboard(&mut self, cx: &mut WidgetContext<'_>, event: &KeyEvent) -> bool {
        activate_on_enter(cx, event)
    }
}

impl Drawable for CheckBox {
    fn draw(&mut self, _base: &ComponentBase, renderer: &mut dyn Renderer, _delta: Duration) {
        let side = self.box_size();
        renderer.stroke_rect(Rect::new(0.0, 0.0, side, side), self.box_color, 1.0);
        if self.selected {
            let inner = (side - 2.0 * CHECK_INSET).max(0.0);
            renderer.fill_rect(Rect::new(CHECK_INSET, CHECK_INSET, inner, inner), self.check_color);
        }
        renderer.draw_text(&self.label, Point::new(side, 0.0), self.text_color);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use trellis_render::{DrawCommand, FixedAdvanceMetrics, RecordingRenderer};

    use super::*;
    use crate::ComponentTree;
    use crate::events::{Key, MouseButton};

    fn metrics() -> SharedTextMeasure {
        Arc::new(FixedAdvanceMetrics::new(10.0, 12.0))
    }

    #[test]
    fn test_click_toggles_before_listeners() {
        let mut tree = ComponentTree::new();
        let id = tree.create_component(CheckBox::new("Sound", metrics()));
        assert_eq!(tree.component(id).unwrap().preferred_size(), Size::new(63.0, 14.0));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        tree.component(id).unwrap().add_action_listener(move |_| sink.lock().push(()));

        tree.handle_mouse(id, &MouseEvent::button_down(MouseButton::Left, 1.0, 1.0)).unwrap();
        tree.handle_mouse(id, &MouseEvent::button_up(MouseButton::Left, 1.0, 1.0)).unwrap();
        assert!(tree.widget::<CheckBox>(id).unwrap().is_selected());
        assert_eq!(seen.lock().len(), 1);

        tree.set_focus(id, true).unwrap();
        tree.handle_keyboard(id, &KeyEvent::key_down(Key::Enter)).unwrap();
        assert!(!tree.widget::<CheckBox>(id).unwrap().is_selected());
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn test_check_mark_drawn_when_selected() {
        let mut tree = ComponentTree::new();
        let id = tree.create_component(CheckBox::new("A", metrics()).with_selected(true));
        let mut renderer = RecordingRenderer::new();
        tree.draw(id, &mut renderer, Duration::ZERO).unwrap();

        // Transparent background and border draw nothing of their own.
        assert!(matches!(renderer.commands()[0], DrawCommand::StrokeRect { .. }));
        assert!(matches!(renderer.commands()[1], DrawCommand::FillRect { .. }));
        assert_eq!(renderer.texts(), vec!["A"]);
    }
}
