//! Drop-down selection.
//!
//! Clicking the box opens the item list below it. While open the box holds
//! its panel's priority and its hit area covers the list, so it is drawn
//! above its siblings and a click on a row selects that row. Up and Down move
//! the selection whether or not the list is open.

use std::time::Duration;

use trellis_render::{Color, Point, Rect, Renderer, Size};

use super::{SharedTextMeasure, TEXT_PADDING, centered_y};
use crate::component::{ComponentBase, Drawable, KeyTarget, MouseTarget, Widget, WidgetContext};
use crate::events::{Key, KeyEvent, MouseButton, MouseEvent};

/// A list of items with at most one selected.
pub struct ComboBox {
    items: Vec<String>,
    selected: Option<usize>,
    open: bool,
    metrics: SharedTextMeasure,
    text_color: Color,
    mark_color: Color,
}

impl ComboBox {
    pub fn new(metrics: SharedTextMeasure) -> Self {
        Self::with_items(Vec::<String>::new(), metrics)
    }

    /// A box over `items`, with the first one selected.
    pub fn with_items<I, S>(items: I, metrics: SharedTextMeasure) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let selected = (!items.is_empty()).then_some(0);
        Self {
            items,
            selected,
            open: false,
            metrics,
            text_color: Color::BLACK,
            mark_color: Color::new(0.0, 0.0, 1.0, 0.2),
        }
    }

    /// Append an item, selecting it if it is the first, and resize to fit.
    pub fn add_item(&mut self, cx: &mut WidgetContext<'_>, item: impl Into<String>) {
        self.items.push(item.into());
        if self.selected.is_none() {
            self.selected = Some(0);
        }
        cx.set_preferred_size(self.fitted_size());
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.selected.and_then(|index| self.items.get(index)).map(String::as_str)
    }

    /// Select `index`, or nothing if it is out of range.
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&index| index < self.items.len());
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn set_mark_color(&mut self, color: Color) {
        self.mark_color = color;
    }

    fn fitted_size(&self) -> Size {
        let line = self.line_height();
        let widest = self
            .items
            .iter()
            .map(|item| self.metrics.measure(item).width)
            .fold(0.0_f32, f32::max);
        // Room on the right for the drop-down arrow, one line wide.
        Size::new(widest + line + 2.0 * TEXT_PADDING, line + 2.0 * TEXT_PADDING)
    }

    fn line_height(&self) -> f32 {
        self.metrics.measure("").height
    }

    fn set_open(&mut self, cx: &mut WidgetContext<'_>, open: bool) {
        if self.open == open {
            return;
        }
        self.open = open;
        if open {
            cx.demand_priority();
            cx.set_hit_area(Some(self.list_area(cx.size())));
        } else {
            cx.release_priority();
            cx.set_hit_area(None);
        }
    }

    /// The box plus the rows hanging below it, in local coordinates.
    fn list_area(&self, size: Size) -> Rect {
        let rows = self.items.len() as f32;
        Rect::new(0.0, -rows * size.height, size.width, (rows + 1.0) * size.height)
    }

    /// The list row under a local `y` below the box.
    fn row_at(&self, y: f32, row_height: f32) -> Option<usize> {
        if y >= 0.0 || row_height <= 0.0 {
            return None;
        }
        let row = (-y / row_height).floor() as usize;
        (row < self.items.len()).then_some(row)
    }

    fn step(&mut self, forward: bool) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.selected = Some(match (self.selected, forward) {
            (None, _) => 0,
            (Some(index), true) => (index + 1).min(last),
            (Some(index), false) => index.saturating_sub(1),
        });
    }
}

impl Widget for ComboBox {
    fn type_name(&self) -> &'static str {
        "ComboBox"
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
        cx.set_preferred_size(self.fitted_size());
    }

    fn priority_changed(&mut self, cx: &mut WidgetContext<'_>, has_priority: bool) {
        // A sibling took priority: the list can no longer be drawn on top.
        if !has_priority && self.open {
            self.open = false;
            cx.set_hit_area(None);
        }
    }
}

impl MouseTarget for ComboBox {
    fn handle_mouse(&mut self, cx: &mut WidgetContext<'_>, event: &MouseEvent) {
        if !event.is_press(MouseButton::Left) {
            return;
        }
        if self.open
            && let Some(row) = self.row_at(event.position.y, cx.size().height)
        {
            self.selected = Some(row);
            self.set_open(cx, false);
            cx.do_action();
            return;
        }
        let open = !self.open;
        self.set_open(cx, open);
    }
}

impl KeyTarget for ComboBox {
    fn handle_keyboard(&mut self, cx: &mut WidgetContext<'_>, event: &KeyEvent) -> bool {
        let KeyEvent::KeyDown { key, .. } = event else {
            return false;
        };
        match key {
            Key::ArrowUp => self.step(false),
            Key::ArrowDown => self.step(true),
            Key::Escape if self.open => self.set_open(cx, false),
            key if key.is_enter() => {
                self.set_open(cx, false);
                cx.do_action();
            }
            _ => return false,
        }
        true
    }
}

impl Drawable for ComboBox {
    fn draw(&mut self, base: &ComponentBase, renderer: &mut dyn Renderer, _delta: Duration) {
        let size = base.size();
        let line = self.line_height();
        let text_y = centered_y(size.height, line);
        if let Some(item) = self.selected_item() {
            renderer.draw_text(item, Point::new(TEXT_PADDING, text_y), self.text_color);
        }
        // Drop-down arrow area.
        let arrow = Rect::new(size.width - line - TEXT_PADDING, text_y, line, line);
        renderer.stroke_rect(arrow, self.text_color, 1.0);

        if !self.open {
            return;
        }
        // The list hangs below the box, one row per item.
        for (index, item) in self.items.iter().enumerate() {
            let row = Rect::new(0.0, -(index as f32 + 1.0) * size.height, size.width, size.height);
            renderer.fill_rect(row, base.background_color());
            if Some(index) == self.selected {
                renderer.fill_rect(row, self.mark_color);
            }
            renderer.draw_text(item, Point::new(TEXT_PADDING, row.bottom() + text_y), self.text_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use trellis_render::{FixedAdvanceMetrics, RecordingRenderer};

    use super::*;
    use crate::ComponentTree;
    use crate::component::ComponentId;
    use crate::layout::GridLayout;

    fn metrics() -> SharedTextMeasure {
        Arc::new(FixedAdvanceMetrics::new(10.0, 12.0))
    }

    fn in_panel(tree: &mut ComponentTree) -> (ComponentId, ComponentId, ComponentId) {
        let panel = tree.create_panel_with_layout(Box::new(GridLayout::new(2, 1)));
        tree.set_size(panel, Size::new(100.0, 40.0)).unwrap();
        let combo = tree.create_component(ComboBox::with_items(["red", "green", "blue"], metrics()));
        let other = tree.create_empty();
        tree.add(panel, 0, combo);
        tree.add(panel, 0, other);
        (panel, combo, other)
    }

    fn combo(tree: &ComponentTree, id: ComponentId) -> &ComboBox {
        tree.widget::<ComboBox>(id).unwrap()
    }

    #[test]
    fn test_fitted_to_widest_item() {
        let mut tree = ComponentTree::new();
        let id = tree.create_component(ComboBox::with_items(["a", "abcd"], metrics()));
        assert_eq!(tree.component(id).unwrap().preferred_size(), Size::new(56.0, 16.0));

        tree.update_widget(id, |combo: &mut ComboBox, cx| combo.add_item(cx, "abcdef"));
        assert_eq!(tree.component(id).unwrap().preferred_size(), Size::new(76.0, 16.0));
    }

    #[test]
    fn test_click_toggles_priority() {
        let mut tree = ComponentTree::new();
        let (panel, id, _) = in_panel(&mut tree);
        // The combo box is the top cell.
        tree.handle_mouse(panel, &MouseEvent::button_down(MouseButton::Left, 10.0, 30.0)).unwrap();
        assert!(combo(&tree, id).is_open());
        assert_eq!(tree.priority(panel), Some(id));

        tree.handle_mouse(panel, &MouseEvent::button_down(MouseButton::Left, 10.0, 30.0)).unwrap();
        assert!(!combo(&tree, id).is_open());
        assert_eq!(tree.priority(panel), None);
    }

    #[test]
    fn test_click_on_open_row_selects_it() {
        let mut tree = ComponentTree::new();
        let (panel, id, other) = in_panel(&mut tree);
        let acted = Arc::new(parking_lot::Mutex::new(0));
        let sink = acted.clone();
        tree.component(id).unwrap().add_action_listener(move |_| *sink.lock() += 1);

        tree.handle_mouse(panel, &MouseEvent::button_down(MouseButton::Left, 10.0, 30.0)).unwrap();
        // Rows are 20 high and hang below the box, which starts at y 20.
        assert_eq!(tree.child_at(panel, Point::new(10.0, 5.0)).unwrap(), Some(id));
        tree.handle_mouse(panel, &MouseEvent::button_down(MouseButton::Left, 10.0, -10.0)).unwrap();

        assert_eq!(combo(&tree, id).selected_item(), Some("green"));
        assert!(!combo(&tree, id).is_open());
        assert_eq!(tree.priority(panel), None);
        assert_eq!(*acted.lock(), 1);
        assert_eq!(tree.child_at(panel, Point::new(10.0, 5.0)).unwrap(), Some(other));
        assert_eq!(tree.child_at(panel, Point::new(10.0, -10.0)).unwrap(), None);
    }

    #[test]
    fn test_losing_priority_closes() {
        let mut tree = ComponentTree::new();
        let (panel, id, other) = in_panel(&mut tree);
        tree.handle_mouse(panel, &MouseEvent::button_down(MouseButton::Left, 10.0, 30.0)).unwrap();
        tree.demand_priority(panel, other).unwrap();
        assert!(!combo(&tree, id).is_open());
        assert_eq!(tree.component(id).unwrap().hit_bounds(), tree.component(id).unwrap().bounds());
    }

    #[test]
    fn test_arrows_select_and_enter_acts() {
        let mut tree = ComponentTree::new();
        let (_, id, _) = in_panel(&mut tree);
        let down = KeyEvent::key_down(Key::ArrowDown);
        tree.handle_keyboard(id, &down).unwrap();
        tree.handle_keyboard(id, &down).unwrap();
        tree.handle_keyboard(id, &down).unwrap();
        assert_eq!(combo(&tree, id).selected_item(), Some("blue"));
        tree.handle_keyboard(id, &KeyEvent::key_down(Key::ArrowUp)).unwrap();
        assert_eq!(combo(&tree, id).selected_index(), Some(1));

        let acted = Arc::new(parking_lot::Mutex::new(None));
        let sink = acted.clone();
        tree.component(id).unwrap().add_action_listener(move |id| *sink.lock() = Some(*id));
        tree.handle_keyboard(id, &KeyEvent::key_down(Key::Enter)).unwrap();
        assert_eq!(*acted.lock(), Some(id));
    }

    #[test]
    fn test_open_list_draws_every_item() {
        let mut tree = ComponentTree::new();
        let id = tree.create_component(ComboBox::with_items(["x", "y"], metrics()));
        let mut renderer = RecordingRenderer::new();
        tree.draw(id, &mut renderer, Duration::ZERO).unwrap();
        assert_eq!(renderer.texts(), vec!["x"]);

        tree.handle_mouse(id, &MouseEvent::button_down(MouseButton::Left, 1.0, 1.0)).unwrap();
        let mut renderer = RecordingRenderer::new();
        tree.draw(id, &mut renderer, Duration::ZERO).unwrap();
        assert_eq!(renderer.texts(), vec!["x", "x", "y"]);
    }
}
