//! Drawing the tree through a [`Renderer`].

use std::time::Duration;

use trellis_core::logging::targets;
use trellis_render::{Color, Rect, Renderer};

use super::ComponentTree;
use crate::component::{ComponentBase, ComponentId};
use crate::error::TreeResult;

/// Width of the outline drawn in the border color.
pub const BORDER_WIDTH: f32 = 1.0;

impl ComponentTree {
    /// Draw `id` and everything below it.
    ///
    /// The renderer must already be translated to the component's location.
    /// A panel clips to its own bounds, draws itself, then each visible child
    /// in insertion order with its priority child last.
    pub fn draw(&mut self, id: ComponentId, renderer: &mut dyn Renderer, delta: Duration) -> TreeResult<()> {
        if !self.is_panel(id) {
            return self.draw_component(id, renderer, delta);
        }

        renderer.save();
        let size = self.component(id)?.size;
        renderer.clip_rect(Rect::new(0.0, 0.0, size.width, size.height));
        if renderer.is_clipped_out() {
            tracing::trace!(target: targets::RENDER, ?id, "panel clipped out");
            renderer.restore();
            return Ok(());
        }

        self.draw_component(id, renderer, delta)?;
        let priority = self.priority(id);
        let ordered: Vec<ComponentId> = self
            .children(id)
            .iter()
            .copied()
            .filter(|&child| Some(child) != priority)
            .chain(priority)
            .collect();
        for child in ordered {
            let Some(base) = self.get(child).filter(|base| base.visible) else {
                continue;
            };
            let location = base.location;
            renderer.save();
            renderer.translate(location.x, location.y);
            let result = self.draw(child, renderer, delta);
            renderer.restore();
            result?;
        }

        renderer.restore();
        Ok(())
    }

    /// Base decoration plus the widget's own drawing.
    fn draw_component(&mut self, id: ComponentId, renderer: &mut dyn Renderer, delta: Duration) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        draw_base(&node.base, renderer);
        if let Some(drawable) = node.widget.as_deref_mut().and_then(|widget| widget.drawable()) {
            drawable.draw(&node.base, renderer, delta);
        }
        Ok(())
    }
}

/// Background color, background sprite, then border.
fn draw_base(base: &ComponentBase, renderer: &mut dyn Renderer) {
    let rect = Rect::new(0.0, 0.0, base.size.width, base.size.height);
    if !base.background.is_transparent() {
        renderer.fill_rect(rect, base.background);
    }
    if let Some(sprite) = &base.sprite {
        renderer.draw_sprite(sprite, rect, Color::WHITE);
    }
    if !base.border.is_transparent() {
        renderer.stroke_rect(rect, base.border, BORDER_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use trellis_render::{DrawCommand, Point, RecordingRenderer, Size};

    use super::*;
    use crate::component::{Drawable, Widget};
    use crate::layout::GridLayout;

    struct Caption(&'static str);

    impl Widget for Caption {
        fn type_name(&self) -> &'static str {
            "Caption"
        }

        fn drawable(&mut self) -> Option<&mut dyn Drawable> {
            Some(self)
        }
    }

    impl Drawable for Caption {
        fn draw(&mut self, _base: &ComponentBase, renderer: &mut dyn Renderer, _delta: Duration) {
            renderer.draw_text(self.0, Point::ZERO, Color::BLACK);
        }
    }

    fn fixture() -> (ComponentTree, ComponentId, ComponentId, ComponentId) {
        let mut tree = ComponentTree::new();
        let panel = tree.create_panel_with_layout(Box::new(GridLayout::new(1, 2)));
        tree.set_size(panel, Size::new(100.0, 50.0)).unwrap();
        let a = tree.create_component(Caption("a"));
        let b = tree.create_component(Caption("b"));
        tree.add(panel, 0, a);
        tree.add(panel, 0, b);
        (tree, panel, a, b)
    }

    #[test]
    fn test_children_drawn_at_their_location() {
        let (mut tree, panel, _, _) = fixture();
        let mut renderer = RecordingRenderer::new();
        tree.draw(panel, &mut renderer, Duration::ZERO).unwrap();

        let texts: Vec<_> = renderer
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, origin, .. } => Some((text.as_str(), *origin)),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![("a", Point::new(0.0, 0.0)), ("b", Point::new(50.0, 0.0))]);
    }

    #[test]
    fn test_priority_child_drawn_last_and_hidden_skipped() {
        let (mut tree, panel, a, b) = fixture();
        tree.demand_priority(panel, a).unwrap();
        let mut renderer = RecordingRenderer::new();
        tree.draw(panel, &mut renderer, Duration::ZERO).unwrap();
        assert_eq!(renderer.texts(), vec!["b", "a"]);

        tree.set_visible(b, false).unwrap();
        let mut renderer = RecordingRenderer::new();
        tree.draw(panel, &mut renderer, Duration::ZERO).unwrap();
        assert_eq!(renderer.texts(), vec!["a"]);
    }

    #[test]
    fn test_base_decoration() {
        let mut tree = ComponentTree::new();
        let leaf = tree.create_empty();
        tree.set_preferred_size(leaf, Size::new(10.0, 10.0)).unwrap();
        tree.set_background_color(leaf, Color::RED).unwrap();

        let mut renderer = RecordingRenderer::new();
        tree.draw(leaf, &mut renderer, Duration::ZERO).unwrap();
        let commands = renderer.commands();
        assert!(matches!(commands[0], DrawCommand::FillRect { color, .. } if color == Color::RED));
        assert!(matches!(commands[1], DrawCommand::StrokeRect { color, .. } if color == Color::BLACK));
    }
}
