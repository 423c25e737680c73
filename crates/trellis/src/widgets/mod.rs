//! Stock widgets.
//!
//! - [`Button`]: Push button firing its action on click or Enter
//! - [`CheckBox`]: Button whose action toggles a selected flag
//! - [`Label`]: Static text
//! - [`TextField`]: Single-line editable text with a blinking caret
//! - [`ComboBox`]: Item list with a selection, opened by clicking
//!
//! Widgets are created through the tree and mutated through
//! [`ComponentTree::update_widget`](crate::ComponentTree::update_widget), so
//! that size changes re-lay out the parent:
//!
//! ```
//! use trellis::ComponentTree;
//! use trellis::widgets::{default_metrics, Label};
//!
//! let mut tree = ComponentTree::new();
//! let label = tree.create_component(Label::new("Ready", default_metrics()));
//! tree.update_widget(label, |label: &mut Label, cx| label.set_text(cx, "Done"));
//! assert_eq!(tree.widget::<Label>(label).unwrap().text(), "Done");
//! ```

mod button;
mod checkbox;
mod combo_box;
mod label;
mod text_field;

pub use button::{Button, ButtonState};
pub use checkbox::CheckBox;
pub use combo_box::ComboBox;
pub use label::Label;
pub use text_field::TextField;

use std::sync::Arc;

use trellis_render::{FixedAdvanceMetrics, Size, TextMeasure};

/// Text measurement shared between widgets.
pub type SharedTextMeasure = Arc<dyn TextMeasure + Send + Sync>;

/// Monospace metrics with the default advance and line height.
pub fn default_metrics() -> SharedTextMeasure {
    Arc::new(FixedAdvanceMetrics::default())
}

/// Horizontal placement of a widget's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlignment {
    /// X of a text run `text_width` wide inside `width`, `inset` from the
    /// edges when not centered.
    pub(crate) fn x(self, width: f32, text_width: f32, inset: f32) -> f32 {
        match self {
            TextAlignment::Left => inset,
            TextAlignment::Center => (width - text_width) * 0.5,
            TextAlignment::Right => width - text_width - inset,
        }
    }
}

/// Space added around measured text for the preferred size.
pub(crate) const TEXT_PADDING: f32 = 2.0;

/// Preferred size for a padded line of text.
pub(crate) fn padded(measured: Size) -> Size {
    Size::new(measured.width + TEXT_PADDING, measured.height + TEXT_PADDING)
}

/// Y that centers a line `height` tall inside `container`.
pub(crate) fn centered_y(container: f32, height: f32) -> f32 {
    (container - height) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_x() {
        assert_eq!(TextAlignment::Left.x(100.0, 40.0, 2.0), 2.0);
        assert_eq!(TextAlignment::Center.x(100.0, 40.0, 2.0), 30.0);
        assert_eq!(TextAlignment::Right.x(100.0, 40.0, 2.0), 58.0);
    }
}
