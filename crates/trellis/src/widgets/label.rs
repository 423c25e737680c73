//! Static text.

use std::time::Duration;

use trellis_render::{Color, Point, Renderer};

use super::{SharedTextMeasure, TextAlignment, centered_y, padded};
use crate::component::{ComponentBase, Drawable, Widget, WidgetContext};

/// One line of text on a transparent background.
pub struct Label {
    text: String,
    metrics: SharedTextMeasure,
    alignment: TextAlignment,
    text_color: Color,
}

impl Label {
    pub fn new(text: impl Into<String>, metrics: SharedTextMeasure) -> Self {
        Self {
            text: text.into(),
            metrics,
            alignment: TextAlignment::Center,
            text_color: Color::BLACK,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Change the text and resize to fit it.
    pub fn set_text(&mut self, cx: &mut WidgetContext<'_>, text: impl Into<String>) {
        self.text = text.into();
        cx.set_preferred_size(padded(self.metrics.measure(&self.text)));
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
}

impl Widget for Label {
    fn type_name(&self) -> &'static str {
        "Label"
    }

    fn drawable(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }

    fn attached(&mut self, cx: &mut WidgetContext<'_>) {
        cx.set_background_color(Color::TRANSPARENT);
        cx.set_border_color(Color::TRANSPARENT);
        cx.set_preferred_size(padded(self.metrics.measure(&self.text)));
    }
}

impl Drawable for Label {
    fn draw(&mut self, base: &ComponentBase, renderer: &mut dyn Renderer, _delta: Duration) {
        let size = base.size();
        let text = self.metrics.measure(&self.text);
        let origin = Point::new(
            self.alignment.x(size.width, text.width, 1.0),
            centered_y(size.height, text.height),
        );
        renderer.draw_text(&self.text, origin, self.text_color);
    }
}
