//! Text measurement collaborator.
//!
//! Layout only needs a `(width, height)` pair per component. Text-bearing
//! widgets ask a [`TextMeasure`] for that pair; font rasterization lives in the
//! backend.

use unicode_segmentation::UnicodeSegmentation;

use crate::types::Size;

/// Supplies the extent of a single line of text.
pub trait TextMeasure {
    /// Size of `text` laid out on one line.
    fn measure(&self, text: &str) -> Size;

    /// Width of the first `graphemes` grapheme clusters of `text`.
    ///
    /// Used for caret placement.
    fn prefix_width(&self, text: &str, graphemes: usize) -> f32 {
        let end = text
            .grapheme_indices(true)
            .nth(graphemes)
            .map_or(text.len(), |(index, _)| index);
        self.measure(&text[..end]).width
    }
}

/// Monospace metrics: every grapheme cluster advances by the same amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl FixedAdvanceMetrics {
    pub const fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl TextMeasure for FixedAdvanceMetrics {
    fn measure(&self, text: &str) -> Size {
        let clusters = text.graphemes(true).count();
        Size::new(clusters as f32 * self.advance, self.line_height)
    }
}
