//! Single-line text entry.
//!
//! The caret is a grapheme index, so combining sequences and emoji move and
//! erase as one unit. Text input arrives already composed as
//! [`KeyEvent::TextInput`]; editing keys arrive as key presses.
//!
//! Ctrl+C copies the whole text to the field's clipboard, Ctrl+X copies it
//! and clears the field, and Ctrl+V inserts the clipboard text at the caret.

use std::time::Duration;

use trellis_core::logging::targets;
use trellis_render::{Color, Point, Rect, Renderer, Size};
use unicode_segmentation::UnicodeSegmentation;

use super::{SharedTextMeasure, TextAlignment, centered_y};
use crate::clipboard::{SharedClipboard, system_clipboard};
use crate::component::{ComponentBase, Drawable, KeyTarget, Widget, WidgetContext};
use crate::events::{Key, KeyEvent, KeyboardModifiers};

/// Caret visible for the first half of each blink period.
const BLINK_ON: Duration = Duration::from_millis(500);
const BLINK_PERIOD: Duration = Duration::from_secs(1);

/// Preferred width of a new field.
const DEFAULT_WIDTH: f32 = 150.0;
/// Distance between the text and the field's edge.
const TEXT_INSET: f32 = 2.0;

/// Editable single line of text.
pub struct TextField {
    text: String,
    caret: usize,
    editable: bool,
    metrics: SharedTextMeasure,
    alignment: TextAlignment,
    text_color: Color,
    blink: Duration,
    clipboard: SharedClipboard,
}

impl TextField {
    /// Background of a new field.
    pub const BACKGROUND: Color = Color::from_rgb(0.8, 0.8, 0.8);

    /// A field holding `text` with the caret at its end.
    pub fn new(text: impl Into<String>, metrics: SharedTextMeasure) -> Self {
        let text = text.into();
        let caret = text.graphemes(true).count();
        Self {
            text,
            caret,
            editable: true,
            metrics,
            alignment: TextAlignment::Left,
            text_color: Color::BLACK,
            blink: Duration::ZERO,
            clipboard: system_clipboard(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and move the caret to its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.len();
    }

    /// Caret position in grapheme clusters from the start.
    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// A read-only field ignores every key, Enter included.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: TextAlignment) {
        self.alignment = alignment;
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    /// Use `clipboard` for copy, cut and paste instead of the system one.
    pub fn set_clipboard(&mut self, clipboard: SharedClipboard) {
        self.clipboard = clipboard;
    }

    pub fn with_clipboard(mut self, clipboard: SharedClipboard) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn clipboard(&self) -> &SharedClipboard {
        &self.clipboard
    }

    fn len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Byte offset of grapheme `index`, or the end of the text.
    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn insert(&mut self, input: &str) {
        let offset = self.byte_offset(self.caret);
        self.text.insert_str(offset, input);
        // Inserted text may merge with its neighbors into fewer clusters.
        let after = self.text[offset + input.len()..].graphemes(true).count();
        self.caret = self.len() - after;
    }

    fn erase(&mut self, index: usize) {
        if index >= self.len() {
            return;
        }
        let start = self.byte_offset(index);
        let end = self.byte_offset(index + 1);
        self.text.replace_range(start..end, "");
    }

    fn copy(&self) -> bool {
        match self.clipboard.set_text(&self.text) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(target: targets::CLIPBOARD, %error, "copy failed");
                false
            }
        }
    }

    fn cut(&mut self) {
        if self.copy() {
            self.text.clear();
            self.caret = 0;
        }
    }

    fn paste(&mut self) {
        match self.clipboard.get_text() {
            Ok(text) => {
                // A single-line field keeps no line breaks or other controls.
                let text: String = text.chars().filter(|c| !c.is_control()).collect();
                self.insert(&text);
            }
            Err(error) => tracing::debug!(target: targets::CLIPBOARD, %error, "nothing to paste"),
        }
    }

    /// Apply an editing key. Returns `false` for keys the field ignores.
    fn handle_key(&mut self, cx: &mut WidgetContext<'_>, key: Key, modifiers: KeyboardModifiers) -> bool {
        match key {
            Key::Character('c') if modifiers.control => {
                self.copy();
            }
            Key::Character('x') if modifiers.control => self.cut(),
            Key::Character('v') if modifiers.control => self.paste(),
            Key::Home => self.caret = 0,
            Key::End => self.caret = self.len(),
            Key::ArrowLeft => self.caret = self.caret.saturating_sub(1),
            Key::ArrowRight => self.caret = (self.caret + 1).min(self.len()),
            Key::Backspace if self.caret > 0 => {
                self.caret -= 1;
                self.erase(self.caret);
            }
            Key::Backspace => {}
            Key::Delete => self.erase(self.caret),
            key if key.is_enter() => cx.do_action(),
            _ => return false,
        }
        true
    }
}

impl Widget for TextField {
    fn type_name(&self) -> &'static str {
        "TextField"
    }

    fn drawable(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }

    fn key_target(&mut self) -> Option<&mut dyn KeyTarget> {
        Some(self)
    }

    fn attached(&mut self, cx: &mut WidgetContext<'_>) {
        cx.set_background_color(Self::BACKGROUND);
        let line = self.metrics.measure("").height;
        cx.set_preferred_size(Size::new(DEFAULT_WIDTH, line + 2.0 * TEXT_INSET));
    }
}

impl KeyTarget for TextField {
    fn handle_keyboard(&mut self, cx: &mut WidgetContext<'_>, event: &KeyEvent) -> bool {
        if !self.editable {
            return false;
        }
        match event {
            KeyEvent::TextInput { text } => {
                self.insert(text);
                true
            }
            KeyEvent::KeyDown { key, modifiers, .. } => {
                // Any key press restarts the blink so the caret shows while typing.
                self.blink = Duration::ZERO;
                self.handle_key(cx, *key, *modifiers)
            }
            KeyEvent::KeyUp { .. } => false,
        }
    }
}

impl Drawable for TextField {
    fn draw(&mut self, base: &ComponentBase, renderer: &mut dyn Renderer, delta: Duration) {
        let size = base.size();
        let text = self.metrics.measure(&self.text);
        let x = self.alignment.x(size.width, text.width, TEXT_INSET);
        let y = centered_y(size.height, text.height);
        renderer.draw_text(&self.text, Point::new(x, y), self.text_color);

        if !self.editable {
            return;
        }
        if !base.has_focus() {
            self.blink = Duration::ZERO;
            return;
        }
        self.blink += delta;
        if self.blink < BLINK_ON {
            let caret_x = x + self.metrics.prefix_width(&self.text, self.caret) + 1.0;
            renderer.fill_rect(Rect::new(caret_x, y, 1.0, text.height), self.text_color);
        } else if self.blink > BLINK_PERIOD {
            self.blink = Duration::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use trellis_render::{DrawCommand, FixedAdvanceMetrics, RecordingRenderer};

    use super::*;
    use crate::ComponentTree;
    use crate::clipboard::{Clipboard, MemoryClipboard};
    use crate::component::ComponentId;

    fn field(tree: &mut ComponentTree, text: &str) -> ComponentId {
        let id = tree.create_component(TextField::new(text, Arc::new(FixedAdvanceMetrics::new(10.0, 12.0))));
        tree.set_focus(id, true).unwrap();
        id
    }

    fn press(tree: &mut ComponentTree, id: ComponentId, key: Key) {
        tree.handle_keyboard(id, &KeyEvent::key_down(key)).unwrap();
    }

    fn state(tree: &ComponentTree, id: ComponentId) -> (String, usize) {
        let field = tree.widget::<TextField>(id).unwrap();
        (field.text().to_owned(), field.caret())
    }

    #[test]
    fn test_typing_and_caret_movement() {
        let mut tree = ComponentTree::new();
        let id = field(&mut tree, "ac");
        assert_eq!(tree.component(id).unwrap().preferred_size(), Size::new(150.0, 16.0));

        press(&mut tree, id, Key::ArrowLeft);
        tree.handle_keyboard(id, &KeyEvent::text("b")).unwrap();
        assert_eq!(state(&tree, id), ("abc".to_owned(), 2));

        press(&mut tree, id, Key::Home);
        press(&mut tree, id, Key::ArrowLeft);
        assert_eq!(state(&tree, id).1, 0);
        press(&mut tree, id, Key::End);
        press(&mut tree, id, Key::ArrowRight);
        assert_eq!(state(&tree, id).1, 3);
    }

    #[test]
    fn test_erasing_whole_graphemes() {
        let mut tree = ComponentTree::new();
        let id = field(&mut tree, "ne\u{301}e");
        assert_eq!(state(&tree, id).1, 3);

        press(&mut tree, id, Key::ArrowLeft);
        press(&mut tree, id, Key::Backspace);
        assert_eq!(state(&tree, id), ("ne".to_owned(), 1));

        press(&mut tree, id, Key::Delete);
        assert_eq!(state(&tree, id), ("n".to_owned(), 1));
        press(&mut tree, id, Key::Delete);
        press(&mut tree, id, Key::Home);
        press(&mut tree, id, Key::Backspace);
        assert_eq!(state(&tree, id), ("n".to_owned(), 0));
    }

    #[test]
    fn test_combining_input_joins_cluster() {
        let mut tree = ComponentTree::new();
        let id = field(&mut tree, "e");
        tree.handle_keyboard(id, &KeyEvent::text("\u{301}")).unwrap();
        assert_eq!(state(&tree, id), ("e\u{301}".to_owned(), 1));
    }

    #[test]
    fn test_enter_fires_action_unless_read_only() {
        let mut tree = ComponentTree::new();
        let id = field(&mut tree, "x");
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        tree.component(id).unwrap().add_action_listener(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        press(&mut tree, id, Key::Enter);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tree.widget_mut::<TextField>(id).unwrap().set_editable(false);
        press(&mut tree, id, Key::Enter);
        tree.handle_keyboard(id, &KeyEvent::text("y")).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(state(&tree, id).0, "x");
    }

    fn shortcut(tree: &mut ComponentTree, id: ComponentId, letter: char) {
        let event = KeyEvent::key_down_with(Key::Character(letter), KeyboardModifiers::CTRL);
        tree.handle_keyboard(id, &event).unwrap();
    }

    fn with_memory_clipboard(tree: &mut ComponentTree, id: ComponentId, text: &str) -> Arc<MemoryClipboard> {
        let clipboard = Arc::new(MemoryClipboard::with_text(text));
        tree.widget_mut::<TextField>(id).unwrap().set_clipboard(clipboard.clone());
        clipboard
    }

    #[test]
    fn test_copy_cut_and_paste() {
        let mut tree = ComponentTree::new();
        let id = field(&mut tree, "hello");
        let clipboard = with_memory_clipboard(&mut tree, id, "");

        shortcut(&mut tree, id, 'c');
        assert_eq!(clipboard.get_text().unwrap(), "hello");
        assert_eq!(state(&tree, id), ("hello".to_owned(), 5));

        shortcut(&mut tree, id, 'x');
        assert_eq!(clipboard.get_text().unwrap(), "hello");
        assert_eq!(state(&tree, id), (String::new(), 0));

        tree.handle_keyboard(id, &KeyEvent::text("[]")).unwrap();
        press(&mut tree, id, Key::ArrowLeft);
        shortcut(&mut tree, id, 'v');
        assert_eq!(state(&tree, id), ("[hello]".to_owned(), 6));
    }

    #[test]
    fn test_paste_drops_line_breaks() {
        let mut tree = ComponentTree::new();
        let id = field(&mut tree, "");
        with_memory_clipboard(&mut tree, id, "one\ntwo\r\n");
        shortcut(&mut tree, id, 'v');
        assert_eq!(state(&tree, id), ("onetwo".to_owned(), 6));
    }

    #[test]
    fn test_letters_without_control_are_not_shortcuts() {
        let mut tree = ComponentTree::new();
        let id = field(&mut tree, "keep");
        let clipboard = with_memory_clipboard(&mut tree, id, "other");

        press(&mut tree, id, Key::Character('x'));
        press(&mut tree, id, Key::Character('v'));
        assert_eq!(state(&tree, id).0, "keep");
        assert_eq!(clipboard.get_text().unwrap(), "other");
    }

    #[test]
    fn test_read_only_field_ignores_clipboard_keys() {
        let mut tree = ComponentTree::new();
        let id = field(&mut tree, "fixed");
        let clipboard = with_memory_clipboard(&mut tree, id, "pasted");
        tree.widget_mut::<TextField>(id).unwrap().set_editable(false);

        shortcut(&mut tree, id, 'x');
        shortcut(&mut tree, id, 'v');
        assert_eq!(state(&tree, id).0, "fixed");
        assert_eq!(clipboard.get_text().unwrap(), "pasted");
    }

    #[test]
    fn test_caret_blinks_with_delta() {
        let mut tree = ComponentTree::new();
        let id = field(&mut tree, "ab");
        let carets = |tree: &mut ComponentTree, delta: u64| {
            let mut renderer = RecordingRenderer::new();
            tree.draw(id, &mut renderer, Duration::from_millis(delta)).unwrap();
            renderer
                .commands()
                .iter()
                .filter(|command| matches!(command, DrawCommand::FillRect { rect, .. } if rect.width() == 1.0))
                .count()
        };

        assert_eq!(carets(&mut tree, 100), 1);
        assert_eq!(carets(&mut tree, 500), 0);
        assert_eq!(carets(&mut tree, 500), 0);
        // Past the period the blink restarts.
        assert_eq!(carets(&mut tree, 100), 1);

        tree.set_focus(id, false).unwrap();
        assert_eq!(carets(&mut tree, 100), 0);
    }
}
