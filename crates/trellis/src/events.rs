//! Input event types routed through the component tree.
//!
//! Mouse positions are always expressed in the receiving component's local
//! space with a bottom-left origin. The [`Frame`](crate::Frame) performs the one
//! vertical flip from window coordinates; panels subtract each child's location
//! before forwarding.

use trellis_render::Point;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
    /// Additional button 1 (e.g., browser back).
    Back = 3,
    /// Additional button 2 (e.g., browser forward).
    Forward = 4,
}

/// What happened to the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// The pointer moved.
    Motion,
    /// A button was pressed.
    ButtonDown(MouseButton),
    /// A button was released.
    ButtonUp(MouseButton),
}

/// A mouse event in the receiver's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub position: Point,
}

impl MouseEvent {
    /// Pointer motion to `(x, y)`.
    pub fn motion(x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::Motion,
            position: Point::new(x, y),
        }
    }

    /// Button press at `(x, y)`.
    pub fn button_down(button: MouseButton, x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::ButtonDown(button),
            position: Point::new(x, y),
        }
    }

    /// Button release at `(x, y)`.
    pub fn button_up(button: MouseButton, x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::ButtonUp(button),
            position: Point::new(x, y),
        }
    }

    /// The same event expressed relative to a child located at `origin`.
    pub fn translated(&self, origin: Point) -> Self {
        Self {
            kind: self.kind,
            position: self.position - origin,
        }
    }

    /// The button involved, if this is a press or release.
    pub fn button(&self) -> Option<MouseButton> {
        match self.kind {
            MouseEventKind::ButtonDown(button) | MouseEventKind::ButtonUp(button) => Some(button),
            MouseEventKind::Motion => None,
        }
    }

    /// Whether this is a press of `button`.
    pub fn is_press(&self, button: MouseButton) -> bool {
        self.kind == MouseEventKind::ButtonDown(button)
    }

    /// Whether this is a release of `button`.
    pub fn is_release(&self, button: MouseButton) -> bool {
        self.kind == MouseEventKind::ButtonUp(button)
    }
}

/// Logical keys the toolkit reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing
    Backspace,
    Delete,
    Insert,
    Enter,
    Tab,
    Space,

    // Control
    Escape,

    // Numpad
    NumpadEnter,

    // Modifiers
    Shift,
    Control,
    Alt,
    Meta,

    /// A printable character key, lowercased.
    Character(char),

    /// Unknown/unmapped key.
    Unknown,
}

impl Key {
    /// Return and keypad Enter.
    pub fn is_enter(&self) -> bool {
        matches!(self, Key::Enter | Key::NumpadEnter)
    }

    /// Whether this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }
}

/// A keyboard or text-input event.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyEvent {
    /// A key was pressed (or auto-repeated).
    KeyDown {
        key: Key,
        modifiers: KeyboardModifiers,
        repeat: bool,
    },
    /// A key was released.
    KeyUp {
        key: Key,
        modifiers: KeyboardModifiers,
    },
    /// Committed text, already composed by the platform input method.
    TextInput { text: String },
}

impl KeyEvent {
    /// Key press without modifiers.
    pub fn key_down(key: Key) -> Self {
        KeyEvent::KeyDown {
            key,
            modifiers: KeyboardModifiers::NONE,
            repeat: false,
        }
    }

    /// Key press with modifiers.
    pub fn key_down_with(key: Key, modifiers: KeyboardModifiers) -> Self {
        KeyEvent::KeyDown {
            key,
            modifiers,
            repeat: false,
        }
    }

    /// Key release without modifiers.
    pub fn key_up(key: Key) -> Self {
        KeyEvent::KeyUp {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Text input.
    pub fn text(text: impl Into<String>) -> Self {
        KeyEvent::TextInput { text: text.into() }
    }

    /// The key involved, if any.
    pub fn key(&self) -> Option<Key> {
        match self {
            KeyEvent::KeyDown { key, .. } | KeyEvent::KeyUp { key, .. } => Some(*key),
            KeyEvent::TextInput { .. } => None,
        }
    }

    /// Modifiers held, if this is a key event.
    pub fn modifiers(&self) -> KeyboardModifiers {
        match self {
            KeyEvent::KeyDown { modifiers, .. } | KeyEvent::KeyUp { modifiers, .. } => *modifiers,
            KeyEvent::TextInput { .. } => KeyboardModifiers::NONE,
        }
    }

    /// Whether this is a press of `key`.
    pub fn is_key_down(&self, key: Key) -> bool {
        matches!(self, KeyEvent::KeyDown { key: pressed, .. } if *pressed == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_into_child_space() {
        let event = MouseEvent::button_down(MouseButton::Left, 30.0, 45.0);
        let local = event.translated(Point::new(10.0, 40.0));
        assert_eq!(local.position, Point::new(20.0, 5.0));
        assert_eq!(local.kind, event.kind);
    }

    #[test]
    fn test_button_accessors() {
        let up = MouseEvent::button_up(MouseButton::Right, 0.0, 0.0);
        assert_eq!(up.button(), Some(MouseButton::Right));
        assert!(up.is_release(MouseButton::Right));
        assert!(!up.is_press(MouseButton::Right));
        assert_eq!(MouseEvent::motion(1.0, 1.0).button(), None);
    }

    #[test]
    fn test_key_event_accessors() {
        let tab = KeyEvent::key_down_with(Key::Tab, KeyboardModifiers::SHIFT);
        assert!(tab.is_key_down(Key::Tab));
        assert!(tab.modifiers().shift);
        assert_eq!(KeyEvent::text("a").key(), None);
        assert!(Key::NumpadEnter.is_enter());
        assert!(!KeyEvent::key_up(Key::Tab).is_key_down(Key::Tab));
    }
}
