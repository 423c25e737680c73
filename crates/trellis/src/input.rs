//! Conversion from winit input types.
//!
//! The window collaborator hands us winit events; everything past the
//! [`Frame`](crate::Frame) boundary uses the toolkit's own [`Key`],
//! [`MouseButton`] and [`KeyboardModifiers`].

use winit::event::{
    ElementState, KeyEvent as WinitKeyEvent, Modifiers, MouseButton as WinitMouseButton,
};
use winit::keyboard::{Key as WinitKey, KeyLocation, ModifiersState, NamedKey};

use crate::events::{Key, KeyEvent, KeyboardModifiers, MouseButton};

/// Converts a winit logical key to a toolkit [`Key`].
pub fn from_winit_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => from_winit_named_key(named),
        WinitKey::Character(text) => from_character(text.as_str()),
        WinitKey::Unidentified(_) | WinitKey::Dead(_) => Key::Unknown,
    }
}

/// Converts a winit named key to a toolkit [`Key`].
pub fn from_winit_named_key(key: &NamedKey) -> Key {
    match key {
        // Navigation
        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::PageDown => Key::PageDown,

        // Editing
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Insert => Key::Insert,
        NamedKey::Enter => Key::Enter,
        NamedKey::Tab => Key::Tab,
        NamedKey::Space => Key::Space,
        NamedKey::Escape => Key::Escape,

        // Modifiers
        NamedKey::Shift => Key::Shift,
        NamedKey::Control => Key::Control,
        NamedKey::Alt => Key::Alt,
        NamedKey::Super => Key::Meta,

        _ => Key::Unknown,
    }
}

fn from_character(text: &str) -> Key {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(' '), None) => Key::Space,
        (Some(c), None) => Key::Character(c.to_lowercase().next().unwrap_or(c)),
        _ => Key::Unknown,
    }
}

/// Converts a winit mouse button. Buttons beyond the five common ones are
/// ignored.
pub fn from_winit_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back => Some(MouseButton::Back),
        WinitMouseButton::Forward => Some(MouseButton::Forward),
        WinitMouseButton::Other(_) => None,
    }
}

/// Converts a winit modifier state.
pub fn from_winit_modifiers_state(state: ModifiersState) -> KeyboardModifiers {
    KeyboardModifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Converts winit modifiers.
pub fn from_winit_modifiers(modifiers: &Modifiers) -> KeyboardModifiers {
    from_winit_modifiers_state(modifiers.state())
}

/// Converts a winit keyboard event into the toolkit's key events.
///
/// A press that carries committed text yields the key press followed by a
/// [`KeyEvent::TextInput`], matching how text fields expect to receive them.
/// Keypad Enter is reported as [`Key::NumpadEnter`].
pub fn from_winit_key_event(event: &WinitKeyEvent, modifiers: KeyboardModifiers) -> Vec<KeyEvent> {
    let mut key = from_winit_key(&event.logical_key);
    if key == Key::Enter && event.location == KeyLocation::Numpad {
        key = Key::NumpadEnter;
    }

    match event.state {
        ElementState::Pressed => {
            let mut events = vec![KeyEvent::KeyDown {
                key,
                modifiers,
                repeat: event.repeat,
            }];
            let text = event
                .text
                .as_ref()
                .map(|text| text.as_str())
                .filter(|text| !text.chars().any(char::is_control));
            if let Some(text) = text
                && !modifiers.control
                && !modifiers.meta
            {
                events.push(KeyEvent::text(text));
            }
            events
        }
        ElementState::Released => vec![KeyEvent::KeyUp { key, modifiers }],
    }
}
