//! Clipboard access for text widgets.
//!
//! Widgets talk to a [`Clipboard`] through a [`SharedClipboard`] handle.
//! [`SystemClipboard`] is a thin wrapper around the `arboard` crate and is what
//! widgets use by default; [`MemoryClipboard`] keeps the text in process, for
//! headless frames and tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use trellis::clipboard::{Clipboard, MemoryClipboard, SharedClipboard};
//!
//! let clipboard: SharedClipboard = Arc::new(MemoryClipboard::new());
//! clipboard.set_text("Hello").unwrap();
//! assert_eq!(clipboard.get_text().unwrap(), "Hello");
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use trellis_core::logging::targets;

pub use crate::error::ClipboardError;

/// Text storage shared between widgets.
pub trait Clipboard: Send + Sync {
    /// The current clipboard text.
    ///
    /// # Errors
    ///
    /// [`ClipboardError::Empty`] if the clipboard holds no text, or a
    /// platform error if it cannot be read.
    fn get_text(&self) -> Result<String, ClipboardError>;

    /// Replace the clipboard contents with `text`.
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Shared handle to a clipboard.
pub type SharedClipboard = Arc<dyn Clipboard>;

/// The platform clipboard.
///
/// A platform handle is opened for each operation and dropped afterwards, so
/// the value itself holds no state and is cheap to share.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&self) -> Result<String, ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()?;
        Ok(clipboard.get_text()?)
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        tracing::trace!(target: targets::CLIPBOARD, len = text.len(), "copied to system clipboard");
        Ok(())
    }
}

/// An in-process clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard already holding `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(Some(text.into())),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&self) -> Result<String, ClipboardError> {
        self.text.lock().clone().ok_or(ClipboardError::Empty)
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.text.lock() = Some(text.to_owned());
        Ok(())
    }
}

/// The clipboard widgets use unless given another one.
pub fn system_clipboard() -> SharedClipboard {
    Arc::new(SystemClipboard::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_starts_empty() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.get_text(), Err(ClipboardError::Empty));
        clipboard.set_text("first").unwrap();
        clipboard.set_text("second").unwrap();
        assert_eq!(clipboard.get_text().unwrap(), "second");
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let clipboard: SharedClipboard = Arc::new(MemoryClipboard::with_text("seed"));
        let other = clipboard.clone();
        other.set_text("changed").unwrap();
        assert_eq!(clipboard.get_text().unwrap(), "changed");
    }

    #[test]
    fn test_system_clipboard_creation() {
        // Clipboard access depends on the environment; only check it does not panic.
        let _ = SystemClipboard::new().get_text();
    }

    #[test]
    fn test_error_display() {
        let error = ClipboardError::Platform("locked".to_owned());
        assert_eq!(error.to_string(), "clipboard error: locked");
    }
}
