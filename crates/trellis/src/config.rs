//! Frame configuration.
//!
//! [`FrameConfig`] describes the window a [`Frame`](crate::Frame) lives in and
//! the defaults its panels start with. It can be built in code or loaded from
//! TOML:
//!
//! ```toml
//! title = "Settings"
//! width = 640
//! height = 480
//! default_closing = true
//! background = { r = 0.9, g = 0.9, b = 0.9 }
//!
//! [traversal]
//! vertical_arrows = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use trellis_render::{Color, Size};
use winit::dpi::LogicalSize;
use winit::window::WindowAttributes;

use crate::error::ConfigResult;
use crate::traversal::TraversalConfig;

/// Window and panel defaults for a [`Frame`](crate::Frame).
///
/// # Example
///
/// ```
/// use trellis::FrameConfig;
///
/// let config = FrameConfig::new("Inventory")
///     .with_size(800, 600)
///     .with_default_closing(true);
/// assert_eq!(config.size().width, 800.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Window title.
    pub title: String,
    /// Initial width in logical pixels.
    pub width: u32,
    /// Initial height in logical pixels.
    pub height: u32,
    /// Whether the window may be resized.
    pub resizable: bool,
    /// Quit on Escape or on a close request.
    pub default_closing: bool,
    /// Background of panels created by the frame.
    pub background: Color,
    /// Keys driving traversal groups of every panel in the frame.
    pub traversal: TraversalConfig,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            title: "Frame".to_owned(),
            width: 512,
            height: 512,
            resizable: true,
            default_closing: false,
            background: Color::WHITE,
            traversal: TraversalConfig::default(),
        }
    }
}

impl FrameConfig {
    /// Default configuration with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_default_closing(mut self, default_closing: bool) -> Self {
        self.default_closing = default_closing;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_traversal(mut self, traversal: TraversalConfig) -> Self {
        self.traversal = traversal;
        self
    }

    /// Initial window size as a float [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: trellis_core::logging::targets::FRAME, path = %path.display(), title = %config.title, "loaded frame configuration");
        Ok(config)
    }

    /// Window attributes for creating the native window with winit.
    pub fn window_attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(self.resizable)
    }
}
