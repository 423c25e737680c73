//! Error types for Trellis.
//!
//! Contract violations that indicate a bug in the calling code (adding a
//! component twice, an unknown layout index) panic at the call site. The
//! fallible twins of those calls, and lookups through stale ids, report a
//! [`TreeError`] instead.

use thiserror::Error;

use crate::component::ComponentId;

/// Errors raised by [`ComponentTree`](crate::ComponentTree) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id does not refer to a live component.
    #[error("invalid component id: {0:?}")]
    InvalidComponent(ComponentId),

    /// The component already belongs to a panel.
    #[error("component {0:?} has already been added to a panel")]
    AlreadyAdded(ComponentId),

    /// A panel operation was invoked on a leaf component.
    #[error("component {0:?} is not a panel")]
    NotAPanel(ComponentId),

    /// The component is not a direct child of the panel.
    #[error("component {child:?} is not a child of panel {panel:?}")]
    NotAChild {
        panel: ComponentId,
        child: ComponentId,
    },

    /// Adding the component would make a panel its own ancestor.
    #[error("adding {0:?} would create a cycle in the component tree")]
    CycleDetected(ComponentId),

    /// A frame panel index was out of range.
    #[error("panel index {index} out of range (frame has {len} panels)")]
    PanelIndexOutOfRange { index: usize, len: usize },
}

/// A specialized `Result` type for component tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors raised while loading a [`FrameConfig`](crate::FrameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for a frame.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A specialized `Result` type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a [`Clipboard`](crate::clipboard::Clipboard).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// The clipboard holds no text.
    #[error("clipboard holds no text")]
    Empty,

    /// The platform clipboard could not be reached or refused the operation.
    #[error("clipboard error: {0}")]
    Platform(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(error: arboard::Error) -> Self {
        match error {
            arboard::Error::ContentNotAvailable => Self::Empty,
            other => Self::Platform(other.to_string()),
        }
    }
}
