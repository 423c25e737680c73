//! Core systems for Trellis.
//!
//! This crate provides the foundational pieces shared by the Trellis widget
//! toolkit:
//!
//! - **Signals**: Ordered multicast listener lists with disposable connection
//!   tokens
//! - **Logging**: `tracing` target names and a tree debug formatter
//!
//! # Signal Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let clicked = Signal::<u32>::new();
//!
//! let connection = clicked.connect_handle(|count| {
//!     println!("clicked {} times", count);
//! });
//!
//! clicked.emit(1);
//! connection.disconnect();
//! clicked.emit(2); // nothing printed
//! ```

pub mod logging;
pub mod signal;

pub use logging::{DebugTree, TreeDebug, TreeFormatOptions, TreeStyle};
pub use signal::{Connection, ConnectionGuard, ConnectionId, Signal};
