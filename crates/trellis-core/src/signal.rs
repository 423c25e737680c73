//! Listener signals for Trellis.
//!
//! Every component exposes its listener categories (mouse, keyboard, focus,
//! action, panel change) as a [`Signal`]. A signal is an ordered list of
//! callbacks: emitting it invokes every connected slot in the order the slots
//! were connected.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The multicast listener list
//! - [`ConnectionId`] - Identifier returned by [`Signal::connect`]
//! - [`Connection`] - Disposable token that can disconnect its slot later
//! - [`ConnectionGuard`] - Token that disconnects when dropped
//!
//! # Threading
//!
//! The toolkit dispatches events on a single thread. Signals are still
//! `Send + Sync` so that the component tree can be moved to the thread that
//! owns the window.
//!
//! # Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Connected slots plus the order they were connected in.
///
/// Slot keys are reused by the slot map after removal, so invocation order is
/// kept separately.
struct Connections<Args> {
    slots: SlotMap<ConnectionId, Slot<Args>>,
    order: Vec<ConnectionId>,
}

struct SignalInner<Args> {
    connections: Mutex<Connections<Args>>,
    blocked: AtomicBool,
}

impl<Args> SignalInner<Args> {
    fn remove(&self, id: ConnectionId) -> bool {
        let mut connections = self.connections.lock();
        if connections.slots.remove(id).is_some() {
            connections.order.retain(|existing| *existing != id);
            true
        } else {
            false
        }
    }
}

/// Type-erased access used by [`Connection`] so tokens do not carry the
/// signal's argument type.
trait ConnectionTarget: Send + Sync {
    fn disconnect(&self, id: ConnectionId) -> bool;
    fn contains(&self, id: ConnectionId) -> bool;
}

impl<Args: 'static> ConnectionTarget for SignalInner<Args> {
    fn disconnect(&self, id: ConnectionId) -> bool {
        self.remove(id)
    }

    fn contains(&self, id: ConnectionId) -> bool {
        self.connections.lock().slots.contains_key(id)
    }
}

/// An ordered multicast list of callbacks.
///
/// When a signal is emitted, all connected slots are invoked with the provided
/// arguments, in registration order.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(ComponentId, bool)` for several.
pub struct Signal<Args> {
    inner: Arc<SignalInner<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.inner.connections.lock().order.len())
            .field("blocked", &self.inner.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalInner {
                connections: Mutex::new(Connections {
                    slots: SlotMap::with_key(),
                    order: Vec::new(),
                }),
                blocked: AtomicBool::new(false),
            }),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use trellis_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.inner.connections.lock();
        let id = connections.slots.insert(Arc::new(slot));
        connections.order.push(id);
        id
    }

    /// Connect a slot and return a disposable [`Connection`] token.
    ///
    /// The token does not keep the signal alive. Dropping it leaves the slot
    /// connected.
    pub fn connect_handle<F>(&self, slot: F) -> Connection
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        let target: Arc<dyn ConnectionTarget> = self.inner.clone();
        Connection {
            id,
            target: Arc::downgrade(&target),
        }
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connect_handle(slot).into_guard()
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.inner.remove(id)
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        let mut connections = self.inner.connections.lock();
        connections.slots.clear();
        connections.order.clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.inner.connections.lock().order.len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.inner.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.inner.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in registration order.
    ///
    /// The slot list is snapshotted before any slot runs, so a slot may connect
    /// or disconnect slots (including itself) without deadlocking. Changes take
    /// effect on the next emission.
    #[tracing::instrument(skip_all, target = "trellis_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = {
            let connections = self.inner.connections.lock();
            connections
                .order
                .iter()
                .filter_map(|id| connections.slots.get(*id).cloned())
                .collect()
        };
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// A disposable token for one connected slot.
///
/// Returned by the component `add_*_listener` methods. Call
/// [`disconnect`](Self::disconnect) to remove the slot. The token holds a weak
/// reference, so it stays valid (and becomes inert) after the signal's owner is
/// destroyed.
#[derive(Clone)]
pub struct Connection {
    id: ConnectionId,
    target: Weak<dyn ConnectionTarget>,
}

impl Connection {
    /// The underlying connection id.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Remove the slot from its signal.
    ///
    /// Returns `false` if it was already disconnected or the signal is gone.
    pub fn disconnect(&self) -> bool {
        self.target
            .upgrade()
            .is_some_and(|target| target.disconnect(self.id))
    }

    /// Whether the slot is still connected.
    pub fn is_connected(&self) -> bool {
        self.target
            .upgrade()
            .is_some_and(|target| target.contains(self.id))
    }

    /// Convert into a guard that disconnects on drop.
    pub fn into_guard(self) -> ConnectionGuard {
        ConnectionGuard {
            connection: Some(self),
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// RAII guard that disconnects its slot when dropped.
///
/// # Example
///
/// ```
/// use trellis_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);
/// }
/// signal.emit(43);
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
#[derive(Debug)]
#[must_use = "dropping the guard disconnects the slot immediately"]
pub struct ConnectionGuard {
    connection: Option<Connection>,
}

impl ConnectionGuard {
    /// Give up the guard without disconnecting.
    pub fn release(mut self) -> Option<Connection> {
        self.connection.take()
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.disconnect();
        }
    }
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
static_assertions::assert_impl_all!(Connection: Send, Sync);
