//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use parking_lot::Mutex;
use trellis::{
    ComponentId, ComponentTree, LayoutContainer, LayoutManager, MouseEvent, MouseTarget, Widget, WidgetContext,
};
use trellis_render::Renderer;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary. Filter with
/// `RUST_LOG`, e.g. `RUST_LOG=trellis::dispatch=trace`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Shared, ordered event log.
pub type Log = Arc<Mutex<Vec<String>>>;

pub fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

/// Widget recording every mouse notification it receives, prefixed with its
/// name.
pub struct Spy {
    name: &'static str,
    log: Log,
}

impl Spy {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
        }
    }
}

impl Widget for Spy {
    fn type_name(&self) -> &'static str {
        "Spy"
    }

    fn mouse_target(&mut self) -> Option<&mut dyn MouseTarget> {
        Some(self)
    }
}

impl MouseTarget for Spy {
    fn handle_mouse(&mut self, _cx: &mut WidgetContext<'_>, event: &MouseEvent) {
        let kind = match event.kind {
            trellis::MouseEventKind::Motion => "motion",
            trellis::MouseEventKind::ButtonDown(_) => "down",
            trellis::MouseEventKind::ButtonUp(_) => "up",
        };
        self.log.lock().push(format!("{} {kind}", self.name));
    }

    fn mouse_motion_leave(&mut self, _cx: &mut WidgetContext<'_>) {
        self.log.lock().push(format!("{} leave", self.name));
    }

    fn mouse_outside_up(&mut self, _cx: &mut WidgetContext<'_>) {
        self.log.lock().push(format!("{} outside-up", self.name));
    }
}

/// Layout manager that counts its passes and delegates to another one.
pub struct CountingLayout<L> {
    inner: L,
    passes: Arc<AtomicUsize>,
}

impl<L: LayoutManager> CountingLayout<L> {
    pub fn new(inner: L) -> (Self, Arc<AtomicUsize>) {
        let passes = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                passes: passes.clone(),
            },
            passes,
        )
    }
}

impl<L: LayoutManager> LayoutManager for CountingLayout<L> {
    fn layout_container(&self, container: &mut LayoutContainer<'_>) {
        self.passes.fetch_add(1, Ordering::SeqCst);
        self.inner.layout_container(container);
    }
}

/// Ids of the direct children of `panel` that hold focus.
pub fn focused_children(tree: &ComponentTree, panel: ComponentId) -> Vec<ComponentId> {
    tree.children(panel)
        .iter()
        .copied()
        .filter(|&child| tree.component(child).unwrap().has_focus())
        .collect()
}

/// Draw `id` into a throwaway renderer.
pub fn draw(tree: &mut ComponentTree, id: ComponentId, renderer: &mut dyn Renderer) {
    tree.draw(id, renderer, Duration::ZERO).unwrap();
}
