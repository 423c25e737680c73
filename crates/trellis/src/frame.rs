//! The root container bound to a window.
//!
//! A [`Frame`] owns the [`ComponentTree`], a list of top-level panels (one of
//! them current) and a queue of window events. The host's event loop feeds it
//! winit events with [`Frame::handle_window_event`] (or synthetic ones with
//! [`Frame::push_event`]) and calls [`Frame::update`] once per frame; `update`
//! routes queued events into the current panel and draws it.
//!
//! Window coordinates have a top-left origin. The frame flips the y axis once,
//! on entry, so everything below it works in bottom-left space.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use trellis::{BorderLayout, Frame, FrameConfig, FrameEvent};
//! use trellis_render::{RecordingRenderer, Size};
//!
//! let mut frame = Frame::new(FrameConfig::new("Demo").with_size(320, 240));
//! let status = frame.tree_mut().create_empty();
//! frame.tree_mut().set_preferred_size(status, Size::new(0.0, 20.0)).unwrap();
//! frame.add(BorderLayout::SOUTH, status);
//!
//! frame.push_event(FrameEvent::Resized { width: 640, height: 480 });
//! let mut renderer = RecordingRenderer::new();
//! frame.update(Duration::from_millis(16), &mut renderer).unwrap();
//!
//! assert_eq!(frame.tree().component(status).unwrap().size(), Size::new(640.0, 20.0));
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use trellis_core::logging::{span_names, targets};
use trellis_core::{Connection, Signal};
use trellis_render::{Color, Point, Renderer, Size};
use winit::event::{ElementState, WindowEvent};

use crate::component::ComponentId;
use crate::config::FrameConfig;
use crate::error::{TreeError, TreeResult};
use crate::events::{Key, KeyboardModifiers, MouseButton, MouseEvent};
use crate::input;
use crate::layout::{BorderLayout, LayoutManager};
use crate::tree::ComponentTree;

/// A window-level event, in window coordinates (top-left origin).
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    MouseMotion { x: f32, y: f32 },
    MouseButton {
        button: MouseButton,
        pressed: bool,
        x: f32,
        y: f32,
    },
    Key(crate::events::KeyEvent),
    Resized { width: u32, height: u32 },
    MouseLeftWindow,
    CloseRequested,
}

impl FrameEvent {
    /// Whether this event concerns the window itself rather than input.
    pub fn is_window_event(&self) -> bool {
        matches!(
            self,
            FrameEvent::Resized { .. } | FrameEvent::MouseLeftWindow | FrameEvent::CloseRequested
        )
    }
}

/// Root container: a component tree, its top-level panels and an event queue.
pub struct Frame {
    tree: ComponentTree,
    panels: Vec<ComponentId>,
    current: usize,
    size: Size,
    background: Color,
    default_closing: bool,
    quit: bool,
    queue: VecDeque<FrameEvent>,
    cursor: Point,
    modifiers: KeyboardModifiers,
    window_listeners: Signal<FrameEvent>,
    event_listeners: Signal<FrameEvent>,
    update_listeners: Signal<Duration>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(FrameConfig::default())
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("tree", &self.tree)
            .field("panels", &self.panels)
            .field("current", &self.current)
            .field("size", &self.size)
            .field("queued", &self.queue.len())
            .field("quit", &self.quit)
            .finish()
    }
}

impl Frame {
    /// Create a frame with one white [`BorderLayout`] panel sized to the
    /// window.
    pub fn new(config: FrameConfig) -> Self {
        let mut frame = Self {
            tree: ComponentTree::with_traversal_defaults(config.traversal),
            panels: Vec::new(),
            current: 0,
            size: config.size(),
            background: config.background,
            default_closing: config.default_closing,
            quit: false,
            queue: VecDeque::new(),
            cursor: Point::ZERO,
            modifiers: KeyboardModifiers::NONE,
            window_listeners: Signal::new(),
            event_listeners: Signal::new(),
            update_listeners: Signal::new(),
        };
        frame.add_panel_back();
        if let Err(error) = frame.resize_current() {
            tracing::warn!(target: targets::FRAME, %error, "failed to size the initial panel");
        }
        tracing::debug!(target: targets::FRAME, title = %config.title, size = ?frame.size, "frame created");
        frame
    }

    #[inline]
    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    /// Window size in logical pixels.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    // =========================================================================
    // Panels
    // =========================================================================

    /// Append a new white [`BorderLayout`] panel and return its index.
    pub fn add_panel_back(&mut self) -> usize {
        let panel = self.tree.create_panel_with_layout(Box::new(BorderLayout));
        self.init_panel(panel);
        self.panels.push(panel);
        self.panels.len() - 1
    }

    /// Append an existing panel and return its index.
    pub fn push_back_panel(&mut self, panel: ComponentId) -> TreeResult<usize> {
        if !self.tree.is_panel(panel) {
            return Err(match self.tree.contains(panel) {
                true => TreeError::NotAPanel(panel),
                false => TreeError::InvalidComponent(panel),
            });
        }
        if self.tree.component(panel)?.is_added() {
            return Err(TreeError::AlreadyAdded(panel));
        }
        self.panels.push(panel);
        Ok(self.panels.len() - 1)
    }

    fn init_panel(&mut self, panel: ComponentId) {
        // Fresh panels are live, these cannot fail.
        let _ = self.tree.set_background_color(panel, self.background);
        let _ = self.tree.set_preferred_size(panel, self.size);
    }

    /// Switch the current panel.
    ///
    /// The old panel is told it became inactive, the new one is resized to
    /// the window and then told it became active (which validates it).
    pub fn set_current_panel(&mut self, index: usize) -> TreeResult<()> {
        if index >= self.panels.len() {
            return Err(TreeError::PanelIndexOutOfRange {
                index,
                len: self.panels.len(),
            });
        }
        if index == self.current {
            return Ok(());
        }
        self.tree.panel_changed(self.current_panel(), false)?;
        self.current = index;
        self.resize_current()?;
        tracing::debug!(target: targets::FRAME, index, "current panel changed");
        self.tree.panel_changed(self.current_panel(), true)
    }

    #[inline]
    pub fn current_panel(&self) -> ComponentId {
        self.panels[self.current]
    }

    #[inline]
    pub fn current_panel_index(&self) -> usize {
        self.current
    }

    pub fn panels(&self) -> &[ComponentId] {
        &self.panels
    }

    /// Add a component to the current panel.
    ///
    /// # Panics
    ///
    /// Same conditions as [`ComponentTree::add`].
    #[track_caller]
    pub fn add(&mut self, layout_index: i32, child: ComponentId) -> ComponentId {
        let panel = self.current_panel();
        self.tree.add(panel, layout_index, child)
    }

    pub fn try_add(&mut self, layout_index: i32, child: ComponentId) -> TreeResult<ComponentId> {
        let panel = self.current_panel();
        self.tree.try_add(panel, layout_index, child)
    }

    /// Add a component to the current panel and its traversal group.
    ///
    /// # Panics
    ///
    /// Same conditions as [`ComponentTree::add`].
    #[track_caller]
    pub fn add_to_group(&mut self, layout_index: i32, child: ComponentId) -> ComponentId {
        let panel = self.current_panel();
        self.tree.add_to_group(panel, layout_index, child)
    }

    /// Replace the current panel's layout manager (without validating).
    pub fn set_layout(&mut self, layout: Box<dyn LayoutManager>) -> TreeResult<()> {
        let panel = self.current_panel();
        self.tree.set_layout(panel, layout)
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Listen to window-level events (resize, pointer leaving, close).
    pub fn add_window_listener<F>(&self, listener: F) -> Connection
    where
        F: Fn(&FrameEvent) + Send + Sync + 'static,
    {
        self.window_listeners.connect_handle(listener)
    }

    /// Listen to every queued event before it is routed.
    pub fn add_event_listener<F>(&self, listener: F) -> Connection
    where
        F: Fn(&FrameEvent) + Send + Sync + 'static,
    {
        self.event_listeners.connect_handle(listener)
    }

    /// Listen to the start of every [`update`](Self::update) with its delta.
    pub fn add_update_listener<F>(&self, listener: F) -> Connection
    where
        F: Fn(&Duration) + Send + Sync + 'static,
    {
        self.update_listeners.connect_handle(listener)
    }

    // =========================================================================
    // Quitting
    // =========================================================================

    pub fn set_default_closing(&mut self, default_closing: bool) {
        self.default_closing = default_closing;
    }

    pub fn is_default_closing(&self) -> bool {
        self.default_closing
    }

    /// Whether Escape or a close request asked the host to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Queue an event for the next [`update`](Self::update).
    pub fn push_event(&mut self, event: FrameEvent) {
        self.queue.push_back(event);
    }

    /// Number of events waiting for the next update.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Translate a winit window event and queue the result.
    ///
    /// Cursor position and modifier state are tracked here, since winit
    /// reports them separately from button and key events.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x as f32, position.y as f32);
                self.push_event(FrameEvent::MouseMotion {
                    x: self.cursor.x,
                    y: self.cursor.y,
                });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = input::from_winit_mouse_button(*button) {
                    self.push_event(FrameEvent::MouseButton {
                        button,
                        pressed: *state == ElementState::Pressed,
                        x: self.cursor.x,
                        y: self.cursor.y,
                    });
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = input::from_winit_modifiers(modifiers);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                for key_event in input::from_winit_key_event(event, self.modifiers) {
                    self.push_event(FrameEvent::Key(key_event));
                }
            }
            WindowEvent::Resized(size) => self.push_event(FrameEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::CursorLeft { .. } => self.push_event(FrameEvent::MouseLeftWindow),
            WindowEvent::CloseRequested => self.push_event(FrameEvent::CloseRequested),
            _ => {}
        }
    }

    /// Run one frame: notify update listeners, route every queued event into
    /// the current panel, then draw it.
    pub fn update(&mut self, delta: Duration, renderer: &mut dyn Renderer) -> TreeResult<()> {
        let _span = tracing::trace_span!(target: targets::FRAME, span_names::FRAME_UPDATE, queued = self.queue.len()).entered();
        self.update_listeners.emit(delta);

        while let Some(event) = self.queue.pop_front() {
            self.event_listeners.emit(event.clone());
            self.route(event)?;
        }

        renderer.begin_frame(self.background, self.size);
        let result = self.tree.draw(self.current_panel(), renderer, delta);
        renderer.end_frame();
        result
    }

    fn route(&mut self, event: FrameEvent) -> TreeResult<()> {
        if event.is_window_event() {
            self.window_listeners.emit(event.clone());
        }
        let panel = self.current_panel();
        match event {
            FrameEvent::Resized { width, height } => {
                self.size = Size::new(width as f32, height as f32);
                tracing::debug!(target: targets::FRAME, size = ?self.size, "window resized");
                self.resize_current()
            }
            FrameEvent::MouseLeftWindow => self.tree.mouse_motion_leave(panel),
            FrameEvent::CloseRequested => {
                if self.default_closing {
                    self.quit = true;
                }
                Ok(())
            }
            FrameEvent::MouseMotion { x, y } => {
                let y = self.flip_y(y);
                self.tree.handle_mouse(panel, &MouseEvent::motion(x, y))
            }
            FrameEvent::MouseButton {
                button,
                pressed,
                x,
                y,
            } => {
                let y = self.flip_y(y);
                let event = if pressed {
                    MouseEvent::button_down(button, x, y)
                } else {
                    MouseEvent::button_up(button, x, y)
                };
                self.tree.handle_mouse(panel, &event)
            }
            FrameEvent::Key(key_event) => {
                self.tree.handle_keyboard(panel, &key_event)?;
                if self.default_closing && key_event.is_key_down(Key::Escape) {
                    self.quit = true;
                }
                Ok(())
            }
        }
    }

    /// Convert a top-down window y into the bottom-up row of pixels under the
    /// pointer, so window row 0 lands inside the top row at `height - 1`.
    fn flip_y(&self, y: f32) -> f32 {
        self.size.height - 1.0 - y.floor()
    }

    /// Fit the current panel to the window and validate it.
    fn resize_current(&mut self) -> TreeResult<()> {
        let panel = self.current_panel();
        self.tree.set_preferred_size(panel, self.size)?;
        self.tree.set_size(panel, self.size)?;
        self.tree.set_location(panel, Point::ZERO)?;
        self.tree.validate(panel)
    }
}

static_assertions::assert_impl_all!(Frame: Send);

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;
    use trellis_render::RecordingRenderer;

    use super::*;
    use crate::events::KeyEvent;

    fn run(frame: &mut Frame) {
        frame.update(Duration::ZERO, &mut RecordingRenderer::new()).unwrap();
    }

    #[test]
    fn test_initial_panel_fills_window() {
        let frame = Frame::new(FrameConfig::new("t").with_size(300, 200));
        let base = frame.tree().component(frame.current_panel()).unwrap();
        assert_eq!(base.size(), Size::new(300.0, 200.0));
        assert_eq!(base.background_color(), Color::WHITE);
        assert_eq!(frame.panels().len(), 1);
    }

    #[test]
    fn test_mouse_y_is_flipped() {
        let mut frame = Frame::new(FrameConfig::new("t").with_size(100, 100));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        frame
            .tree()
            .component(frame.current_panel())
            .unwrap()
            .add_mouse_listener(move |(_, event)| sink.lock().push(event.position));

        frame.push_event(FrameEvent::MouseMotion { x: 10.0, y: 30.0 });
        frame.push_event(FrameEvent::MouseMotion { x: 10.0, y: 0.0 });
        frame.push_event(FrameEvent::MouseMotion { x: 10.0, y: 99.5 });
        run(&mut frame);
        assert_eq!(
            *seen.lock(),
            vec![Point::new(10.0, 69.0), Point::new(10.0, 99.0), Point::new(10.0, 0.0)]
        );
    }

    #[test]
    fn test_escape_quits_only_with_default_closing() {
        let mut frame = Frame::default();
        frame.push_event(FrameEvent::Key(KeyEvent::key_down(Key::Escape)));
        run(&mut frame);
        assert!(!frame.quit_requested());

        frame.set_default_closing(true);
        frame.push_event(FrameEvent::Key(KeyEvent::key_down(Key::Escape)));
        run(&mut frame);
        assert!(frame.quit_requested());
    }

    #[test]
    fn test_close_notifies_window_listeners() {
        let mut frame = Frame::new(FrameConfig::default().with_default_closing(true));
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        frame.add_window_listener(move |event| {
            if *event == FrameEvent::CloseRequested {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });
        frame.push_event(FrameEvent::CloseRequested);
        run(&mut frame);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(frame.quit_requested());
    }

    #[test]
    fn test_event_listeners_before_routing() {
        let mut frame = Frame::default();
        let log = Arc::new(Mutex::new(Vec::new()));
        let events = log.clone();
        frame.add_event_listener(move |event| events.lock().push(format!("{event:?}")));
        let updates = log.clone();
        frame.add_update_listener(move |_| updates.lock().push("update".to_owned()));

        frame.push_event(FrameEvent::MouseLeftWindow);
        assert_eq!(frame.pending_events(), 1);
        run(&mut frame);
        assert_eq!(*log.lock(), vec!["update".to_owned(), "MouseLeftWindow".to_owned()]);
        assert_eq!(frame.pending_events(), 0);
    }

    #[test]
    fn test_switching_panels() {
        let mut frame = Frame::new(FrameConfig::new("t").with_size(120, 80));
        let first = frame.current_panel();
        let second_index = frame.add_panel_back();
        let second = frame.panels()[second_index];

        let log = Arc::new(Mutex::new(Vec::new()));
        for panel in [first, second] {
            let sink = log.clone();
            frame
                .tree()
                .component(panel)
                .unwrap()
                .add_panel_change_listener(move |(id, active)| sink.lock().push((*id, *active)));
        }

        frame.set_current_panel(second_index).unwrap();
        assert_eq!(frame.current_panel(), second);
        assert_eq!(*log.lock(), vec![(first, false), (second, true)]);
        assert_eq!(frame.tree().component(second).unwrap().size(), Size::new(120.0, 80.0));

        // Same index: no notifications.
        frame.set_current_panel(second_index).unwrap();
        assert_eq!(log.lock().len(), 2);

        assert_eq!(
            frame.set_current_panel(5),
            Err(TreeError::PanelIndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_push_back_panel_rejects_leaves() {
        let mut frame = Frame::default();
        let leaf = frame.tree_mut().create_empty();
        assert_eq!(frame.push_back_panel(leaf), Err(TreeError::NotAPanel(leaf)));
        let panel = frame.tree_mut().create_panel();
        assert_eq!(frame.push_back_panel(panel), Ok(1));
    }
}
