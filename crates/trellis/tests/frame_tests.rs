//! Frame event routing, panel switching and configuration.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{focused_children, init_tracing};
use parking_lot::Mutex;
use trellis::widgets::{Button, Label, default_metrics};
use trellis::{BorderLayout, ConfigError, Frame, FrameConfig, FrameEvent, Key, KeyEvent, MouseButton, TreeError};
use trellis_render::{Color, RecordingRenderer, Size};

fn run(frame: &mut Frame) -> RecordingRenderer {
    let mut renderer = RecordingRenderer::new();
    frame.update(Duration::from_millis(16), &mut renderer).unwrap();
    renderer
}

fn click(frame: &mut Frame, x: f32, y: f32) {
    for pressed in [true, false] {
        frame.push_event(FrameEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
            x,
            y,
        });
    }
}

#[test]
fn test_click_in_window_coordinates_reaches_button() {
    init_tracing();
    let mut frame = Frame::new(FrameConfig::new("click").with_size(200, 100));
    let button = frame.tree_mut().create_component(Button::new("Go", default_metrics()));
    let label = frame.tree_mut().create_component(Label::new("Status", default_metrics()));
    frame.add(BorderLayout::NORTH, button);
    frame.add(BorderLayout::CENTER, label);

    let clicks = Arc::new(AtomicUsize::new(0));
    let counter = clicks.clone();
    frame.tree().component(button).unwrap().add_action_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // North sits at the top of the window, which is window y near 0.
    click(&mut frame, 100.0, 5.0);
    run(&mut frame);
    assert_eq!(clicks.load(Ordering::SeqCst), 1);

    // The same press near the window's bottom edge lands in the center.
    click(&mut frame, 100.0, 95.0);
    run(&mut frame);
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn test_top_and_bottom_window_rows_hit_edge_children() {
    init_tracing();
    let mut frame = Frame::new(FrameConfig::new("edges").with_size(200, 100));
    let top = frame.tree_mut().create_component(Button::new("Top", default_metrics()));
    let bottom = frame.tree_mut().create_component(Button::new("Bottom", default_metrics()));
    frame.add(BorderLayout::NORTH, top);
    frame.add(BorderLayout::SOUTH, bottom);

    let counts = [top, bottom].map(|id| {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        frame.tree().component(id).unwrap().add_action_listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        count
    });

    click(&mut frame, 100.0, 0.0);
    run(&mut frame);
    assert_eq!(counts[0].load(Ordering::SeqCst), 1);

    click(&mut frame, 100.0, 99.0);
    run(&mut frame);
    assert_eq!(counts[1].load(Ordering::SeqCst), 1);
    assert_eq!(counts[0].load(Ordering::SeqCst), 1);
}

#[test]
fn test_resize_refits_current_panel() {
    init_tracing();
    let mut frame = Frame::new(FrameConfig::new("resize").with_size(200, 100));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let _connection = frame.add_window_listener(move |event| sink.lock().push(event.clone()));

    frame.push_event(FrameEvent::Resized { width: 320, height: 240 });
    frame.push_event(FrameEvent::MouseMotion { x: 1.0, y: 1.0 });
    assert_eq!(frame.pending_events(), 2);
    run(&mut frame);

    assert_eq!(frame.size(), Size::new(320.0, 240.0));
    let panel = frame.tree().component(frame.current_panel()).unwrap();
    assert_eq!(panel.size(), Size::new(320.0, 240.0));
    // Input events do not reach window listeners.
    assert_eq!(*seen.lock(), vec![FrameEvent::Resized { width: 320, height: 240 }]);
    assert_eq!(frame.pending_events(), 0);
}

#[test]
fn test_escape_quits_only_with_default_closing() {
    init_tracing();
    let mut frame = Frame::new(FrameConfig::new("quit"));
    frame.push_event(FrameEvent::Key(KeyEvent::key_down(Key::Escape)));
    frame.push_event(FrameEvent::CloseRequested);
    run(&mut frame);
    assert!(!frame.quit_requested());

    frame.set_default_closing(true);
    frame.push_event(FrameEvent::Key(KeyEvent::key_down(Key::Escape)));
    run(&mut frame);
    assert!(frame.quit_requested());
}

#[test]
fn test_switching_panels_redirects_input_and_drawing() {
    init_tracing();
    let mut frame = Frame::new(FrameConfig::new("panels").with_size(100, 100));
    let first = frame.tree_mut().create_component(Label::new("First", default_metrics()));
    frame.add(BorderLayout::CENTER, first);

    let second_index = frame.add_panel_back();
    assert_eq!(second_index, 1);
    frame.set_current_panel(second_index).unwrap();
    let second = frame.tree_mut().create_component(Label::new("Second", default_metrics()));
    frame.add(BorderLayout::CENTER, second);

    assert_eq!(run(&mut frame).texts(), vec!["Second"]);
    let panel = frame.tree().component(frame.current_panel()).unwrap();
    assert_eq!(panel.size(), Size::new(100.0, 100.0));

    frame.set_current_panel(0).unwrap();
    assert_eq!(run(&mut frame).texts(), vec!["First"]);

    assert_eq!(
        frame.set_current_panel(5),
        Err(TreeError::PanelIndexOutOfRange { index: 5, len: 2 })
    );
    assert_eq!(frame.current_panel_index(), 0);
}

#[test]
fn test_background_from_config_clears_frame() {
    init_tracing();
    let background = Color::from_rgb(0.2, 0.3, 0.4);
    let mut frame = Frame::new(FrameConfig::new("bg").with_background(background));
    let panel = frame.tree().component(frame.current_panel()).unwrap();
    assert_eq!(panel.background_color(), background);
    run(&mut frame);
}

#[test]
fn test_toml_config_drives_traversal_keys() {
    init_tracing();
    let config = FrameConfig::from_toml_str(
        r#"
        title = "Arrows"
        width = 120
        height = 90

        [traversal]
        vertical_arrows = true
        "#,
    )
    .unwrap();
    assert_eq!(config.title, "Arrows");
    assert!(config.traversal.tab);
    assert!(!config.default_closing);

    let mut frame = Frame::new(config);
    assert_eq!(frame.size(), Size::new(120.0, 90.0));
    let top = frame.tree_mut().create_empty();
    let bottom = frame.tree_mut().create_empty();
    frame.add_to_group(BorderLayout::SOUTH, bottom);
    frame.add_to_group(BorderLayout::NORTH, top);

    let panel = frame.current_panel();
    frame.push_event(FrameEvent::Key(KeyEvent::key_down(Key::ArrowDown)));
    run(&mut frame);
    assert_eq!(focused_children(frame.tree(), panel), vec![top]);

    frame.push_event(FrameEvent::Key(KeyEvent::key_down(Key::ArrowDown)));
    run(&mut frame);
    assert_eq!(focused_children(frame.tree(), panel), vec![bottom]);
}

#[test]
fn test_bad_toml_is_a_parse_error() {
    let error = FrameConfig::from_toml_str("width = \"wide\"").unwrap_err();
    assert!(matches!(error, ConfigError::Parse(_)));
}

#[test]
fn test_load_config_file() {
    let path = std::env::temp_dir().join(format!("trellis-frame-{}.toml", std::process::id()));
    std::fs::write(&path, "title = \"From file\"\ndefault_closing = true\n").unwrap();
    let config = FrameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.title, "From file");
    assert!(config.default_closing);
    assert_eq!(config.size(), Size::new(512.0, 512.0));

    let missing = FrameConfig::load(&path).unwrap_err();
    assert!(matches!(missing, ConfigError::Io(_)));
}
