//! Builds a small settings screen without opening a window, runs a few
//! frames of scripted input and prints the resulting tree.
//!
//! Run with: RUST_LOG=trellis=debug cargo run -p trellis --example layout_tour

use std::time::Duration;

use trellis::prelude::*;
use trellis::render::RecordingRenderer;
use trellis::widgets::{Button, CheckBox, ComboBox, Label, TextField, default_metrics};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), TreeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut frame = Frame::new(FrameConfig::new("Layout tour").with_size(400, 300).with_default_closing(true));
    let metrics = default_metrics();

    let title = frame.tree_mut().create_component(Label::new("Settings", metrics.clone()));
    frame.tree_mut().set_name(title, "title")?;
    frame.add(BorderLayout::NORTH, title);

    // Form rows stacked top to bottom, each a label beside its control.
    let tree = frame.tree_mut();
    let form = tree.create_panel_with_layout(Box::new(VerticalLayout::with_gaps(
        4.0,
        4.0,
        4.0,
        trellis::VerticalAlignment::Up,
    )));
    tree.set_name(form, "form")?;
    let name_row = tree.create_panel_with_layout(Box::new(HorizontalLayout::default()));
    let name_label = tree.create_component(Label::new("Name", metrics.clone()));
    let name = tree.create_component(TextField::new("", metrics.clone()));
    tree.set_name(name, "name")?;
    tree.add(name_row, 0, name_label);
    tree.add_to_group(name_row, 1, name);

    let color = tree.create_component(ComboBox::with_items(["red", "green", "blue"], metrics.clone()));
    let sound = tree.create_component(CheckBox::new("Sound", metrics.clone()));
    tree.set_name(color, "color")?;
    tree.set_name(sound, "sound")?;
    tree.add(form, 0, name_row);
    tree.add(form, 1, color);
    tree.add(form, 2, sound);
    frame.add(BorderLayout::CENTER, form);

    let buttons = frame
        .tree_mut()
        .create_panel_with_layout(Box::new(FlowLayout::new().with_gaps(8.0, 4.0)));
    let save = frame.tree_mut().create_component(Button::new("Save", metrics.clone()));
    let cancel = frame.tree_mut().create_component(Button::new("Cancel", metrics));
    frame.tree_mut().add(buttons, 0, save);
    frame.tree_mut().add(buttons, 1, cancel);
    frame.add(BorderLayout::SOUTH, buttons);

    let _saved = frame
        .tree()
        .component(save)?
        .add_action_listener(|_| tracing::info!("save pressed"));

    // Type a name, then tick the check box and press Save through window
    // coordinates (top-left origin).
    frame.tree_mut().set_focus(name, true)?;
    frame.tree_mut().set_focus(name_row, true)?;
    frame.tree_mut().set_focus(form, true)?;
    frame.push_event(FrameEvent::Key(KeyEvent::text("Ada")));

    let mut renderer = RecordingRenderer::new();
    frame.update(Duration::from_millis(16), &mut renderer)?;

    for id in [sound, save] {
        let bounds = window_bounds(frame.tree(), id)?;
        let x = bounds.left() + bounds.width() / 2.0;
        let y = frame.size().height - (bounds.bottom() + bounds.height() / 2.0);
        for pressed in [true, false] {
            frame.push_event(FrameEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
                x,
                y,
            });
        }
    }
    frame.update(Duration::from_millis(16), &mut renderer)?;

    println!("{}", frame.tree().dump(frame.current_panel())?);
    println!("texts drawn: {:?}", renderer.texts());
    Ok(())
}

/// Bounds of `id` in window space (bottom-left origin).
fn window_bounds(tree: &ComponentTree, id: ComponentId) -> Result<Rect, TreeError> {
    let mut bounds = tree.component(id)?.bounds();
    for ancestor in tree.ancestors(id)? {
        let origin = tree.component(ancestor)?.location();
        bounds = bounds.offset(origin.x, origin.y);
    }
    Ok(bounds)
}
