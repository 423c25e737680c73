//! Border layout: five compass regions.
//!
//! Children pick a region with their layout index. North and south span the
//! full width at their preferred height; west and east fill the remaining
//! height at their preferred width; the center takes what is left.
//!
//! ```text
//! +---------------------+
//! |        NORTH        |
//! +------+-------+------+
//! | WEST | CENTER| EAST |
//! +------+-------+------+
//! |        SOUTH        |
//! +---------------------+
//! ```

use trellis_render::{Point, Size};

use super::{LayoutContainer, LayoutManager};

/// Compass layout selected by layout index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BorderLayout;

impl BorderLayout {
    pub const CENTER: i32 = 0;
    pub const NORTH: i32 = 1;
    pub const WEST: i32 = 2;
    pub const EAST: i32 = 3;
    pub const SOUTH: i32 = 4;

    pub fn new() -> Self {
        Self
    }
}

/// Thickness of each edge region.
#[derive(Debug, Default)]
struct Edges {
    north: f32,
    south: f32,
    west: f32,
    east: f32,
}

fn unrecognized(index: i32) -> ! {
    panic!("unrecognized border layout index {index} (expected 0..=4)")
}

impl LayoutManager for BorderLayout {
    fn layout_container(&self, container: &mut LayoutContainer<'_>) {
        let mut edges = Edges::default();
        for child in container.visible_children() {
            let preferred = child.preferred_size();
            match child.layout_index() {
                Self::CENTER => {}
                Self::NORTH => edges.north = preferred.height,
                Self::SOUTH => edges.south = preferred.height,
                Self::WEST => edges.west = preferred.width,
                Self::EAST => edges.east = preferred.width,
                other => unrecognized(other),
            }
        }

        let Size { width, height } = container.size();
        let middle = height - edges.north - edges.south;
        for child in container.visible_children_mut() {
            let (location, size) = match child.layout_index() {
                Self::CENTER => (
                    Point::new(edges.west, edges.south),
                    Size::new(width - edges.west - edges.east, middle),
                ),
                Self::NORTH => (
                    Point::new(0.0, height - edges.north),
                    Size::new(width, edges.north),
                ),
                Self::SOUTH => (Point::ZERO, Size::new(width, edges.south)),
                Self::WEST => (
                    Point::new(0.0, edges.south),
                    Size::new(edges.west, middle),
                ),
                Self::EAST => (
                    Point::new(width - edges.east, edges.south),
                    Size::new(edges.east, middle),
                ),
                other => unrecognized(other),
            };
            child.place(location, size);
        }
    }
}
