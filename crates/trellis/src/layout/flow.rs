//! Flow layout for wrapping horizontal arrangement.
//!
//! `FlowLayout` places visible children at their preferred size from the top
//! of the panel, left to right, wrapping to a new row when the next child would
//! cross the right edge. This is the default layout of a new panel.

use trellis_render::{Point, Size};

use super::{LayoutContainer, LayoutManager};

/// Horizontal alignment of each row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Default gap between children and rows.
pub const DEFAULT_GAP: f32 = 5.0;

/// A flow layout that wraps items horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    alignment: FlowAlignment,
    horizontal_gap: f32,
    vertical_gap: f32,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowLayout {
    /// Left-aligned flow with 5px gaps.
    pub fn new() -> Self {
        Self {
            alignment: FlowAlignment::Left,
            horizontal_gap: DEFAULT_GAP,
            vertical_gap: DEFAULT_GAP,
        }
    }

    pub fn with_alignment(mut self, alignment: FlowAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_gaps(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_gap = horizontal;
        self.vertical_gap = vertical;
        self
    }

    #[inline]
    pub fn alignment(&self) -> FlowAlignment {
        self.alignment
    }

    #[inline]
    pub fn horizontal_gap(&self) -> f32 {
        self.horizontal_gap
    }

    #[inline]
    pub fn vertical_gap(&self) -> f32 {
        self.vertical_gap
    }
}

/// A run of children sharing one row: indices into the container plus the
/// row's content width and height.
struct Row {
    members: Vec<usize>,
    width: f32,
    height: f32,
}

impl LayoutManager for FlowLayout {
    fn layout_container(&self, container: &mut LayoutContainer<'_>) {
        let Size { width, height } = container.size();
        let gap = self.horizontal_gap;

        // First pass: break visible children into rows.
        let mut rows: Vec<Row> = Vec::new();
        let mut current = Row {
            members: Vec::new(),
            width: 0.0,
            height: 0.0,
        };
        for (index, child) in container.children().iter().enumerate() {
            if !child.is_visible() {
                continue;
            }
            let preferred = child.preferred_size();
            let needed = if current.members.is_empty() {
                gap + preferred.width
            } else {
                gap + current.width + gap + preferred.width
            };
            if !current.members.is_empty() && needed > width {
                rows.push(std::mem::replace(
                    &mut current,
                    Row {
                        members: Vec::new(),
                        width: 0.0,
                        height: 0.0,
                    },
                ));
            }
            if !current.members.is_empty() {
                current.width += gap;
            }
            current.width += preferred.width;
            current.height = current.height.max(preferred.height);
            current.members.push(index);
        }
        if !current.members.is_empty() {
            rows.push(current);
        }

        // Second pass: place rows from the top edge down.
        let children = container.children_mut();
        let mut row_top = height - self.vertical_gap;
        for row in rows {
            let mut x = match self.alignment {
                FlowAlignment::Left => gap,
                FlowAlignment::Center => (width - row.width) / 2.0,
                FlowAlignment::Right => width - gap - row.width,
            };
            for index in row.members {
                let child = &mut children[index];
                let preferred = child.preferred_size();
                child.place(Point::new(x, row_top - preferred.height), preferred);
                x += preferred.width + gap;
            }
            row_top -= row.height + self.vertical_gap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::run_layout;
    use trellis_render::Rect;

    fn three_buttons(layout: FlowLayout, width: f32) -> Vec<Option<Rect>> {
        run_layout(
            &layout,
            Size::new(width, 100.0),
            &[
                (0, true, Size::new(40.0, 20.0)),
                (0, true, Size::new(40.0, 30.0)),
                (0, true, Size::new(40.0, 20.0)),
            ],
        )
    }

    #[test]
    fn test_single_row_left() {
        let placements = three_buttons(FlowLayout::new(), 200.0);
        assert_eq!(placements[0], Some(Rect::new(5.0, 75.0, 40.0, 20.0)));
        assert_eq!(placements[1], Some(Rect::new(50.0, 65.0, 40.0, 30.0)));
        assert_eq!(placements[2], Some(Rect::new(95.0, 75.0, 40.0, 20.0)));
    }

    #[test]
    fn test_wraps_when_row_is_full() {
        // 5 + 40 + 5 + 40 + 5 = 95 fits in 100, the third child does not.
        let placements = three_buttons(FlowLayout::new(), 100.0);
        assert_eq!(placements[1], Some(Rect::new(50.0, 65.0, 40.0, 30.0)));
        // Second row starts below the tallest child of the first row.
        assert_eq!(placements[2], Some(Rect::new(5.0, 40.0, 40.0, 20.0)));
    }

    #[test]
    fn test_center_and_right_alignment() {
        let centered = run_layout(
            &FlowLayout::new().with_alignment(FlowAlignment::Center),
            Size::new(100.0, 50.0),
            &[(0, true, Size::new(20.0, 10.0)), (0, true, Size::new(20.0, 10.0))],
        );
        // Row width 20 + 5 + 20 = 45, centered in 100.
        assert_eq!(centered[0], Some(Rect::new(27.5, 35.0, 20.0, 10.0)));
        assert_eq!(centered[1], Some(Rect::new(52.5, 35.0, 20.0, 10.0)));

        let right = run_layout(
            &FlowLayout::new().with_alignment(FlowAlignment::Right),
            Size::new(100.0, 50.0),
            &[(0, true, Size::new(20.0, 10.0))],
        );
        assert_eq!(right[0], Some(Rect::new(75.0, 35.0, 20.0, 10.0)));
    }

    #[test]
    fn test_hidden_children_take_no_space() {
        let placements = run_layout(
            &FlowLayout::new(),
            Size::new(200.0, 50.0),
            &[(0, false, Size::new(20.0, 10.0)), (0, true, Size::new(20.0, 10.0))],
        );
        assert_eq!(placements[0], None);
        assert_eq!(placements[1], Some(Rect::new(5.0, 35.0, 20.0, 10.0)));
    }

    #[test]
    fn test_oversized_child_still_gets_a_row() {
        let placements = run_layout(
            &FlowLayout::new(),
            Size::new(10.0, 50.0),
            &[(0, true, Size::new(20.0, 10.0)), (0, true, Size::new(20.0, 10.0))],
        );
        assert_eq!(placements[0], Some(Rect::new(5.0, 35.0, 20.0, 10.0)));
        assert_eq!(placements[1], Some(Rect::new(5.0, 20.0, 20.0, 10.0)));
    }
}
