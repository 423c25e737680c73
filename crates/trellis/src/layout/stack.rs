//! Single column and single row layouts.
//!
//! Both place visible children at their preferred size, one after another,
//! starting `first` pixels in from the chosen edge and separated by the gap
//! along the stacking axis. The gap on the other axis is the inset from the
//! panel edge.

use trellis_render::{Point, Size};

use super::{LayoutContainer, LayoutManager};
use crate::layout::flow::DEFAULT_GAP;

/// Where a [`VerticalLayout`] starts stacking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    /// From the top edge downwards.
    #[default]
    Up,
    /// From the bottom edge upwards.
    Down,
}

/// Where a [`HorizontalLayout`] starts stacking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// From the left edge rightwards.
    #[default]
    Left,
    /// From the right edge leftwards.
    Right,
}

/// Stacks children along y, inset `horizontal_gap` from the left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalLayout {
    alignment: VerticalAlignment,
    horizontal_gap: f32,
    vertical_gap: f32,
    first_gap: f32,
}

impl Default for VerticalLayout {
    fn default() -> Self {
        Self::new(VerticalAlignment::Up)
    }
}

impl VerticalLayout {
    pub fn new(alignment: VerticalAlignment) -> Self {
        Self::with_gaps(DEFAULT_GAP, DEFAULT_GAP, DEFAULT_GAP, alignment)
    }

    pub fn with_gaps(
        horizontal_gap: f32,
        vertical_gap: f32,
        first_gap: f32,
        alignment: VerticalAlignment,
    ) -> Self {
        Self {
            alignment,
            horizontal_gap,
            vertical_gap,
            first_gap,
        }
    }

    #[inline]
    pub fn alignment(&self) -> VerticalAlignment {
        self.alignment
    }
}

impl LayoutManager for VerticalLayout {
    fn layout_container(&self, container: &mut LayoutContainer<'_>) {
        let height = container.size().height;
        let mut y = self.first_gap;
        for child in container.visible_children_mut() {
            let preferred = child.preferred_size();
            let bottom = match self.alignment {
                VerticalAlignment::Up => height - preferred.height - y,
                VerticalAlignment::Down => y,
            };
            child.place(Point::new(self.horizontal_gap, bottom), preferred);
            y += self.vertical_gap + preferred.height;
        }
    }
}

/// Stacks children along x, aligned to the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalLayout {
    alignment: HorizontalAlignment,
    horizontal_gap: f32,
    vertical_gap: f32,
    first_gap: f32,
}

impl Default for HorizontalLayout {
    fn default() -> Self {
        Self::new(HorizontalAlignment::Left)
    }
}

impl HorizontalLayout {
    pub fn new(alignment: HorizontalAlignment) -> Self {
        Self::with_gaps(DEFAULT_GAP, DEFAULT_GAP, DEFAULT_GAP, alignment)
    }

    pub fn with_gaps(
        horizontal_gap: f32,
        vertical_gap: f32,
        first_gap: f32,
        alignment: HorizontalAlignment,
    ) -> Self {
        Self {
            alignment,
            horizontal_gap,
            vertical_gap,
            first_gap,
        }
    }

    #[inline]
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Inset from the top edge.
    #[inline]
    pub fn vertical_gap(&self) -> f32 {
        self.vertical_gap
    }
}

impl LayoutManager for HorizontalLayout {
    fn layout_container(&self, container: &mut LayoutContainer<'_>) {
        let Size { width, height } = container.size();
        let mut x = self.first_gap;
        for child in container.visible_children_mut() {
            let preferred = child.preferred_size();
            let left = match self.alignment {
                HorizontalAlignment::Left => x,
                HorizontalAlignment::Right => width - preferred.width - x,
            };
            let bottom = height - preferred.height - self.vertical_gap;
            child.place(Point::new(left, bottom), preferred);
            x += self.horizontal_gap + preferred.width;
        }
    }
}
