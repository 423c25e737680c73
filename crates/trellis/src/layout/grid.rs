//! Grid layout with uniform cells.

use trellis_render::{Point, Size};

use super::{LayoutContainer, LayoutManager};

/// Divides the panel into `rows x columns` equal cells and fills them
/// row-major from the top-left corner.
///
/// Every visible child gets the full cell, whatever its preferred size.
/// Hidden children do not consume a cell. Children beyond the last cell keep
/// being placed in rows below the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    rows: usize,
    columns: usize,
    horizontal_gap: f32,
    vertical_gap: f32,
}

impl GridLayout {
    /// A grid with no gaps. Zero rows or columns are treated as one.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::with_gaps(rows, columns, 0.0, 0.0)
    }

    pub fn with_gaps(rows: usize, columns: usize, horizontal_gap: f32, vertical_gap: f32) -> Self {
        Self {
            rows: rows.max(1),
            columns: columns.max(1),
            horizontal_gap,
            vertical_gap,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Size of one cell inside a container of `size`.
    pub fn cell_size(&self, size: Size) -> Size {
        let columns = self.columns as f32;
        let rows = self.rows as f32;
        Size::new(
            ((size.width - self.horizontal_gap * (columns - 1.0)) / columns).max(0.0),
            ((size.height - self.vertical_gap * (rows - 1.0)) / rows).max(0.0),
        )
    }
}

impl LayoutManager for GridLayout {
    fn layout_container(&self, container: &mut LayoutContainer<'_>) {
        let size = container.size();
        let cell = self.cell_size(size);
        for (slot, child) in container.visible_children_mut().enumerate() {
            let row = (slot / self.columns) as f32;
            let column = (slot % self.columns) as f32;
            let x = column * (cell.width + self.horizontal_gap);
            let y = size.height - (row + 1.0) * cell.height - row * self.vertical_gap;
            child.place(Point::new(x, y), cell);
        }
    }
}
