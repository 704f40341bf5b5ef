use geom::{Point, Size};

use crate::{
    error::{Error, Result},
    layout::{Constraint, LayoutContext, Length, local_length},
    widget::Widget,
};

/// A fixed-column grid with fixed-extent rows, filled in row-major order.
///
/// The grid divides its row axis evenly between columns, so it requires a
/// finite main-axis bound and fails fast on an infinite one.
pub struct Grid {
    /// Number of columns per row.
    columns: usize,
    /// Height of every row.
    row_extent: f64,
    /// Desired height.
    height: Length,
}

impl Grid {
    /// Construct a grid with a column count and a row height.
    pub fn new(columns: usize, row_extent: f64) -> Self {
        Self {
            columns,
            row_extent,
            height: Length::Shrink,
        }
    }

    /// Set the desired height.
    pub fn height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }
}

impl Widget for Grid {
    fn layout(&mut self, ctx: &mut LayoutContext, constraint: Constraint) -> Result<Size> {
        if !constraint.max_width.is_finite() {
            return Err(Error::Layout(
                "grid requires a finite main-axis bound".into(),
            ));
        }
        if self.columns == 0 {
            return Err(Error::Invalid("grid requires at least one column".into()));
        }
        let cell_w = constraint.max_width / self.columns as f64;
        let cell = Constraint::tight(Size::new(cell_w, self.row_extent));
        let children = ctx.children();
        for (i, &child) in children.iter().enumerate() {
            ctx.layout_child(child, cell)?;
            let col = i % self.columns;
            let row = i / self.columns;
            ctx.position_child(
                child,
                Point::new(col as f64 * cell_w, row as f64 * self.row_extent),
            )?;
        }
        let rows = children.len().div_ceil(self.columns);
        let content_h = rows as f64 * self.row_extent;
        Ok(Size::new(
            constraint.max_width,
            local_length(content_h, self.height, constraint.min_height, constraint.max_height),
        ))
    }
}
