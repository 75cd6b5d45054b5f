//! Mosaic grid geometry.

/// Column/row layout of the mosaic over an output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: u32,
}

impl Grid {
    /// Lay out `floor(width / cell) x floor(height / cell)` cells.
    ///
    /// Returns `None` when the layout would be empty: a zero-sized surface,
    /// a zero cell size, or a surface smaller than one cell.
    pub fn fit(width: u32, height: u32, cell_size: u32) -> Option<Self> {
        if cell_size == 0 {
            return None;
        }
        let cols = width / cell_size;
        let rows = height / cell_size;
        if cols == 0 || rows == 0 {
            return None;
        }
        Some(Self {
            cols,
            rows,
            cell_size,
        })
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-left pixel of cell `(x, y)`.
    pub fn origin(&self, x: u32, y: u32) -> (i32, i32) {
        ((x * self.cell_size) as i32, (y * self.cell_size) as i32)
    }
}
