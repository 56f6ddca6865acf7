//! Image grid arithmetic for observation cells.

/// Widest grid used for observation photos.
pub const MAX_GRID_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageGrid {
    pub columns: usize,
    pub rows: usize,
}

impl ImageGrid {
    /// `columns = min(count, 2)`, `rows = ceil(count / columns)`; empty for no images.
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            return Self { columns: 0, rows: 0 };
        }
        let columns = count.min(MAX_GRID_COLUMNS);
        Self {
            columns,
            rows: count.div_ceil(columns),
        }
    }

    /// Split `items` into grid rows, left to right.
    pub fn chunk<'a, T>(&self, items: &'a [T]) -> Vec<&'a [T]> {
        if self.columns == 0 {
            return Vec::new();
        }
        items.chunks(self.columns).collect()
    }
}
