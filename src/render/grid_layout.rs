#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PLOT_CONFIG;

/// Fixed rows x columns arrangement of chart cells. Slot `i` (configuration
/// order) always lands in row `i / columns`, column `i % columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
}

impl GridLayout {
    /// Grid for `pair_count` charts. Keeps `configured_rows` unless the pairs
    /// would not fit, in which case the grid grows and a warning is logged.
    pub fn for_pairs(pair_count: usize, configured_rows: usize) -> Self {
        let columns = PLOT_CONFIG.grid_columns;
        let needed_rows = pair_count.div_ceil(columns);
        let rows = if needed_rows > configured_rows {
            log::warn!(
                "{} pairs do not fit a {}x{} grid, using {} rows",
                pair_count,
                configured_rows,
                columns,
                needed_rows
            );
            needed_rows
        } else {
            configured_rows.max(1)
        };
        let layout = Self { rows, columns };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_layout {
            log::info!(
                "Grid {}x{} for {} pairs ({} cells unused)",
                rows,
                columns,
                pair_count,
                layout.unused_cells(pair_count)
            );
        }

        layout
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }

    /// (row, column) of a slot
    pub fn cell_of(&self, slot: usize) -> (usize, usize) {
        (slot / self.columns, slot % self.columns)
    }

    /// Cells left without a chart once `pair_count` slots are filled.
    pub fn unused_cells(&self, pair_count: usize) -> usize {
        self.capacity().saturating_sub(pair_count)
    }

    /// Whole figure in pixels.
    pub fn figure_size(&self) -> (f64, f64) {
        (
            self.columns as f64 * PLOT_CONFIG.cell_width,
            self.rows as f64 * PLOT_CONFIG.cell_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_holds_nine() {
        let layout = GridLayout::for_pairs(9, 3);
        assert_eq!(layout, GridLayout { rows: 3, columns: 3 });
        assert_eq!(layout.unused_cells(9), 0);
        assert_eq!(layout.cell_of(0), (0, 0));
        assert_eq!(layout.cell_of(4), (1, 1));
        assert_eq!(layout.cell_of(8), (2, 2));
    }

    #[test]
    fn test_fewer_pairs_leave_unused_cells() {
        let layout = GridLayout::for_pairs(4, 3);
        assert_eq!(layout.rows, 3);
        assert_eq!(layout.unused_cells(4), 5);
    }

    #[test]
    fn test_grid_grows_when_pairs_overflow() {
        let layout = GridLayout::for_pairs(11, 3);
        assert_eq!(layout.rows, 4);
        assert_eq!(layout.capacity(), 12);
        assert_eq!(layout.cell_of(10), (3, 1));
    }

    #[test]
    fn test_figure_size() {
        let (w, h) = GridLayout::for_pairs(9, 3).figure_size();
        assert_eq!(w, 3.0 * PLOT_CONFIG.cell_width);
        assert_eq!(h, 3.0 * PLOT_CONFIG.cell_height);
    }
}
