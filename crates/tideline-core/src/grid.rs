//! Fixed-size year-by-cell storage.
//!
//! [`YearGrid`] holds one `f64` per (year, cell) pair in a single
//! row-major `Vec<f64>`. It is allocated once for the whole run
//! (spin-up plus simulated years) and never resized, so historical
//! backfill windows and the current year row are plain offsets into
//! the same buffer.

use std::ops::{Index, IndexMut, Range};

/// Pre-allocated `years x cells` table of `f64`.
///
/// Row `y` holds every cell for year `y`. Checked accessors return
/// `Option`; the row and `(year, cell)` index accessors panic on
/// out-of-range indices.
#[derive(Clone, Debug, PartialEq)]
pub struct YearGrid {
    years: usize,
    cells: usize,
    data: Vec<f64>,
}

impl YearGrid {
    /// Zero-filled grid.
    pub fn zeros(years: usize, cells: usize) -> Self {
        Self {
            years,
            cells,
            data: vec![0.0; years * cells],
        }
    }

    /// Grid whose value at `(year, cell)` is `f(year, cell)`.
    pub fn from_fn(years: usize, cells: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(years * cells);
        for y in 0..years {
            for c in 0..cells {
                data.push(f(y, c));
            }
        }
        Self { years, cells, data }
    }

    /// Wrap row-major data. Returns `None` if `data.len() != years * cells`.
    pub fn from_vec(years: usize, cells: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != years * cells {
            return None;
        }
        Some(Self { years, cells, data })
    }

    /// Number of year rows.
    pub fn years(&self) -> usize {
        self.years
    }

    /// Number of cell columns.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// `(years, cells)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.years, self.cells)
    }

    /// Value at `(year, cell)`, or `None` if out of range.
    pub fn get(&self, year: usize, cell: usize) -> Option<f64> {
        if year >= self.years || cell >= self.cells {
            return None;
        }
        Some(self.data[year * self.cells + cell])
    }

    /// Mutable value at `(year, cell)`, or `None` if out of range.
    pub fn get_mut(&mut self, year: usize, cell: usize) -> Option<&mut f64> {
        if year >= self.years || cell >= self.cells {
            return None;
        }
        Some(&mut self.data[year * self.cells + cell])
    }

    /// All cells of one year.
    ///
    /// # Panics
    ///
    /// Panics if `year >= self.years()`.
    pub fn row(&self, year: usize) -> &[f64] {
        assert!(year < self.years, "year {year} out of range ({})", self.years);
        let start = year * self.cells;
        &self.data[start..start + self.cells]
    }

    /// Mutable cells of one year.
    ///
    /// # Panics
    ///
    /// Panics if `year >= self.years()`.
    pub fn row_mut(&mut self, year: usize) -> &mut [f64] {
        assert!(year < self.years, "year {year} out of range ({})", self.years);
        let start = year * self.cells;
        &mut self.data[start..start + self.cells]
    }

    /// Values of one cell over all years, oldest first.
    pub fn column(&self, cell: usize) -> impl Iterator<Item = f64> + '_ {
        let cells = self.cells;
        let valid = cell < cells;
        self.data
            .iter()
            .skip(cell)
            .step_by(cells.max(1))
            .take(if valid { self.years } else { 0 })
            .copied()
    }

    /// Sum of one cell's values over `years`, clamped to the grid.
    pub fn column_sum(&self, cell: usize, years: Range<usize>) -> f64 {
        if cell >= self.cells {
            return 0.0;
        }
        let end = years.end.min(self.years);
        (years.start..end)
            .map(|y| self.data[y * self.cells + cell])
            .sum()
    }

    /// Sum of one cell's values from `first_year` to the last row.
    pub fn column_sum_from(&self, cell: usize, first_year: usize) -> f64 {
        self.column_sum(cell, first_year..self.years)
    }

    /// Sum of every value in rows `0..=through_year`.
    pub fn total_through(&self, through_year: usize) -> f64 {
        let end = (through_year + 1).min(self.years) * self.cells;
        self.data[..end].iter().sum()
    }

    /// Copy `cells` from row `from_year` into row `to_year`.
    ///
    /// The cell range is clamped to the grid width.
    ///
    /// # Panics
    ///
    /// Panics if either year is out of range.
    pub fn copy_cells(&mut self, from_year: usize, to_year: usize, cells: Range<usize>) {
        assert!(from_year < self.years && to_year < self.years);
        let end = cells.end.min(self.cells);
        if cells.start >= end {
            return;
        }
        let src = from_year * self.cells;
        let dst = to_year * self.cells;
        self.data
            .copy_within(src + cells.start..src + end, dst + cells.start);
    }

    /// Raw row-major data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl Index<(usize, usize)> for YearGrid {
    type Output = f64;

    fn index(&self, (year, cell): (usize, usize)) -> &f64 {
        assert!(
            year < self.years && cell < self.cells,
            "({year}, {cell}) out of range for {}x{} grid",
            self.years,
            self.cells
        );
        &self.data[year * self.cells + cell]
    }
}

impl IndexMut<(usize, usize)> for YearGrid {
    fn index_mut(&mut self, (year, cell): (usize, usize)) -> &mut f64 {
        assert!(
            year < self.years && cell < self.cells,
            "({year}, {cell}) out of range for {}x{} grid",
            self.years,
            self.cells
        );
        &mut self.data[year * self.cells + cell]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zeros_has_requested_shape() {
        let g = YearGrid::zeros(3, 5);
        assert_eq!(g.shape(), (3, 5));
        assert_eq!(g.as_slice().len(), 15);
        assert!(g.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert!(YearGrid::from_vec(2, 3, vec![0.0; 5]).is_none());
        assert!(YearGrid::from_vec(2, 3, vec![0.0; 6]).is_some());
    }

    #[test]
    fn checked_access_out_of_range_is_none() {
        let mut g = YearGrid::zeros(2, 2);
        assert!(g.get(2, 0).is_none());
        assert!(g.get(0, 2).is_none());
        assert!(g.get_mut(5, 5).is_none());
    }

    #[test]
    #[should_panic]
    fn row_out_of_range_panics() {
        let g = YearGrid::zeros(2, 2);
        let _ = g.row(2);
    }

    #[test]
    fn rows_are_row_major() {
        let g = YearGrid::from_fn(3, 4, |y, c| (y * 10 + c) as f64);
        assert_eq!(g.row(1), &[10.0, 11.0, 12.0, 13.0]);
        assert_eq!(g[(2, 3)], 23.0);
    }

    #[test]
    fn column_walks_years() {
        let g = YearGrid::from_fn(3, 4, |y, c| (y * 10 + c) as f64);
        let col: Vec<f64> = g.column(2).collect();
        assert_eq!(col, vec![2.0, 12.0, 22.0]);
        assert_eq!(g.column(9).count(), 0);
    }

    #[test]
    fn column_sum_clamps_range() {
        let g = YearGrid::from_fn(4, 2, |y, _| y as f64);
        assert_eq!(g.column_sum(0, 1..3), 3.0);
        assert_eq!(g.column_sum(0, 2..100), 5.0);
        assert_eq!(g.column_sum_from(1, 0), 6.0);
        assert_eq!(g.column_sum(7, 0..4), 0.0);
    }

    #[test]
    fn copy_cells_moves_a_slice_between_rows() {
        let mut g = YearGrid::from_fn(2, 5, |y, c| if y == 0 { c as f64 } else { -1.0 });
        g.copy_cells(0, 1, 2..9);
        assert_eq!(g.row(1), &[-1.0, -1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn total_through_sums_prefix_rows() {
        let g = YearGrid::from_fn(3, 2, |y, _| (y + 1) as f64);
        assert_eq!(g.total_through(0), 2.0);
        assert_eq!(g.total_through(1), 6.0);
        assert_eq!(g.total_through(10), 12.0);
    }

    proptest! {
        #[test]
        fn column_sums_add_to_total(years in 1usize..12, cells in 1usize..12, seed in 0u64..1000) {
            let g = YearGrid::from_fn(years, cells, |y, c| ((y * 31 + c * 17) as u64 ^ seed) as f64 % 7.0);
            let by_column: f64 = (0..cells).map(|c| g.column_sum_from(c, 0)).sum();
            prop_assert!((by_column - g.total_through(years - 1)).abs() < 1e-9);
        }
    }
}
