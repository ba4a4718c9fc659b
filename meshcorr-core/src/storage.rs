//! Labelled matrix storage with a layout chosen at construction
//!
//! Every matrix in the crate is a [`LabeledGrid`] paired with a flat value
//! buffer. The [`Layout`] decides how `(row, col)` maps into that buffer and
//! which cells exist at all.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::format::{format_real, NumberFormat};
use crate::grid::LabeledGrid;
use crate::traits::SparseMatrix;
use crate::{CoreError, Result};

/// How values of a labelled matrix are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    /// Every cell stored, row-major
    Dense,
    /// Only `(i, i)` cells exist
    Diagonal,
    /// Row `i` stores `i + 1` values; `(r, c)` and `(c, r)` share a slot
    LowerTriangular,
}

impl Layout {
    /// Square layouts keep row and column counts locked together
    pub const fn is_square(self) -> bool {
        !matches!(self, Layout::Dense)
    }

    /// Number of stored values for the given dimensions
    pub const fn storage_len(self, rows: usize, columns: usize) -> usize {
        match self {
            Layout::Dense => rows * columns,
            Layout::Diagonal => rows,
            Layout::LowerTriangular => rows * (rows + 1) / 2,
        }
    }

    /// Buffer slot of `(row, col)`
    pub const fn slot(self, row: usize, col: usize, rows: usize, columns: usize) -> Result<usize> {
        if row >= rows {
            return Err(CoreError::IndexOutOfBounds { index: row, len: rows });
        }
        if col >= columns {
            return Err(CoreError::IndexOutOfBounds { index: col, len: columns });
        }
        match self {
            Layout::Dense => Ok(row * columns + col),
            Layout::Diagonal => {
                if row != col {
                    return Err(CoreError::StructuralViolation { row, col });
                }
                Ok(row)
            }
            Layout::LowerTriangular => {
                let (hi, lo) = if row >= col { (row, col) } else { (col, row) };
                Ok(hi * (hi + 1) / 2 + lo)
            }
        }
    }
}

/// A [`LabeledGrid`] with values stored according to a [`Layout`]
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    grid: LabeledGrid,
    layout: Layout,
    values: Vec<f64>,
}

impl LabeledMatrix {
    /// Create an empty matrix
    pub const fn new(layout: Layout) -> Self {
        Self {
            grid: LabeledGrid::new(),
            layout,
            values: Vec::new(),
        }
    }

    /// Create a square matrix of dimension `n`, zero-filled
    pub fn square(layout: Layout, n: usize) -> Self {
        let mut matrix = Self::new(layout);
        matrix.set_dimension_count(n);
        matrix
    }

    /// Create a dense `rows x columns` matrix, zero-filled
    pub fn dense(rows: usize, columns: usize) -> Self {
        Self {
            grid: LabeledGrid::with_counts(rows, columns),
            layout: Layout::Dense,
            values: vec![0.0; rows * columns],
        }
    }

    /// Take ownership of existing buffers
    ///
    /// The value buffer must match the layout's storage length for the grid
    /// dimensions, and square layouts need equal row and column counts.
    pub fn from_parts(grid: LabeledGrid, layout: Layout, values: Vec<f64>) -> Result<Self> {
        if layout.is_square() && grid.row_count() != grid.column_count() {
            return Err(CoreError::LockedDimensions);
        }
        let expected = layout.storage_len(grid.row_count(), grid.column_count());
        if values.len() != expected {
            return Err(CoreError::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            grid,
            layout,
            values,
        })
    }

    /// Give up the buffers without copying
    pub fn into_parts(self) -> (LabeledGrid, Layout, Vec<f64>) {
        (self.grid, self.layout, self.values)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn grid(&self) -> &LabeledGrid {
        &self.grid
    }

    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.grid.column_count()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn row_name_at(&self, index: usize) -> Result<&str> {
        self.grid.row_name_at(index)
    }

    pub fn column_name_at(&self, index: usize) -> Result<&str> {
        self.grid.column_name_at(index)
    }

    pub fn set_row_name_at(&mut self, index: usize, name: &str) -> Result<()> {
        self.grid.set_row_name_at(index, name)
    }

    pub fn set_column_name_at(&mut self, index: usize, name: &str) -> Result<()> {
        self.grid.set_column_name_at(index, name)
    }

    pub fn index_of_row(&self, name: &str) -> Option<usize> {
        self.grid.index_of_row(name)
    }

    pub fn index_of_column(&self, name: &str) -> Option<usize> {
        self.grid.index_of_column(name)
    }

    /// Value at `(row, col)`, failing on cells the layout does not store
    pub fn value_at(&self, row: usize, col: usize) -> Result<f64> {
        let slot = self
            .layout
            .slot(row, col, self.row_count(), self.column_count())?;
        Ok(self.values[slot])
    }

    pub fn set_value_at(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let slot = self
            .layout
            .slot(row, col, self.row_count(), self.column_count())?;
        self.values[slot] = value;
        Ok(())
    }

    /// Raw value buffer in layout order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Destructively resize the rows of a dense matrix
    ///
    /// Names and values are discarded. Square layouts refuse with
    /// [`CoreError::LockedDimensions`]; use [`Self::set_dimension_count`].
    pub fn set_row_count(&mut self, rows: usize) -> Result<()> {
        if self.layout.is_square() {
            return Err(CoreError::LockedDimensions);
        }
        let columns = self.column_count();
        self.grid.set_row_count(rows);
        self.grid.set_column_count(columns);
        self.values = vec![0.0; self.layout.storage_len(rows, columns)];
        Ok(())
    }

    /// Destructively resize the columns of a dense matrix
    pub fn set_column_count(&mut self, columns: usize) -> Result<()> {
        if self.layout.is_square() {
            return Err(CoreError::LockedDimensions);
        }
        let rows = self.row_count();
        self.grid.set_row_count(rows);
        self.grid.set_column_count(columns);
        self.values = vec![0.0; self.layout.storage_len(rows, columns)];
        Ok(())
    }

    /// Resize rows, columns and values together to `n`, zero-filling
    pub fn set_dimension_count(&mut self, n: usize) {
        self.grid.set_row_count(n);
        self.grid.set_column_count(n);
        self.values = vec![0.0; self.layout.storage_len(n, n)];
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.values.clear();
    }

    /// Debug dump of names and stored values
    pub fn describe(&self, fmt: &NumberFormat) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:?} matrix {} x {} ({} stored)",
            self.layout,
            self.row_count(),
            self.column_count(),
            self.values.len()
        );
        for row in 0..self.row_count() {
            let _ = write!(out, "{:<10}", self.grid.row_names()[row]);
            for col in 0..self.column_count() {
                if let Ok(value) = self.value_at(row, col) {
                    let _ = write!(out, " {}", format_real(value, fmt));
                } else {
                    let _ = write!(out, " {:>w$}", ".", w = fmt.width);
                }
            }
            out.push('\n');
        }
        out
    }
}

impl SparseMatrix for LabeledMatrix {
    fn get_element(&self, row: usize, col: usize) -> Option<f64> {
        self.value_at(row, col).ok()
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }
}

/// Rebuild a matrix from kept source indices, in the given order
///
/// Only meaningful for the diagonal layout, where index `i` owns row name
/// `i`, column name `i` and value `i`.
pub(crate) fn select_diagonal(source: &LabeledMatrix, kept: &[usize]) -> LabeledMatrix {
    let names = source.grid.row_names();
    let columns = source.grid.column_names();
    let mut row_names = Vec::with_capacity(kept.len());
    let mut column_names = Vec::with_capacity(kept.len());
    let mut values = Vec::with_capacity(kept.len());
    for &i in kept {
        row_names.push(names[i].clone());
        column_names.push(columns[i].clone());
        values.push(source.values[i]);
    }
    LabeledMatrix {
        grid: LabeledGrid::from_names(row_names, column_names),
        layout: Layout::Diagonal,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_slots() {
        assert_eq!(Layout::Dense.slot(1, 2, 2, 3), Ok(5));
        assert_eq!(Layout::Diagonal.slot(2, 2, 3, 3), Ok(2));
        assert_eq!(
            Layout::Diagonal.slot(0, 1, 3, 3),
            Err(CoreError::StructuralViolation { row: 0, col: 1 })
        );
        assert_eq!(Layout::LowerTriangular.slot(2, 1, 3, 3), Ok(4));
        assert_eq!(Layout::LowerTriangular.slot(1, 2, 3, 3), Ok(4));
        assert_eq!(
            Layout::Dense.slot(2, 0, 2, 3),
            Err(CoreError::IndexOutOfBounds { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_storage_len() {
        assert_eq!(Layout::Dense.storage_len(4, 3), 12);
        assert_eq!(Layout::Diagonal.storage_len(4, 4), 4);
        assert_eq!(Layout::LowerTriangular.storage_len(4, 4), 10);
    }

    #[test]
    fn test_dense_resize_is_destructive() {
        let mut matrix = LabeledMatrix::dense(2, 3);
        matrix.set_value_at(1, 2, 9.0).unwrap();
        matrix.set_row_name_at(1, "n2").unwrap();

        matrix.set_row_count(4).unwrap();
        assert_eq!(matrix.dimensions(), (4, 3));
        assert_eq!(matrix.value_at(1, 2), Ok(0.0));
        assert_eq!(matrix.row_name_at(1), Ok(""));
    }

    #[test]
    fn test_square_layouts_are_locked() {
        let mut matrix = LabeledMatrix::square(Layout::LowerTriangular, 3);
        assert_eq!(matrix.set_row_count(2), Err(CoreError::LockedDimensions));
        assert_eq!(matrix.set_column_count(2), Err(CoreError::LockedDimensions));
        matrix.set_dimension_count(2);
        assert_eq!(matrix.nnz(), 3);
    }

    #[test]
    fn test_from_parts_checks_lengths() {
        let grid = LabeledGrid::with_counts(2, 2);
        assert_eq!(
            LabeledMatrix::from_parts(grid.clone(), Layout::Diagonal, vec![1.0]),
            Err(CoreError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );

        let matrix = LabeledMatrix::from_parts(grid, Layout::Diagonal, vec![1.0, 2.0]).unwrap();
        let (_, layout, values) = matrix.into_parts();
        assert_eq!(layout, Layout::Diagonal);
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_describe_marks_missing_cells() {
        let mut matrix = LabeledMatrix::square(Layout::Diagonal, 2);
        matrix.set_row_name_at(0, "A").unwrap();
        matrix.set_value_at(0, 0, 1.0).unwrap();

        let text = matrix.describe(&NumberFormat::new(6, 2));
        assert!(text.starts_with("Diagonal matrix 2 x 2 (2 stored)"));
        assert!(text.contains("A            1.00      ."));
    }
}
