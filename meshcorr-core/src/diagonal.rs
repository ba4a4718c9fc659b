//! Diagonal-only labelled storage
//!
//! A [`DiagonalStore`] is a square grid whose only addressable cells lie on
//! the main diagonal. Index `i` owns row name `i`, column name `i` and value
//! `i`, which makes the store a compact list of labelled pairs.

use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::format::NumberFormat;
use crate::grid::LabeledGrid;
use crate::storage::{select_diagonal, LabeledMatrix, Layout};
use crate::traits::SparseMatrix;
use crate::validation::check_index;
use crate::Result;

/// Outcome of [`DiagonalStore::sort_rows`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortSummary {
    /// Keys that found a row and were placed
    pub matched: usize,
    /// Keys with no row of that name
    pub unmatched_keys: usize,
    /// Repeated keys skipped because they were already placed
    pub duplicate_keys: usize,
    /// Original rows left out of the result
    pub dropped_rows: usize,
}

/// Square labelled storage with values on the diagonal only
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalStore {
    inner: LabeledMatrix,
}

impl Default for DiagonalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagonalStore {
    pub const fn new() -> Self {
        Self {
            inner: LabeledMatrix::new(Layout::Diagonal),
        }
    }

    /// Create a store of dimension `n`, zero-filled
    pub fn with_dimension(n: usize) -> Self {
        Self {
            inner: LabeledMatrix::square(Layout::Diagonal, n),
        }
    }

    /// Take ownership of existing names and values without copying
    pub fn from_parts(grid: LabeledGrid, values: Vec<f64>) -> Result<Self> {
        let inner = LabeledMatrix::from_parts(grid, Layout::Diagonal, values)?;
        Ok(Self { inner })
    }

    pub fn into_matrix(self) -> LabeledMatrix {
        self.inner
    }

    pub fn matrix(&self) -> &LabeledMatrix {
        &self.inner
    }

    pub fn grid(&self) -> &LabeledGrid {
        self.inner.grid()
    }

    pub fn dimension_count(&self) -> usize {
        self.inner.row_count()
    }

    /// Resize names and values together, zero-filling
    pub fn set_dimension_count(&mut self, n: usize) {
        self.inner.set_dimension_count(n);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Value at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics when `row != col` or either index is out of range. Off-diagonal
    /// access is an internal invariant breach; use [`Self::try_value_at`] to
    /// probe.
    pub fn value_at(&self, row: usize, col: usize) -> f64 {
        match self.inner.value_at(row, col) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked form of [`Self::value_at`]
    pub fn try_value_at(&self, row: usize, col: usize) -> Result<f64> {
        self.inner.value_at(row, col)
    }

    /// Diagonal value `i`; shorthand for `value_at(i, i)`
    pub fn value(&self, index: usize) -> f64 {
        self.value_at(index, index)
    }

    pub fn set_value(&mut self, index: usize, value: f64) -> Result<()> {
        self.inner.set_value_at(index, index, value)
    }

    pub fn values(&self) -> &[f64] {
        self.inner.values()
    }

    pub fn row_name_at(&self, index: usize) -> Result<&str> {
        self.inner.row_name_at(index)
    }

    pub fn column_name_at(&self, index: usize) -> Result<&str> {
        self.inner.column_name_at(index)
    }

    pub fn set_row_name_at(&mut self, index: usize, name: &str) -> Result<()> {
        self.inner.set_row_name_at(index, name)
    }

    pub fn set_column_name_at(&mut self, index: usize, name: &str) -> Result<()> {
        self.inner.set_column_name_at(index, name)
    }

    pub fn index_of_row(&self, name: &str) -> Option<usize> {
        self.inner.index_of_row(name)
    }

    pub fn index_of_column(&self, name: &str) -> Option<usize> {
        self.inner.index_of_column(name)
    }

    /// Set row name, column name and value of entry `index` at once
    pub fn set_entry(&mut self, index: usize, row: &str, column: &str, value: f64) -> Result<()> {
        check_index(index, self.dimension_count())?;
        self.inner.set_row_name_at(index, row)?;
        self.inner.set_column_name_at(index, column)?;
        self.inner.values_mut()[index] = value;
        Ok(())
    }

    /// Reorder and subset the store to follow `ordered_keys`
    ///
    /// Each key is placed at most once, taking the first row with that name.
    /// Rows whose name is not among the keys are dropped. The summary counts
    /// what was matched and what was lost.
    pub fn sort_rows<S: AsRef<str>>(&mut self, ordered_keys: &[S]) -> SortSummary {
        let (summary, order) = self.sort_order(ordered_keys);
        self.keep(&order);
        summary
    }

    /// Source indices `sort_rows` would keep, in output order
    pub(crate) fn sort_order<S: AsRef<str>>(
        &self,
        ordered_keys: &[S],
    ) -> (SortSummary, Vec<usize>) {
        let mut placed: HashSet<&str> = HashSet::with_capacity(ordered_keys.len());
        let mut order = Vec::with_capacity(ordered_keys.len().min(self.dimension_count()));
        let mut summary = SortSummary::default();

        for key in ordered_keys {
            let key = key.as_ref();
            if placed.contains(key) {
                summary.duplicate_keys += 1;
                continue;
            }
            match self.index_of_row(key) {
                Some(index) => {
                    placed.insert(key);
                    order.push(index);
                }
                None => summary.unmatched_keys += 1,
            }
        }

        summary.matched = order.len();
        summary.dropped_rows = self.dimension_count() - order.len();
        (summary, order)
    }

    /// Source indices whose value satisfies `keep`, in original order
    pub(crate) fn retained_where(&self, keep: impl Fn(f64) -> bool) -> Vec<usize> {
        self.values()
            .iter()
            .enumerate()
            .filter(|(_, v)| keep(**v))
            .map(|(i, _)| i)
            .collect()
    }

    /// Replace the backing buffers with the entries at `indices`
    pub(crate) fn keep(&mut self, indices: &[usize]) {
        self.inner = select_diagonal(&self.inner, indices);
    }

    pub fn describe(&self, fmt: &NumberFormat) -> alloc::string::String {
        self.inner.describe(fmt)
    }
}

impl SparseMatrix for DiagonalStore {
    fn get_element(&self, row: usize, col: usize) -> Option<f64> {
        self.inner.get_element(row, col)
    }

    fn dimensions(&self) -> (usize, usize) {
        self.inner.dimensions()
    }

    fn nnz(&self) -> usize {
        self.inner.nnz()
    }
}
