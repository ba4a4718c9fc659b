//! Format-agnostic read access to labelled matrices

/// Read access shared by every storage layout
///
/// `get_element` returns `None` both for cells outside the matrix and for
/// cells the layout does not store (off-diagonal cells of diagonal storage).
pub trait SparseMatrix {
    /// Get the value at the specified position
    fn get_element(&self, row: usize, col: usize) -> Option<f64>;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Number of stored values
    fn nnz(&self) -> usize;

    /// Sum of the stored diagonal cells
    fn trace(&self) -> f64 {
        let (rows, cols) = self.dimensions();
        (0..rows.min(cols))
            .filter_map(|i| self.get_element(i, i))
            .sum()
    }
}
