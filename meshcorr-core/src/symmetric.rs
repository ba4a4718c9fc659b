//! Lower-triangular symmetric storage and the nodal mass matrix built on it

use crate::storage::{LabeledMatrix, Layout};
use crate::traits::SparseMatrix;
use crate::Result;

/// Square symmetric storage; row `i` holds `i + 1` values
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricStore {
    inner: LabeledMatrix,
}

impl Default for SymmetricStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SymmetricStore {
    pub const fn new() -> Self {
        Self {
            inner: LabeledMatrix::new(Layout::LowerTriangular),
        }
    }

    pub fn with_dimension(n: usize) -> Self {
        Self {
            inner: LabeledMatrix::square(Layout::LowerTriangular, n),
        }
    }

    pub fn dimension_count(&self) -> usize {
        self.inner.row_count()
    }

    /// Resize rows and columns together, discarding names and values
    pub fn set_dimension_count(&mut self, n: usize) {
        self.inner.set_dimension_count(n);
    }

    /// Value at `(row, col)`; `(col, row)` reads the same slot
    pub fn value_at(&self, row: usize, col: usize) -> Result<f64> {
        self.inner.value_at(row, col)
    }

    pub fn set_value_at(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.inner.set_value_at(row, col, value)
    }

    /// Name row and column `index` together
    pub fn set_name_at(&mut self, index: usize, name: &str) -> Result<()> {
        self.inner.set_row_name_at(index, name)?;
        self.inner.set_column_name_at(index, name)
    }

    pub fn name_at(&self, index: usize) -> Result<&str> {
        self.inner.row_name_at(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.inner.index_of_row(name)
    }

    pub fn matrix(&self) -> &LabeledMatrix {
        &self.inner
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl SparseMatrix for SymmetricStore {
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

/// Nodal mass matrix keyed by node name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassMatrix {
    store: SymmetricStore,
}

impl MassMatrix {
    pub const fn new() -> Self {
        Self {
            store: SymmetricStore::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.store.dimension_count()
    }

    /// Set the node count; rows and columns stay locked together afterwards
    pub fn set_node_count(&mut self, count: usize) {
        self.store.set_dimension_count(count);
    }

    pub fn set_node_name(&mut self, index: usize, key: &str) -> Result<()> {
        self.store.set_name_at(index, key)
    }

    pub fn node_name(&self, index: usize) -> Result<&str> {
        self.store.name_at(index)
    }

    pub fn mass(&self, row: usize, col: usize) -> Result<f64> {
        self.store.value_at(row, col)
    }

    pub fn set_mass(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.store.set_value_at(row, col, value)
    }

    /// Mass coupling between two nodes by key
    pub fn mass_between(&self, a: &str, b: &str) -> Option<f64> {
        let row = self.store.index_of(a)?;
        let col = self.store.index_of(b)?;
        self.store.value_at(row, col).ok()
    }

    pub fn store(&self) -> &SymmetricStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn test_symmetric_access() {
        let mut store = SymmetricStore::with_dimension(3);
        store.set_value_at(0, 2, 4.5).unwrap();

        assert_eq!(store.value_at(2, 0), Ok(4.5));
        assert_eq!(store.value_at(0, 2), Ok(4.5));
        assert_eq!(store.nnz(), 6);
        assert_eq!(
            store.value_at(3, 0),
            Err(CoreError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_rows_and_columns_stay_locked() {
        let mut store = SymmetricStore::with_dimension(2);
        store.set_dimension_count(4);
        assert_eq!(store.dimensions(), (4, 4));
        assert_eq!(store.matrix().values().len(), 10);
    }

    #[test]
    fn test_mass_matrix_by_key() {
        let mut mass = MassMatrix::new();
        mass.set_node_count(2);
        mass.set_node_name(0, " 11 ").unwrap();
        mass.set_node_name(1, "12").unwrap();
        mass.set_mass(0, 0, 2.0).unwrap();
        mass.set_mass(1, 0, 0.5).unwrap();

        assert_eq!(mass.node_name(0), Ok("11"));
        assert_eq!(mass.mass_between("11", "12"), Some(0.5));
        assert_eq!(mass.mass_between("12", "11"), Some(0.5));
        assert_eq!(mass.mass_between("11", "99"), None);
        assert_eq!(mass.store().trace(), 2.0);
    }
}
