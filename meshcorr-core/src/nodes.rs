//! Node coordinates keyed by node name

use hashbrown::HashMap;

use crate::storage::LabeledMatrix;
use crate::traits::SparseMatrix;
use crate::Result;

/// Names of the three coordinate columns
pub const AXIS_NAMES: [&str; 3] = ["X", "Y", "Z"];

/// Dense `n x 3` grid of node coordinates with node keys as row names
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGrid {
    inner: LabeledMatrix,
}

impl Default for NodeGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeGrid {
    pub fn new() -> Self {
        Self::with_node_count(0)
    }

    pub fn with_node_count(count: usize) -> Self {
        let mut grid = Self {
            inner: LabeledMatrix::dense(count, AXIS_NAMES.len()),
        };
        grid.name_axes();
        grid
    }

    fn name_axes(&mut self) {
        for (i, axis) in AXIS_NAMES.iter().enumerate() {
            // Three columns always exist after a dense resize
            let _ = self.inner.set_column_name_at(i, axis);
        }
    }

    pub fn node_count(&self) -> usize {
        self.inner.row_count()
    }

    /// Destructively resize to `count` blank nodes
    pub fn set_node_count(&mut self, count: usize) {
        self.inner = LabeledMatrix::dense(count, AXIS_NAMES.len());
        self.name_axes();
    }

    pub fn set_node(&mut self, index: usize, key: &str, coordinates: [f64; 3]) -> Result<()> {
        self.inner.set_row_name_at(index, key)?;
        for (axis, value) in coordinates.into_iter().enumerate() {
            self.inner.set_value_at(index, axis, value)?;
        }
        Ok(())
    }

    pub fn key_at(&self, index: usize) -> Result<&str> {
        self.inner.row_name_at(index)
    }

    pub fn coordinates_at(&self, index: usize) -> Result<[f64; 3]> {
        Ok([
            self.inner.value_at(index, 0)?,
            self.inner.value_at(index, 1)?,
            self.inner.value_at(index, 2)?,
        ])
    }

    /// First node with this key
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.inner.index_of_row(key)
    }

    pub fn coordinates(&self, key: &str) -> Option<[f64; 3]> {
        self.index_of(key)
            .and_then(|index| self.coordinates_at(index).ok())
    }

    /// Key to index map, keeping the earliest index of duplicate keys
    pub fn key_index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::with_capacity(self.node_count());
        for (i, key) in self.inner.grid().row_names().iter().enumerate() {
            index.entry(key.as_str()).or_insert(i);
        }
        index
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    pub fn clear(&mut self) {
        self.set_node_count(0);
    }

    pub fn matrix(&self) -> &LabeledMatrix {
        &self.inner
    }
}

impl SparseMatrix for NodeGrid {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_lookup_nodes() {
        let mut nodes = NodeGrid::with_node_count(2);
        nodes.set_node(0, "1", [0.0, 0.0, 0.0]).unwrap();
        nodes.set_node(1, "2", [1.0, 2.0, 2.0]).unwrap();

        assert_eq!(nodes.coordinates("2"), Some([1.0, 2.0, 2.0]));
        assert_eq!(nodes.coordinates("3"), None);
        assert_eq!(nodes.matrix().column_name_at(2), Ok("Z"));
        assert_eq!(nodes.dimensions(), (2, 3));
    }

    #[test]
    fn test_key_index_prefers_first_duplicate() {
        let mut nodes = NodeGrid::with_node_count(3);
        nodes.set_node(0, "7", [0.0; 3]).unwrap();
        nodes.set_node(1, "8", [0.0; 3]).unwrap();
        nodes.set_node(2, "7", [1.0; 3]).unwrap();

        let index = nodes.key_index();
        assert_eq!(index.get("7"), Some(&0));
        assert_eq!(index.get("8"), Some(&1));
    }

    #[test]
    fn test_resize_keeps_axis_names() {
        let mut nodes = NodeGrid::new();
        nodes.set_node_count(4);
        assert_eq!(nodes.matrix().column_name_at(0), Ok("X"));
        assert_eq!(nodes.coordinates_at(3), Ok([0.0; 3]));
    }
}
