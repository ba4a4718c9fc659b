//! Node and mode correspondence matrices
//!
//! A connection is one diagonal entry `(first key, last key, correlation)`.
//! Node connections store a spatial distance, so smaller is better; mode
//! connections store a correlation coefficient, so larger is better. The two
//! `reduce` filters compare in opposite directions accordingly.

use alloc::vec::Vec;

use crate::diagonal::{DiagonalStore, SortSummary};
use crate::format::NumberFormat;
use crate::validation::check_index;
use crate::{CoreError, Result};

/// One connection borrowed from a matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection<'a> {
    pub first: &'a str,
    pub last: &'a str,
    pub correlation: f64,
}

/// Outcome of a `reduce` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReduceSummary {
    pub retained: usize,
    pub dropped: usize,
}

/// Correspondences between nodes of two meshes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionMatrix {
    store: DiagonalStore,
}

impl ConnectionMatrix {
    pub const fn new() -> Self {
        Self {
            store: DiagonalStore::new(),
        }
    }

    /// Create a matrix with `count` blank connections
    pub fn with_connections(count: usize) -> Self {
        Self {
            store: DiagonalStore::with_dimension(count),
        }
    }

    /// Wrap an existing diagonal store without copying
    pub fn from_store(store: DiagonalStore) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> DiagonalStore {
        self.store
    }

    pub fn store(&self) -> &DiagonalStore {
        &self.store
    }

    pub fn connection_count(&self) -> usize {
        self.store.dimension_count()
    }

    /// Destructively resize to `count` blank connections
    pub fn set_connection_count(&mut self, count: usize) {
        self.store.set_dimension_count(count);
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn set_connection(
        &mut self,
        index: usize,
        first: &str,
        last: &str,
        correlation: f64,
    ) -> Result<()> {
        self.store.set_entry(index, first, last, correlation)
    }

    pub fn set_correlation(&mut self, index: usize, correlation: f64) -> Result<()> {
        self.store.set_value(index, correlation)
    }

    pub fn first_key(&self, index: usize) -> Result<&str> {
        self.store.row_name_at(index)
    }

    pub fn last_key(&self, index: usize) -> Result<&str> {
        self.store.column_name_at(index)
    }

    pub fn correlation(&self, index: usize) -> Result<f64> {
        self.store.try_value_at(index, index)
    }

    pub fn connection(&self, index: usize) -> Result<Connection<'_>> {
        check_index(index, self.connection_count())?;
        Ok(Connection {
            first: self.store.row_name_at(index)?,
            last: self.store.column_name_at(index)?,
            correlation: self.store.values()[index],
        })
    }

    /// Connections in index order
    pub fn iter(&self) -> impl Iterator<Item = Connection<'_>> + '_ {
        let grid = self.store.grid();
        grid.row_names()
            .iter()
            .zip(grid.column_names())
            .zip(self.store.values())
            .map(|((first, last), &correlation)| Connection {
                first: first.as_str(),
                last: last.as_str(),
                correlation,
            })
    }

    pub fn index_of_first(&self, key: &str) -> Option<usize> {
        self.store.index_of_row(key)
    }

    pub fn index_of_last(&self, key: &str) -> Option<usize> {
        self.store.index_of_column(key)
    }

    /// Keep connections whose distance is at most `tolerance`
    pub fn reduce(&mut self, tolerance: f64) -> ReduceSummary {
        let kept = self.store.retained_where(|value| value <= tolerance);
        let summary = ReduceSummary {
            retained: kept.len(),
            dropped: self.connection_count() - kept.len(),
        };
        self.store.keep(&kept);
        summary
    }

    /// Reorder and subset by first key; see [`DiagonalStore::sort_rows`]
    pub fn sort_rows<S: AsRef<str>>(&mut self, ordered_keys: &[S]) -> SortSummary {
        self.store.sort_rows(ordered_keys)
    }

    pub fn describe(&self, fmt: &NumberFormat) -> alloc::string::String {
        self.store.describe(fmt)
    }
}

/// Correlations between modes of two analyses, with their frequencies
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeConnectionMatrix {
    connections: ConnectionMatrix,
    first_frequency: Vec<f64>,
    last_frequency: Vec<f64>,
}

impl ModeConnectionMatrix {
    pub const fn new() -> Self {
        Self {
            connections: ConnectionMatrix::new(),
            first_frequency: Vec::new(),
            last_frequency: Vec::new(),
        }
    }

    pub fn with_connections(count: usize) -> Self {
        let mut matrix = Self::new();
        matrix.set_connection_count(count);
        matrix
    }

    /// Take ownership of existing buffers
    ///
    /// Both frequency arrays must have one entry per connection.
    pub fn from_parts(
        connections: ConnectionMatrix,
        first_frequency: Vec<f64>,
        last_frequency: Vec<f64>,
    ) -> Result<Self> {
        let expected = connections.connection_count();
        for len in [first_frequency.len(), last_frequency.len()] {
            if len != expected {
                return Err(CoreError::LengthMismatch {
                    expected,
                    actual: len,
                });
            }
        }
        Ok(Self {
            connections,
            first_frequency,
            last_frequency,
        })
    }

    pub fn into_parts(self) -> (ConnectionMatrix, Vec<f64>, Vec<f64>) {
        (self.connections, self.first_frequency, self.last_frequency)
    }

    pub fn connections(&self) -> &ConnectionMatrix {
        &self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.connection_count()
    }

    /// Destructively resize connections and frequencies together
    pub fn set_connection_count(&mut self, count: usize) {
        self.connections.set_connection_count(count);
        self.first_frequency = alloc::vec![0.0; count];
        self.last_frequency = alloc::vec![0.0; count];
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn clear(&mut self) {
        self.connections.clear();
        self.first_frequency.clear();
        self.last_frequency.clear();
    }

    pub fn set_connection(
        &mut self,
        index: usize,
        first: &str,
        last: &str,
        correlation: f64,
    ) -> Result<()> {
        self.connections.set_connection(index, first, last, correlation)
    }

    pub fn set_frequencies(&mut self, index: usize, first: f64, last: f64) -> Result<()> {
        check_index(index, self.first_frequency.len())?;
        self.first_frequency[index] = first;
        self.last_frequency[index] = last;
        Ok(())
    }

    pub fn connection(&self, index: usize) -> Result<Connection<'_>> {
        self.connections.connection(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = Connection<'_>> + '_ {
        self.connections.iter()
    }

    /// First and last frequency of connection `index`
    pub fn frequencies(&self, index: usize) -> Result<(f64, f64)> {
        check_index(index, self.first_frequency.len())?;
        Ok((self.first_frequency[index], self.last_frequency[index]))
    }

    pub fn first_frequencies(&self) -> &[f64] {
        &self.first_frequency
    }

    pub fn last_frequencies(&self) -> &[f64] {
        &self.last_frequency
    }

    /// Keep connections whose coefficient is at least `tolerance`
    pub fn reduce(&mut self, tolerance: f64) -> ReduceSummary {
        let kept = self
            .connections
            .store
            .retained_where(|value| value >= tolerance);
        let summary = ReduceSummary {
            retained: kept.len(),
            dropped: self.connection_count() - kept.len(),
        };
        self.keep(&kept);
        summary
    }

    /// Reorder and subset by first key, carrying frequencies along
    pub fn sort_rows<S: AsRef<str>>(&mut self, ordered_keys: &[S]) -> SortSummary {
        let (summary, order) = self.connections.store.sort_order(ordered_keys);
        self.keep(&order);
        summary
    }

    fn keep(&mut self, indices: &[usize]) {
        self.connections.store.keep(indices);
        self.first_frequency = indices.iter().map(|&i| self.first_frequency[i]).collect();
        self.last_frequency = indices.iter().map(|&i| self.last_frequency[i]).collect();
    }

    pub fn describe(&self, fmt: &NumberFormat) -> alloc::string::String {
        self.connections.describe(fmt)
    }
}
