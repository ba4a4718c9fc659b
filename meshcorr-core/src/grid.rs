//! Row and column label storage shared by every matrix layout
//!
//! Lookups are linear scans over the names in order, so duplicate names
//! always resolve to their earliest index.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Write;

use crate::validation::check_index;
use crate::Result;

/// Ordered row and column names with their counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledGrid {
    row_names: Vec<String>,
    column_names: Vec<String>,
}

impl LabeledGrid {
    /// Create an empty grid
    pub const fn new() -> Self {
        Self {
            row_names: Vec::new(),
            column_names: Vec::new(),
        }
    }

    /// Create a grid with blank names of the given size
    pub fn with_counts(rows: usize, columns: usize) -> Self {
        let mut grid = Self::new();
        grid.set_row_count(rows);
        grid.set_column_count(columns);
        grid
    }

    pub fn row_count(&self) -> usize {
        self.row_names.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// Both counts are zero
    pub fn is_empty(&self) -> bool {
        self.row_names.is_empty() && self.column_names.is_empty()
    }

    pub fn row_name_at(&self, index: usize) -> Result<&str> {
        check_index(index, self.row_names.len())?;
        Ok(&self.row_names[index])
    }

    pub fn column_name_at(&self, index: usize) -> Result<&str> {
        check_index(index, self.column_names.len())?;
        Ok(&self.column_names[index])
    }

    /// First row whose name equals `name`
    pub fn index_of_row(&self, name: &str) -> Option<usize> {
        self.row_names.iter().position(|n| n == name)
    }

    /// First column whose name equals `name`
    pub fn index_of_column(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|n| n == name)
    }

    /// Store a row name, trimmed of surrounding whitespace
    pub fn set_row_name_at(&mut self, index: usize, name: &str) -> Result<()> {
        check_index(index, self.row_names.len())?;
        self.row_names[index] = name.trim().to_string();
        Ok(())
    }

    /// Store a column name, trimmed of surrounding whitespace
    pub fn set_column_name_at(&mut self, index: usize, name: &str) -> Result<()> {
        check_index(index, self.column_names.len())?;
        self.column_names[index] = name.trim().to_string();
        Ok(())
    }

    /// Reallocate the row names. Existing names are discarded.
    pub fn set_row_count(&mut self, count: usize) {
        self.row_names = blank_names(count);
    }

    /// Reallocate the column names. Existing names are discarded.
    pub fn set_column_count(&mut self, count: usize) {
        self.column_names = blank_names(count);
    }

    pub fn clear(&mut self) {
        self.row_names.clear();
        self.column_names.clear();
    }

    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub(crate) fn from_names(row_names: Vec<String>, column_names: Vec<String>) -> Self {
        Self {
            row_names,
            column_names,
        }
    }

    pub(crate) fn into_names(self) -> (Vec<String>, Vec<String>) {
        (self.row_names, self.column_names)
    }

    /// Debug listing of the names
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "LabeledGrid {} x {}",
            self.row_count(),
            self.column_count()
        );
        let _ = writeln!(out, "  rows: {}", self.row_names.join(", "));
        let _ = writeln!(out, "  columns: {}", self.column_names.join(", "));
        out
    }
}

fn blank_names(count: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(count);
    names.resize(count, String::new());
    names
}
