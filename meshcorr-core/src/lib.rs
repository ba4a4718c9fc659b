#![cfg_attr(not(test), no_std)]

//! meshcorr core - bulk-data parsing and correspondence matrix storage
//!
//! This crate provides the I/O-free half of meshcorr: the labelled matrix
//! layouts that hold node and mode correspondences, and the parser that
//! turns bulk-data text into node and element collections.

extern crate alloc;

pub mod bulk;
pub mod connection;
pub mod diagonal;
pub mod error;
pub mod format;
pub mod grid;
pub mod nodes;
pub mod storage;
pub mod symmetric;
pub mod traits;
pub mod validation;

pub use bulk::{BulkConfig, BulkModel, BulkReader, EntityCounts, Keyword, ReadReport};
pub use connection::{Connection, ConnectionMatrix, ModeConnectionMatrix, ReduceSummary};
pub use diagonal::{DiagonalStore, SortSummary};
pub use error::*;
pub use format::NumberFormat;
pub use grid::LabeledGrid;
pub use nodes::NodeGrid;
pub use storage::{LabeledMatrix, Layout};
pub use symmetric::{MassMatrix, SymmetricStore};
pub use traits::SparseMatrix;
