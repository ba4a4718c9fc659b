//! meshcorr - mesh and mode correspondence files
//!
//! This crate adds file handling on top of `meshcorr-core`: reading
//! bulk-data decks, reading and writing ASCII connection files, and exporting
//! node connections as rigid elements.
//!
//! ## Architecture
//!
//! - **meshcorr-core**: storage layouts, record formats and the bulk parser (no I/O)
//! - **meshcorr**: files, logging and the `meshcorr` command-line tool
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meshcorr::{BulkFile, ConnectionFile, ConnectionFileConfig};
//!
//! fn example() -> meshcorr::Result<()> {
//!     let (mut model, report) = BulkFile::read("wing.bdf")?;
//!     println!("{} nodes, {} bars", report.counts.nodes, report.counts.bars);
//!
//!     meshcorr::measure_edges(&mut model);
//!     model.bars.reduce(0.5);
//!     ConnectionFile::write("short_bars.txt", &model.bars, &ConnectionFileConfig::default())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap**: memory-map input files instead of copying them
//! - **serde**: serialisable summaries and configuration
//! - **cli**: the `meshcorr` binary

pub use meshcorr_core::{
    // Storage
    ConnectionMatrix, DiagonalStore, LabeledGrid, LabeledMatrix, Layout, MassMatrix,
    ModeConnectionMatrix, NodeGrid, SparseMatrix, SymmetricStore,
    // Operation summaries
    Connection, ReduceSummary, SortSummary,
    // Bulk data
    BulkConfig, BulkModel, BulkReader, EntityCounts, Keyword, ReadReport,
    // Formatting and errors
    CoreError, ErrorCategory, NumberFormat,
};

pub mod bulk_file;
pub mod config;
pub mod connection_file;
pub mod error;
pub mod geometry;
pub mod rigid_export;
pub mod source;

pub use bulk_file::BulkFile;
pub use config::{ConnectionFileConfig, IndependentSide, RigidExportConfig};
pub use connection_file::ConnectionFile;
pub use error::{MeshcorrError, Result};
pub use geometry::{distance, measure_edges};
pub use rigid_export::{render_rigid, write_rigid};
