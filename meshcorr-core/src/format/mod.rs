//! Text format definitions for bulk data and connection files
//!
//! Column layouts, number formatting and single-record encoding. No I/O
//! happens here; file handling lives in the `meshcorr` crate.

pub mod constants;
pub mod number;
pub mod records;

pub use number::{format_real, NumberFormat};
pub use records::{
    format_connection_line, format_rigid_record, parse_connection_line, ConnectionRecord,
    RigidRecord,
};
