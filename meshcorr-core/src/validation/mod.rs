//! Field validation and parsing utilities
//!
//! Pure functions over strings and indices with no I/O dependencies.

pub mod bounds;
pub mod parsing;

pub use bounds::{check_index, column_slice, floor_char_boundary};
pub use parsing::{parse_real, validate_key};
