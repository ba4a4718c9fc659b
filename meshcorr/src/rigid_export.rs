//! Rigid-connection export
//!
//! Every node connection becomes one rigid element coupling the two keys.
//! The output starts with `$` comment lines naming the author, program
//! version, date and both source meshes, followed by one five-field record
//! per connection.

use std::fmt::Write as _;
use std::path::Path;

use meshcorr_core::format::constants::COMMENT_MARKER;
use meshcorr_core::format::{format_rigid_record, RigidRecord};
use meshcorr_core::ConnectionMatrix;
use tracing::info;

use crate::config::{header_timestamp, IndependentSide, RigidExportConfig};
use crate::connection_file::write_text;
use crate::error::{CoreResultExt, Result};

/// Render rigid elements for every connection in `matrix`
///
/// Record `i` gets identifier `start_id + i`.
pub fn render_rigid(
    matrix: &ConnectionMatrix,
    config: &RigidExportConfig,
) -> meshcorr_core::Result<String> {
    let mut out = String::new();
    let header = [
        ("Author", config.author()),
        ("Version", config.program_version()),
        ("Independent", independent_source(config).unwrap_or("-")),
        ("Dependent", dependent_source(config).unwrap_or("-")),
    ];
    let _ = writeln!(out, "{COMMENT_MARKER} Rigid connections");
    let date = header_timestamp(config.timestamp());
    let _ = writeln!(out, "{COMMENT_MARKER} {:<12}: {date}", "Date");
    for (label, value) in header {
        let _ = writeln!(out, "{COMMENT_MARKER} {label:<12}: {value}");
    }
    let _ = writeln!(out, "{COMMENT_MARKER}");

    for (index, connection) in matrix.iter().enumerate() {
        let (independent, dependent) = match config.independent() {
            IndependentSide::First => (connection.first, connection.last),
            IndependentSide::Last => (connection.last, connection.first),
        };
        let record = RigidRecord {
            type_code: config.type_code(),
            id: config.start_id() + index as u64,
            independent,
            dof_code: config.dof_code(),
            dependent,
        };
        out.push_str(&format_rigid_record(index, &record)?);
        out.push('\n');
    }
    Ok(out)
}

fn independent_source(config: &RigidExportConfig) -> Option<&str> {
    match config.independent() {
        IndependentSide::First => config.first_source(),
        IndependentSide::Last => config.last_source(),
    }
}

fn dependent_source(config: &RigidExportConfig) -> Option<&str> {
    match config.independent() {
        IndependentSide::First => config.last_source(),
        IndependentSide::Last => config.first_source(),
    }
}

/// Write a rigid export of `matrix` to `path`, returning the record count
pub fn write_rigid<P: AsRef<Path>>(
    path: P,
    matrix: &ConnectionMatrix,
    config: &RigidExportConfig,
) -> Result<usize> {
    let path = path.as_ref();
    let text = render_rigid(matrix, config).in_file(path)?;
    write_text(path, &text)?;
    info!(
        path = %path.display(),
        records = matrix.connection_count(),
        start_id = config.start_id(),
        "wrote rigid export"
    );
    Ok(matrix.connection_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use meshcorr_core::CoreError;

    fn config() -> RigidExportConfig {
        let stamp = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(8, 30, 0))
            .unwrap();
        RigidExportConfig::default()
            .with_author("analyst")
            .with_program_version("1.2.0")
            .with_timestamp(stamp)
            .with_first_source("fe.bdf")
            .with_last_source("test.bdf")
    }

    fn matrix() -> ConnectionMatrix {
        let mut matrix = ConnectionMatrix::with_connections(2);
        matrix.set_connection(0, "55", "9001", 0.1).unwrap();
        matrix.set_connection(1, "56", "9002", 0.2).unwrap();
        matrix
    }

    #[test]
    fn test_render_header_and_records() {
        let text = render_rigid(&matrix(), &config().with_start_id(1001)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "$ Rigid connections");
        assert_eq!(lines[1], "$ Date        : 2024-06-01 08:30:00");
        assert_eq!(lines[2], "$ Author      : analyst");
        assert_eq!(lines[3], "$ Version     : 1.2.0");
        assert_eq!(lines[4], "$ Independent : fe.bdf");
        assert_eq!(lines[5], "$ Dependent   : test.bdf");
        assert_eq!(lines[6], "$");
        assert_eq!(lines[7], "RBE2    1001    55      123456  9001");
        assert_eq!(lines[8], "RBE2    1002    56      123456  9002");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_render_last_side_independent() {
        let config = config().with_independent(IndependentSide::Last).with_dof_code("123");
        let text = render_rigid(&matrix(), &config).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[4], "$ Independent : test.bdf");
        assert_eq!(lines[7], "RBE2    1       9001    123     55");
    }

    #[test]
    fn test_render_overflowing_id() {
        let config = config().with_start_id(99_999_999);
        assert_eq!(
            render_rigid(&matrix(), &config),
            Err(CoreError::FieldOverflow { index: 1, width: 8 })
        );
    }
}
