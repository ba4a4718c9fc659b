//! ASCII connection files
//!
//! One connection per line in fixed columns: first key `0..8`, last key
//! `11..19`, correlation `22..30`, and for mode connections the first and
//! last frequency at `33..41` and `44..52`. Lines starting with `$` are
//! comments. Reads size the target from a count pass before filling it.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Instant;

use meshcorr_core::format::constants::COMMENT_MARKER;
use meshcorr_core::format::{format_connection_line, parse_connection_line, ConnectionRecord};
use meshcorr_core::{ConnectionMatrix, ModeConnectionMatrix};
use tracing::{debug, info};

use crate::config::{header_timestamp, ConnectionFileConfig};
use crate::error::{CoreResultExt, MeshcorrError, Result};
use crate::source::SourceText;

fn is_data_line(line: &str) -> bool {
    !line.starts_with(COMMENT_MARKER) && !line.trim().is_empty()
}

/// Fill `target` from connection file text, returning the connection count
///
/// Frequency columns are ignored. `target` is resized first, so whatever it
/// held is discarded.
pub fn parse_connections(
    text: &str,
    target: &mut ConnectionMatrix,
) -> meshcorr_core::Result<usize> {
    let count = text.lines().filter(|l| is_data_line(l)).count();
    target.set_connection_count(count);

    let mut index = 0;
    for (number, line) in text.lines().enumerate() {
        if let Some(record) = parse_connection_line(line, number + 1)? {
            target.set_connection(index, record.first, record.last, record.correlation)?;
            index += 1;
        }
    }
    Ok(count)
}

/// Fill `target` from mode connection file text
///
/// Lines without frequency columns store `0.0` for both frequencies.
pub fn parse_mode_connections(
    text: &str,
    target: &mut ModeConnectionMatrix,
) -> meshcorr_core::Result<usize> {
    let count = text.lines().filter(|l| is_data_line(l)).count();
    target.set_connection_count(count);

    let mut index = 0;
    for (number, line) in text.lines().enumerate() {
        if let Some(record) = parse_connection_line(line, number + 1)? {
            target.set_connection(index, record.first, record.last, record.correlation)?;
            let (first, last) = record.frequencies.unwrap_or((0.0, 0.0));
            target.set_frequencies(index, first, last)?;
            index += 1;
        }
    }
    Ok(count)
}

fn render_header(out: &mut String, config: &ConnectionFileConfig, count: usize) {
    let _ = writeln!(out, "{COMMENT_MARKER} meshcorr connection file");
    let _ = writeln!(
        out,
        "{COMMENT_MARKER} Created      : {}",
        header_timestamp(config.timestamp())
    );
    if let Some(name) = config.first_source() {
        let _ = writeln!(out, "{COMMENT_MARKER} First source : {name}");
    }
    if let Some(name) = config.last_source() {
        let _ = writeln!(out, "{COMMENT_MARKER} Last source  : {name}");
    }
    let _ = writeln!(out, "{COMMENT_MARKER} Connections  : {count}");
    let _ = writeln!(out, "{COMMENT_MARKER}");
}

/// Render a connection matrix as file text
pub fn render_connections(
    matrix: &ConnectionMatrix,
    config: &ConnectionFileConfig,
) -> meshcorr_core::Result<String> {
    let mut out = String::new();
    render_header(&mut out, config, matrix.connection_count());
    for (index, connection) in matrix.iter().enumerate() {
        let record = ConnectionRecord {
            first: connection.first,
            last: connection.last,
            correlation: connection.correlation,
            frequencies: None,
        };
        out.push_str(&format_connection_line(index, &record, config.number_format())?);
        out.push('\n');
    }
    Ok(out)
}

/// Render a mode connection matrix, frequencies included
pub fn render_mode_connections(
    matrix: &ModeConnectionMatrix,
    config: &ConnectionFileConfig,
) -> meshcorr_core::Result<String> {
    let mut out = String::new();
    render_header(&mut out, config, matrix.connection_count());
    let frequencies = matrix
        .first_frequencies()
        .iter()
        .zip(matrix.last_frequencies());
    for (index, (connection, (&f1, &f2))) in matrix.iter().zip(frequencies).enumerate() {
        let record = ConnectionRecord {
            first: connection.first,
            last: connection.last,
            correlation: connection.correlation,
            frequencies: Some((f1, f2)),
        };
        out.push_str(&format_connection_line(index, &record, config.number_format())?);
        out.push('\n');
    }
    Ok(out)
}

/// File-level entry points for ASCII connection files
pub struct ConnectionFile;

impl ConnectionFile {
    /// Read node connections from `path`
    pub fn read<P: AsRef<Path>>(path: P) -> Result<ConnectionMatrix> {
        let mut matrix = ConnectionMatrix::default();
        Self::read_into(path, &mut matrix)?;
        Ok(matrix)
    }

    /// Read node connections into an existing matrix
    pub fn read_into<P: AsRef<Path>>(path: P, target: &mut ConnectionMatrix) -> Result<usize> {
        let path = path.as_ref();
        let start = Instant::now();
        let text = SourceText::load(path)?;
        let count = parse_connections(text.as_str(), target).in_file(path)?;
        info!(
            path = %path.display(),
            connections = count,
            elapsed_us = start.elapsed().as_micros() as u64,
            "read connection file"
        );
        Ok(count)
    }

    /// Read mode connections from `path`
    pub fn read_modes<P: AsRef<Path>>(path: P) -> Result<ModeConnectionMatrix> {
        let mut matrix = ModeConnectionMatrix::default();
        Self::read_modes_into(path, &mut matrix)?;
        Ok(matrix)
    }

    pub fn read_modes_into<P: AsRef<Path>>(
        path: P,
        target: &mut ModeConnectionMatrix,
    ) -> Result<usize> {
        let path = path.as_ref();
        let text = SourceText::load(path)?;
        let count = parse_mode_connections(text.as_str(), target).in_file(path)?;
        info!(path = %path.display(), connections = count, "read mode connection file");
        Ok(count)
    }

    /// Write node connections to `path`, replacing any existing file
    pub fn write<P: AsRef<Path>>(
        path: P,
        matrix: &ConnectionMatrix,
        config: &ConnectionFileConfig,
    ) -> Result<()> {
        let path = path.as_ref();
        let text = render_connections(matrix, config).in_file(path)?;
        write_text(path, &text)?;
        info!(
            path = %path.display(),
            connections = matrix.connection_count(),
            "wrote connection file"
        );
        Ok(())
    }

    /// Write mode connections with their frequencies
    pub fn write_modes<P: AsRef<Path>>(
        path: P,
        matrix: &ModeConnectionMatrix,
        config: &ConnectionFileConfig,
    ) -> Result<()> {
        let path = path.as_ref();
        let text = render_mode_connections(matrix, config).in_file(path)?;
        write_text(path, &text)?;
        info!(
            path = %path.display(),
            connections = matrix.connection_count(),
            "wrote mode connection file"
        );
        Ok(())
    }
}

pub(crate) fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| MeshcorrError::io(path, e))?;
    debug!(path = %path.display(), bytes = text.len(), "file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use meshcorr_core::CoreError;

    fn fixed_config() -> ConnectionFileConfig {
        let stamp = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap();
        ConnectionFileConfig::default().with_timestamp(stamp)
    }

    #[test]
    fn test_parse_connections_skips_comments() {
        let text = "$ header\n\
                    101        2001        0.25000\n\
                    \n\
                    102        2002        0.50000\n";
        let mut matrix = ConnectionMatrix::default();
        assert_eq!(parse_connections(text, &mut matrix).unwrap(), 2);
        assert_eq!(matrix.first_key(1).unwrap(), "102");
        assert_eq!(matrix.last_key(0).unwrap(), "2001");
        assert_eq!(matrix.correlation(1).unwrap(), 0.5);
    }

    #[test]
    fn test_parse_connections_reports_line() {
        let text = "$ header\n101        2001        bogus\n";
        let mut matrix = ConnectionMatrix::default();
        assert_eq!(
            parse_connections(text, &mut matrix),
            Err(CoreError::MalformedNumber { line: 2, field: 3 })
        );
    }

    #[test]
    fn test_parse_mode_connections_defaults_frequencies() {
        let text = "1          4           0.95000   12.50000   12.70000\n\
                    2          5           0.90000\n";
        let mut modes = ModeConnectionMatrix::default();
        assert_eq!(parse_mode_connections(text, &mut modes).unwrap(), 2);
        assert_eq!(modes.frequencies(0).unwrap(), (12.5, 12.7));
        assert_eq!(modes.frequencies(1).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn test_render_connections() {
        let mut matrix = ConnectionMatrix::with_connections(1);
        matrix.set_connection(0, "101", "2001", 0.25).unwrap();

        let config = fixed_config().with_first_source("fe.bdf");
        let text = render_connections(&matrix, &config).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "$ meshcorr connection file");
        assert_eq!(lines[1], "$ Created      : 2024-01-02 03:04:05");
        assert_eq!(lines[2], "$ First source : fe.bdf");
        assert_eq!(lines[3], "$ Connections  : 1");
        assert_eq!(lines[4], "$");
        assert_eq!(lines[5], "101        2001        0.25000");
    }

    #[test]
    fn test_render_rejects_wide_keys() {
        let mut matrix = ConnectionMatrix::with_connections(1);
        matrix.set_connection(0, "123456789", "1", 0.0).unwrap();
        assert_eq!(
            render_connections(&matrix, &fixed_config()),
            Err(CoreError::FieldOverflow { index: 0, width: 8 })
        );
    }

    #[test]
    fn test_render_rejects_unreadable_keys() {
        let mut matrix = ConnectionMatrix::with_connections(2);
        matrix.set_connection(0, "A", "B", 0.0).unwrap();
        matrix.set_connection(1, "$A", "B", 0.0).unwrap();
        assert_eq!(
            render_connections(&matrix, &fixed_config()),
            Err(CoreError::UnwritableKey { index: 1, field: 1 })
        );

        matrix.set_connection(1, "", "B", 0.0).unwrap();
        assert_eq!(
            render_connections(&matrix, &fixed_config()),
            Err(CoreError::UnwritableKey { index: 1, field: 1 })
        );
    }

    #[test]
    fn test_mode_round_trip_through_text() {
        let mut modes = ModeConnectionMatrix::with_connections(2);
        modes.set_connection(0, "1", "3", 0.97).unwrap();
        modes.set_frequencies(0, 10.25, 10.5).unwrap();
        modes.set_connection(1, "2", "4", 0.81).unwrap();
        modes.set_frequencies(1, 22.0, 21.75).unwrap();

        let text = render_mode_connections(&modes, &fixed_config()).unwrap();
        let mut back = ModeConnectionMatrix::default();
        parse_mode_connections(&text, &mut back).unwrap();
        assert_eq!(back, modes);
    }
}
