//! Single-line encoding of connection and rigid-connection records

use alloc::format;
use alloc::string::String;

use super::constants::{connection, rigid, COMMENT_MARKER};
use super::number::{format_real, NumberFormat};
use crate::validation::{column_slice, parse_real};
use crate::{CoreError, Result};

/// One connection read from an ASCII connection file line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionRecord<'a> {
    pub first: &'a str,
    pub last: &'a str,
    pub correlation: f64,
    /// First and last frequency, present in mode connection files
    pub frequencies: Option<(f64, f64)>,
}

/// Fields of one rigid-connection export record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidRecord<'a> {
    pub type_code: &'a str,
    pub id: u64,
    pub independent: &'a str,
    pub dof_code: &'a str,
    pub dependent: &'a str,
}

fn column(line: &str, range: core::ops::Range<usize>) -> &str {
    column_slice(line, range.start, range.end)
        .map(str::trim)
        .unwrap_or("")
}

/// Parse one line of an ASCII connection file
///
/// Comment and blank lines yield `Ok(None)`. Columns past the end of a short
/// line read as blank. `line_number` is only used for error reporting.
pub fn parse_connection_line(
    line: &str,
    line_number: usize,
) -> Result<Option<ConnectionRecord<'_>>> {
    if line.starts_with(COMMENT_MARKER) || line.trim().is_empty() {
        return Ok(None);
    }

    let first = column(line, connection::FIRST_KEY);
    if first.is_empty() {
        return Err(CoreError::MissingField {
            line: line_number,
            field: 1,
        });
    }
    let last = column(line, connection::LAST_KEY);
    if last.is_empty() {
        return Err(CoreError::MissingField {
            line: line_number,
            field: 2,
        });
    }

    let correlation = parse_real(column(line, connection::CORRELATION)).ok_or(
        CoreError::MalformedNumber {
            line: line_number,
            field: 3,
        },
    )?;

    let first_freq = column(line, connection::FIRST_FREQUENCY);
    let last_freq = column(line, connection::LAST_FREQUENCY);
    let frequencies = if first_freq.is_empty() && last_freq.is_empty() {
        None
    } else {
        let f1 = parse_real(first_freq).ok_or(CoreError::MalformedNumber {
            line: line_number,
            field: 4,
        })?;
        let f2 = parse_real(last_freq).ok_or(CoreError::MalformedNumber {
            line: line_number,
            field: 5,
        })?;
        Some((f1, f2))
    };

    Ok(Some(ConnectionRecord {
        first,
        last,
        correlation,
        frequencies,
    }))
}

/// Reject keys that would read back differently: blank ones, and a first
/// key that would turn the line into a comment
fn check_key(index: usize, field: usize, key: &str) -> Result<()> {
    if key.trim().is_empty() || (field == 1 && key.starts_with(COMMENT_MARKER)) {
        return Err(CoreError::UnwritableKey { index, field });
    }
    Ok(())
}

/// Format one connection as a fixed-column line
///
/// `index` identifies the connection in a [`CoreError::FieldOverflow`] when a
/// key does not fit its column, or a [`CoreError::UnwritableKey`] when it
/// would not read back.
pub fn format_connection_line(
    index: usize,
    record: &ConnectionRecord<'_>,
    fmt: &NumberFormat,
) -> Result<String> {
    let width = connection::FIELD_WIDTH;
    if record.first.len() > width || record.last.len() > width {
        return Err(CoreError::FieldOverflow { index, width });
    }
    check_key(index, 1, record.first)?;
    check_key(index, 2, record.last)?;

    let value_fmt = fmt.with_width(width);
    let gap = connection::GAP;
    let mut line = format!(
        "{:<width$}{gap}{:<width$}{gap}{}",
        record.first,
        record.last,
        format_real(record.correlation, &value_fmt)
    );
    if let Some((f1, f2)) = record.frequencies {
        line.push_str(gap);
        line.push_str(&format_real(f1, &value_fmt));
        line.push_str(gap);
        line.push_str(&format_real(f2, &value_fmt));
    }
    Ok(line)
}

/// Format one rigid-connection record as five 8-column fields
pub fn format_rigid_record(index: usize, record: &RigidRecord<'_>) -> Result<String> {
    let width = rigid::FIELD_WIDTH;
    let id = format!("{}", record.id);
    let fields = [
        record.type_code,
        id.as_str(),
        record.independent,
        record.dof_code,
        record.dependent,
    ];
    if fields.iter().any(|f| f.len() > width) {
        return Err(CoreError::FieldOverflow { index, width });
    }
    check_key(index, 3, record.independent)?;
    check_key(index, 5, record.dependent)?;

    let line = format!(
        "{:<width$}{:<width$}{:<width$}{:<width$}{}",
        fields[0], fields[1], fields[2], fields[3], fields[4]
    );
    Ok(line)
}
