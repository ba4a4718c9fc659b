//! Logical records and per-encoding field extraction

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::line::{classify, pad_line, LineKind};
use super::reader::BulkConfig;
use crate::format::constants::bulk::{
    CONTINUATION_OFFSET, DATA_END, FREE_SEPARATOR, LARGE_FIELD_WIDTH, LARGE_MARKER,
    SMALL_FIELD_WIDTH,
};
use crate::validation::{column_slice, floor_char_boundary, parse_real, validate_key};
use crate::{CoreError, Result};

/// Field encoding of a logical record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldEncoding {
    Free,
    Large,
    Small,
}

/// Line counts gathered while merging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeStats {
    /// Physical lines seen
    pub lines: usize,
    /// Lines with only whitespace
    pub blank: usize,
    pub comments: usize,
    pub continuations: usize,
    /// Continuation lines with no record to extend
    pub orphans: usize,
    pub records: usize,
}

/// One entity declaration after continuation lines have been merged
///
/// Fields are split when each physical line is merged, using that line's own
/// encoding, so a continuation may use a different encoding than the line it
/// extends. The record keeps the encoding of its first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalRecord {
    line: usize,
    encoding: FieldEncoding,
    fields: Vec<String>,
}

impl LogicalRecord {
    /// Build a record from a single line, detecting its encoding
    pub fn new(line: usize, text: &str) -> Self {
        let encoding = if text.contains(FREE_SEPARATOR) {
            FieldEncoding::Free
        } else if text.contains(LARGE_MARKER) {
            FieldEncoding::Large
        } else {
            FieldEncoding::Small
        };
        Self::open(line, encoding, text)
    }

    fn open(line: usize, encoding: FieldEncoding, data: &str) -> Self {
        let fields = match encoding {
            FieldEncoding::Free => split_free(data).collect(),
            FieldEncoding::Large | FieldEncoding::Small => {
                let keyword = column_slice(data, 0, SMALL_FIELD_WIDTH).unwrap_or("");
                core::iter::once(keyword.trim().to_string())
                    .chain(split_fixed(data, encoding))
                    .collect()
            }
        };
        Self {
            line,
            encoding,
            fields,
        }
    }

    /// One-based line number of the first physical line
    pub fn line(&self) -> usize {
        self.line
    }

    /// Encoding of the record's first line
    pub fn encoding(&self) -> FieldEncoding {
        self.encoding
    }

    /// Number of fields, keyword included
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Keyword with any large-field marker stripped
    pub fn keyword(&self) -> &str {
        self.fields
            .first()
            .map(|k| k.trim_end_matches(LARGE_MARKER).trim_end())
            .unwrap_or("")
    }

    /// Trimmed text of field `index`; field 0 is the keyword
    pub fn field(&self, index: usize) -> Result<&str> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or(CoreError::RecordTooShort {
                line: self.line,
                field: index,
            })
    }

    /// Real value of field `index`; a blank field reads as zero
    pub fn real_field(&self, index: usize) -> Result<f64> {
        let text = self.field(index)?;
        if text.is_empty() {
            return Ok(0.0);
        }
        parse_real(text).ok_or(CoreError::MalformedNumber {
            line: self.line,
            field: index,
        })
    }

    /// Non-blank key in field `index`
    pub fn key_field(&self, index: usize) -> Result<&str> {
        let text = self.field(index)?;
        if !validate_key(text) {
            return Err(CoreError::MissingField {
                line: self.line,
                field: index,
            });
        }
        Ok(text)
    }

    /// Append the data fields of a padded continuation line
    fn extend(&mut self, kind: LineKind, padded: &str) {
        match kind {
            LineKind::FreeContinuation => {
                let data = padded.trim_end();
                let data = data.strip_prefix(FREE_SEPARATOR).unwrap_or(data);
                self.fields.extend(split_free(data));
            }
            LineKind::LargeContinuation => {
                let data = fixed_data(padded);
                self.fields.extend(split_fixed(data, FieldEncoding::Large));
            }
            _ => {
                let data = fixed_data(padded);
                self.fields.extend(split_fixed(data, FieldEncoding::Small));
            }
        }
    }
}

fn split_free(data: &str) -> impl Iterator<Item = String> + '_ {
    data.trim_end()
        .split(FREE_SEPARATOR)
        .map(|field| field.trim().to_string())
}

/// Data fields in columns 8..72 of a fixed-format line
fn split_fixed(data: &str, encoding: FieldEncoding) -> impl Iterator<Item = String> + '_ {
    let width = match encoding {
        FieldEncoding::Large => LARGE_FIELD_WIDTH,
        _ => SMALL_FIELD_WIDTH,
    };
    (CONTINUATION_OFFSET..DATA_END)
        .step_by(width)
        .map(move |start| {
            column_slice(data, start, start + width)
                .unwrap_or("")
                .trim()
                .to_string()
        })
}

/// Data columns of a padded fixed-format line, cut at column 72
fn fixed_data(padded: &str) -> &str {
    &padded[..floor_char_boundary(padded, DATA_END)]
}

/// Pad, classify and merge `text` into logical records
///
/// Comments and whitespace-only lines are dropped before classification, so
/// a blank line never acts as a continuation. Each continuation appends its
/// data fields after every field of the lines before it.
pub fn merge_lines(text: &str, config: &BulkConfig) -> (Vec<LogicalRecord>, MergeStats) {
    let mut records: Vec<LogicalRecord> = Vec::new();
    let mut stats = MergeStats::default();

    for (n, raw) in text.lines().enumerate() {
        stats.lines += 1;
        if raw.trim().is_empty() {
            stats.blank += 1;
            continue;
        }

        let padded = pad_line(raw, config.min_line_width);
        let kind = classify(&padded, config.comment_marker);
        match kind {
            LineKind::Comment => stats.comments += 1,
            LineKind::FreeField => {
                records.push(LogicalRecord::open(n + 1, FieldEncoding::Free, &padded));
            }
            LineKind::LargeField => {
                let data = fixed_data(&padded);
                records.push(LogicalRecord::open(n + 1, FieldEncoding::Large, data));
            }
            LineKind::SmallField => {
                let data = fixed_data(&padded);
                records.push(LogicalRecord::open(n + 1, FieldEncoding::Small, data));
            }
            LineKind::FreeContinuation
            | LineKind::LargeContinuation
            | LineKind::SmallContinuation => {
                let Some(last) = records.last_mut() else {
                    stats.orphans += 1;
                    continue;
                };
                stats.continuations += 1;
                last.extend(kind, &padded);
            }
        }
    }

    stats.records = records.len();
    (records, stats)
}
