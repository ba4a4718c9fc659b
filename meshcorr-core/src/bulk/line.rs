//! Line padding and classification

use alloc::string::String;

use crate::format::constants::bulk::{FREE_SEPARATOR, LARGE_MARKER, SMALL_FIELD_WIDTH};

/// Category of one physical line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    Comment,
    FreeContinuation,
    FreeField,
    LargeContinuation,
    LargeField,
    SmallContinuation,
    SmallField,
}

impl LineKind {
    /// Line extends the previous logical record
    pub const fn is_continuation(self) -> bool {
        matches!(
            self,
            LineKind::FreeContinuation | LineKind::LargeContinuation | LineKind::SmallContinuation
        )
    }

    /// Line opens a new logical record
    pub const fn starts_record(self) -> bool {
        matches!(
            self,
            LineKind::FreeField | LineKind::LargeField | LineKind::SmallField
        )
    }
}

/// Right-pad `line` with spaces to at least `width` bytes
///
/// Longer lines are returned unchanged.
pub fn pad_line(line: &str, width: usize) -> String {
    let mut padded = String::with_capacity(line.len().max(width));
    padded.push_str(line);
    while padded.len() < width {
        padded.push(' ');
    }
    padded
}

/// Classify a padded line
///
/// Checks run in a fixed order, so a line is always assigned the first
/// category it matches. A `+` in column one is the conventional small-field
/// continuation marker and is treated like eight leading blanks.
pub fn classify(line: &str, comment_marker: char) -> LineKind {
    if line.starts_with(comment_marker) {
        LineKind::Comment
    } else if line.starts_with(FREE_SEPARATOR) {
        LineKind::FreeContinuation
    } else if line.contains(FREE_SEPARATOR) {
        LineKind::FreeField
    } else if line.starts_with(LARGE_MARKER) {
        LineKind::LargeContinuation
    } else if line.contains(LARGE_MARKER) {
        LineKind::LargeField
    } else if line.starts_with('+') || is_blank_prefix(line) {
        LineKind::SmallContinuation
    } else {
        LineKind::SmallField
    }
}

fn is_blank_prefix(line: &str) -> bool {
    line.len() >= SMALL_FIELD_WIDTH
        && line.as_bytes()[..SMALL_FIELD_WIDTH]
            .iter()
            .all(|&b| b == b' ')
}
