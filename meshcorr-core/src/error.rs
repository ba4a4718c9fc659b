//! Error types for meshcorr core operations

/// Broad class of a [`CoreError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCategory {
    /// Index outside the current grid dimensions
    Bounds,
    /// Internal storage invariant breached by the caller
    Structural,
    /// Input text could not be interpreted
    Format,
}

/// Errors that can occur while parsing or accessing correspondence storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Row, column or connection index past the end
    IndexOutOfBounds { index: usize, len: usize },
    /// Off-diagonal access on diagonal storage
    StructuralViolation { row: usize, col: usize },
    /// Rows and columns of a square layout cannot be resized independently
    LockedDimensions,
    /// Buffer lengths handed to a constructor disagree with the dimensions
    LengthMismatch { expected: usize, actual: usize },
    /// A numeric field does not parse
    MalformedNumber { line: usize, field: usize },
    /// A required field lies past the end of the record
    RecordTooShort { line: usize, field: usize },
    /// A required key field is blank
    MissingField { line: usize, field: usize },
    /// A value does not fit its fixed-width output column
    FieldOverflow { index: usize, width: usize },
    /// A key would not read back: it is blank or opens a comment
    UnwritableKey { index: usize, field: usize },
}

impl CoreError {
    /// Category of this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            CoreError::IndexOutOfBounds { .. } => ErrorCategory::Bounds,
            CoreError::StructuralViolation { .. }
            | CoreError::LockedDimensions
            | CoreError::LengthMismatch { .. } => ErrorCategory::Structural,
            CoreError::MalformedNumber { .. }
            | CoreError::RecordTooShort { .. }
            | CoreError::MissingField { .. }
            | CoreError::FieldOverflow { .. }
            | CoreError::UnwritableKey { .. } => ErrorCategory::Format,
        }
    }

    /// Source line the error refers to, for format errors
    pub const fn line(&self) -> Option<usize> {
        match self {
            CoreError::MalformedNumber { line, .. }
            | CoreError::RecordTooShort { line, .. }
            | CoreError::MissingField { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl core::fmt::Display for CoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoreError::IndexOutOfBounds { index, len } => {
                write!(f, "Index {index} out of bounds for length {len}")
            }
            CoreError::StructuralViolation { row, col } => {
                write!(f, "Off-diagonal access at ({row}, {col}) on diagonal storage")
            }
            CoreError::LockedDimensions => {
                write!(f, "Rows and columns are locked together for this layout")
            }
            CoreError::LengthMismatch { expected, actual } => {
                write!(f, "Expected {expected} stored values, got {actual}")
            }
            CoreError::MalformedNumber { line, field } => {
                write!(f, "Malformed number in field {field} of record at line {line}")
            }
            CoreError::RecordTooShort { line, field } => {
                write!(f, "Record at line {line} ends before field {field}")
            }
            CoreError::MissingField { line, field } => {
                write!(f, "Blank key in field {field} of record at line {line}")
            }
            CoreError::FieldOverflow { index, width } => {
                write!(f, "Entry {index} does not fit a {width}-column field")
            }
            CoreError::UnwritableKey { index, field } => {
                write!(f, "Key in field {field} of entry {index} is blank or starts a comment")
            }
        }
    }
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            CoreError::StructuralViolation { row: 0, col: 1 }.category(),
            ErrorCategory::Structural
        );
        assert_eq!(
            CoreError::MalformedNumber { line: 3, field: 4 }.category(),
            ErrorCategory::Format
        );
        assert_eq!(
            CoreError::IndexOutOfBounds { index: 5, len: 2 }.category(),
            ErrorCategory::Bounds
        );
        assert_eq!(CoreError::RecordTooShort { line: 7, field: 5 }.line(), Some(7));
        assert_eq!(CoreError::LockedDimensions.line(), None);
        assert_eq!(
            CoreError::UnwritableKey { index: 0, field: 1 }.category(),
            ErrorCategory::Format
        );
    }
}
