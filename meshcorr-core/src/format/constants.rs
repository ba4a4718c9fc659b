//! Column layouts and markers for the text formats

/// Minimum width every bulk line is padded to before fixed-column slicing
pub const MIN_LINE_WIDTH: usize = 72;

/// Marker opening a comment line
pub const COMMENT_MARKER: char = '$';

/// Bulk-data field layouts
pub mod bulk {
    /// Width of the keyword field and of every small-format field
    pub const SMALL_FIELD_WIDTH: usize = 8;

    /// Width of a large-format data field
    pub const LARGE_FIELD_WIDTH: usize = 16;

    /// Offset of the first data field in any fixed-format line
    pub const CONTINUATION_OFFSET: usize = 8;

    /// Fixed-format lines are cut here; later columns carry continuation ids
    pub const DATA_END: usize = 72;

    /// Separator of free-format fields
    pub const FREE_SEPARATOR: char = ',';

    /// Marker of large-format keywords and continuation lines
    pub const LARGE_MARKER: char = '*';
}

/// ASCII connection file columns as `start..end` byte ranges
pub mod connection {
    use core::ops::Range;

    pub const FIRST_KEY: Range<usize> = 0..8;
    pub const LAST_KEY: Range<usize> = 11..19;
    pub const CORRELATION: Range<usize> = 22..30;
    pub const FIRST_FREQUENCY: Range<usize> = 33..41;
    pub const LAST_FREQUENCY: Range<usize> = 44..52;

    /// Width of every column in the file
    pub const FIELD_WIDTH: usize = 8;

    /// Blank columns between two fields
    pub const GAP: &str = "   ";
}

/// Rigid-connection export record layout
pub mod rigid {
    /// Width of each of the five record fields
    pub const FIELD_WIDTH: usize = 8;

    /// Element type code written in the first field
    pub const DEFAULT_TYPE_CODE: &str = "RBE2";

    /// All six displacement and rotation components coupled
    pub const DEFAULT_DOF_CODE: &str = "123456";
}
