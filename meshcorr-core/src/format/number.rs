//! Fixed-width real number formatting
//!
//! Formatting takes its layout from an explicit [`NumberFormat`] value so
//! that writers and debug dumps never depend on ambient state.

use alloc::format;
use alloc::string::String;

/// Width and precision used when printing reals into fixed columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberFormat {
    /// Field width in characters
    pub width: usize,
    /// Preferred digits after the decimal point
    pub precision: usize,
}

impl NumberFormat {
    /// Create a format with the given width and precision
    pub const fn new(width: usize, precision: usize) -> Self {
        Self { width, precision }
    }

    /// Set the field width
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the preferred precision
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            width: 8,
            precision: 5,
        }
    }
}

/// Format `value` right-aligned in `fmt.width` columns
///
/// Precision is reduced until the text fits, then exponent notation is
/// tried. A value that fits in neither is returned unpadded and wider than
/// the field.
pub fn format_real(value: f64, fmt: &NumberFormat) -> String {
    let width = fmt.width;

    for precision in (0..=fmt.precision).rev() {
        let text = format!("{value:.precision$}");
        if text.len() <= width {
            return format!("{text:>width$}");
        }
    }

    for precision in (0..=fmt.precision).rev() {
        let text = format!("{value:.precision$e}");
        if text.len() <= width {
            return format!("{text:>width$}");
        }
    }

    format!("{value:e}")
}
