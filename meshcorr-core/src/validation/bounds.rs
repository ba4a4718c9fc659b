//! Index and slice bound checks

use crate::{CoreError, Result};

/// Check that `index` addresses one of `len` slots
#[inline]
pub const fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(CoreError::IndexOutOfBounds { index, len });
    }
    Ok(())
}

/// Largest char boundary of `s` that is `<= index`
///
/// Fixed-column slicing works on byte offsets; this keeps a cut from
/// landing inside a multi-byte character.
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Byte columns `start..end` of `s`, clipped to its length
///
/// Returns `None` when `start` lies at or past the end of the string.
pub fn column_slice(s: &str, start: usize, end: usize) -> Option<&str> {
    if start >= s.len() {
        return None;
    }
    let lo = floor_char_boundary(s, start);
    let hi = floor_char_boundary(s, end.max(start));
    s.get(lo..hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert_eq!(check_index(0, 1), Ok(()));
        assert_eq!(check_index(4, 5), Ok(()));
        assert_eq!(
            check_index(5, 5),
            Err(CoreError::IndexOutOfBounds { index: 5, len: 5 })
        );
        assert_eq!(
            check_index(0, 0),
            Err(CoreError::IndexOutOfBounds { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_floor_char_boundary() {
        assert_eq!(floor_char_boundary("abcdef", 3), 3);
        assert_eq!(floor_char_boundary("abc", 10), 3);
        // 'é' occupies bytes 1..3
        assert_eq!(floor_char_boundary("aé", 2), 1);
    }

    #[test]
    fn test_column_slice() {
        let line = "GRID    1       ";
        assert_eq!(column_slice(line, 0, 8), Some("GRID    "));
        assert_eq!(column_slice(line, 8, 16), Some("1       "));
        assert_eq!(column_slice(line, 12, 24), Some("    "));
        assert_eq!(column_slice(line, 16, 24), None);
    }
}
