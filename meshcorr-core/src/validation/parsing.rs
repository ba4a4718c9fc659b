//! Parsing utilities for bulk-data field values
//!
//! Real fields follow the bulk-data conventions: besides the usual
//! `1.5e-3` notation, the exponent letter may be `D` or omitted entirely
//! (`1.5-3`, `2.+4`).

use alloc::string::String;

/// Longest key accepted by [`validate_key`]
pub const MAX_KEY_LEN: usize = 64;

/// Parse a real field, returning `None` when the text is not a finite number
///
/// The text must already be trimmed of padding. Blank text is not a number;
/// callers decide whether a blank field defaults to zero.
pub fn parse_real(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }

    let value = match text.parse::<f64>() {
        Ok(v) => v,
        Err(_) => parse_shorthand(text)?,
    };

    value.is_finite().then_some(value)
}

/// Rewrite `D` exponents and implicit exponents into `E` notation
fn parse_shorthand(text: &str) -> Option<f64> {
    let mut normalized = String::with_capacity(text.len() + 1);
    let mut prev: Option<char> = None;

    for (i, c) in text.char_indices() {
        let c = match c {
            'd' | 'D' => 'E',
            other => other,
        };
        let is_sign = c == '+' || c == '-';
        let after_exponent = matches!(prev, Some('e') | Some('E'));
        if is_sign && i > 0 && !after_exponent {
            normalized.push('E');
        }
        normalized.push(c);
        prev = Some(c);
    }

    normalized.parse::<f64>().ok()
}

/// Whether a key field is usable as an entity name
///
/// Keys must be non-blank, printable and of bounded length.
pub fn validate_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key.bytes().all(|b| b >= 32 && b != 127)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_real_standard() {
        assert_eq!(parse_real("0.0"), Some(0.0));
        assert_eq!(parse_real("12"), Some(12.0));
        assert_eq!(parse_real("-3.25"), Some(-3.25));
        assert_eq!(parse_real("1.5e-3"), Some(1.5e-3));
        assert_eq!(parse_real(".5"), Some(0.5));
    }

    #[test]
    fn test_parse_real_shorthand() {
        assert_eq!(parse_real("1.5-3"), Some(1.5e-3));
        assert_eq!(parse_real("2.+4"), Some(2.0e4));
        assert_eq!(parse_real("-7.5-1"), Some(-0.75));
        assert_eq!(parse_real("1.0D-2"), Some(1.0e-2));
        assert_eq!(parse_real("3.0d+1"), Some(30.0));
    }

    #[test]
    fn test_parse_real_rejects_garbage() {
        assert_eq!(parse_real(""), None);
        assert_eq!(parse_real("abc"), None);
        assert_eq!(parse_real("1.0.0"), None);
        assert_eq!(parse_real("nan"), None);
        assert_eq!(parse_real("inf"), None);
        assert_eq!(parse_real("1-"), None);
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("101"));
        assert!(validate_key("node_7"));
        assert!(!validate_key(""));
        assert!(!validate_key("bad\0key"));

        let long_key = "k".repeat(MAX_KEY_LEN + 1);
        assert!(!validate_key(&long_key));
    }
}
