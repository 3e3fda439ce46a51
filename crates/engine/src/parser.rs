// crates/engine/src/parser.rs
//! Fixed-point parsing of measurement values.
//!
//! Values have the layout `-?D{1,2}.D` and are converted to tenths, so
//! `12.3` becomes `123` and `-2.5` becomes `-25`. Everything stays in
//! integers; no floating point is involved at any step.

/// Parse a measurement into tenths.
///
/// Returns `None` when the slice is shorter than three bytes, when the
/// decimal point is not directly after one or two digits (after an optional
/// `-`), when anything follows the single fractional digit, or when a digit
/// position holds a non-digit byte.
#[inline]
#[must_use]
pub fn parse_tenths(bytes: &[u8]) -> Option<i64> {
    if bytes.len() < 3 {
        return None;
    }

    let (negative, rest) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, bytes),
    };

    let magnitude = match *rest {
        [ones, b'.', tenth] => digit(ones)? * 10 + digit(tenth)?,
        [tens, ones, b'.', tenth] => digit(tens)? * 100 + digit(ones)? * 10 + digit(tenth)?,
        _ => return None,
    };

    Some(if negative { -magnitude } else { magnitude })
}

#[inline]
fn digit(byte: u8) -> Option<i64> {
    byte.is_ascii_digit().then(|| i64::from(byte - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_four_layouts() {
        assert_eq!(parse_tenths(b"6.3"), Some(63));
        assert_eq!(parse_tenths(b"-6.3"), Some(-63));
        assert_eq!(parse_tenths(b"26.4"), Some(264));
        assert_eq!(parse_tenths(b"-26.4"), Some(-264));
    }

    #[test]
    fn parses_zero_and_extremes() {
        assert_eq!(parse_tenths(b"0.0"), Some(0));
        assert_eq!(parse_tenths(b"-0.0"), Some(0));
        assert_eq!(parse_tenths(b"99.9"), Some(999));
        assert_eq!(parse_tenths(b"-99.9"), Some(-999));
        assert_eq!(parse_tenths(b"05.0"), Some(50));
    }

    #[test]
    fn rejects_short_input() {
        assert_eq!(parse_tenths(b""), None);
        assert_eq!(parse_tenths(b"6"), None);
        assert_eq!(parse_tenths(b"-6"), None);
        assert_eq!(parse_tenths(b"6."), None);
    }

    #[test]
    fn rejects_wrong_layout() {
        assert_eq!(parse_tenths(b"6.34"), None);
        assert_eq!(parse_tenths(b"-6.34"), None);
        assert_eq!(parse_tenths(b"123.4"), None);
        assert_eq!(parse_tenths(b"12.3 "), None);
        assert_eq!(parse_tenths(b"-6."), None);
        assert_eq!(parse_tenths(b".63"), None);
        assert_eq!(parse_tenths(b"+6.3"), None);
        assert_eq!(parse_tenths(b"notanumber"), None);
    }

    #[test]
    fn rejects_non_digits_in_digit_positions() {
        assert_eq!(parse_tenths(b"a.3"), None);
        assert_eq!(parse_tenths(b"1x.3"), None);
        assert_eq!(parse_tenths(b"12.z"), None);
        assert_eq!(parse_tenths(b"--6.3"), None);
    }
}
