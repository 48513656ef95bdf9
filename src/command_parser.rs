// src/command_parser.rs
// Turns a received command line into a bounded vector of integers.

use heapless::Vec;

use crate::config::INT_ARRAY_SIZE;

/// Token separator within a command line.
pub const DELIMITER: u8 = b',';

/// Integers parsed from one line. `len()` is the parsed count.
pub type IntegerVector = Vec<i32, INT_ARRAY_SIZE>;

/// Splits `line` on commas and converts each token with [`parse_int_or_zero`].
///
/// Empty tokens are skipped (",,1" yields one integer), the line ends at the
/// first NUL byte, and parsing stops silently once `INT_ARRAY_SIZE` integers
/// have been produced. Tokens are not trimmed: a trailing terminator simply
/// ends the digits of the last token.
pub fn parse_integers(line: &[u8]) -> IntegerVector {
    let line = match line.iter().position(|&b| b == 0) {
        Some(nul) => &line[..nul],
        None => line,
    };

    let mut ints = IntegerVector::new();
    for token in line.split(|&b| b == DELIMITER).filter(|t| !t.is_empty()) {
        if ints.push(parse_int_or_zero(token)).is_err() {
            break;
        }
    }
    ints
}

/// Permissive integer conversion.
///
/// Leading whitespace is skipped, then an optional sign and as many decimal
/// digits as follow. Anything after the digits is ignored. A token without
/// leading numeric content is 0, never an error. Out-of-range values
/// saturate at `i32::MIN` / `i32::MAX`.
pub fn parse_int_or_zero(token: &[u8]) -> i32 {
    let mut rest = token;
    while let Some((&b, tail)) = rest.split_first() {
        if !is_c_space(b) {
            break;
        }
        rest = tail;
    }

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    // Accumulate toward the sign so i32::MIN is reachable without overflow.
    let mut value: i32 = 0;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = (b - b'0') as i32;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

// isspace() in the C locale.
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seven_integers() {
        let ints = parse_integers(b"1,2,3,4,5,6,7\r");
        assert_eq!(ints.len(), 7);
        assert_eq!(&ints[..], &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_parse_caps_at_eight() {
        let ints = parse_integers(b"1,2,3,4,5,6,7,8,9,10\r");
        assert_eq!(ints.len(), 8);
        assert_eq!(&ints[..], &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_parse_malformed_token_is_zero() {
        let ints = parse_integers(b"abc,5,x9\r");
        assert_eq!(&ints[..], &[0, 5, 0]);
    }

    #[test]
    fn test_parse_skips_empty_tokens() {
        assert_eq!(&parse_integers(b"1,,2\r")[..], &[1, 2]);
        assert_eq!(&parse_integers(b",,,3")[..], &[3]);
        assert!(parse_integers(b",,,").is_empty());
        assert!(parse_integers(b"").is_empty());
    }

    #[test]
    fn test_parse_bare_terminator_is_one_zero() {
        assert_eq!(&parse_integers(b"\r")[..], &[0]);
    }

    #[test]
    fn test_parse_stops_at_nul() {
        assert_eq!(&parse_integers(b"1,2\x003,4\r")[..], &[1, 2]);
    }

    #[test]
    fn test_parse_tokens_not_trimmed_but_leading_space_skipped() {
        assert_eq!(&parse_integers(b" 1, 2 ,3 x\r")[..], &[1, 2, 3]);
    }

    #[test]
    fn test_parse_int_or_zero_basics() {
        assert_eq!(parse_int_or_zero(b"42"), 42);
        assert_eq!(parse_int_or_zero(b"-7"), -7);
        assert_eq!(parse_int_or_zero(b"+5"), 5);
        assert_eq!(parse_int_or_zero(b"  \t12"), 12);
        assert_eq!(parse_int_or_zero(b"12abc"), 12);
        assert_eq!(parse_int_or_zero(b"7\r"), 7);
    }

    #[test]
    fn test_parse_int_or_zero_defaults_to_zero() {
        assert_eq!(parse_int_or_zero(b"abc"), 0);
        assert_eq!(parse_int_or_zero(b""), 0);
        assert_eq!(parse_int_or_zero(b"-"), 0);
        assert_eq!(parse_int_or_zero(b"--5"), 0);
        assert_eq!(parse_int_or_zero(b"- 5"), 0);
    }

    #[test]
    fn test_parse_int_or_zero_saturates() {
        assert_eq!(parse_int_or_zero(b"2147483647"), i32::MAX);
        assert_eq!(parse_int_or_zero(b"-2147483648"), i32::MIN);
        assert_eq!(parse_int_or_zero(b"99999999999"), i32::MAX);
        assert_eq!(parse_int_or_zero(b"-99999999999"), i32::MIN);
    }
}
