//! Byte classifiers used by the decoder.
//!
//! Hex digits are lowercase only: `A`..`F` are rejected everywhere so that each
//! number has a single spelling.

/// Returns `true` for `0`..`9` and `a`..`f`.
#[inline]
#[must_use]
pub const fn is_hex_digit(c: u8) -> bool {
    matches!(c, b'0'..=b'9' | b'a'..=b'f')
}

/// Returns the nibble value of a lowercase hex digit.
///
/// Only meaningful when [`is_hex_digit`] holds for `c`; any other byte maps to 0.
#[inline]
#[must_use]
pub const fn hex_value(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => 0,
    }
}

/// Returns `true` for bytes that may begin a keyword.
#[inline]
#[must_use]
pub const fn is_token_start(c: u8) -> bool {
    matches!(c, b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'.' | b'/' | b'?' | b'!') || c >= 128
}

/// Returns `true` for bytes that may continue a keyword.
#[inline]
#[must_use]
pub const fn is_token_remainder(c: u8) -> bool {
    is_token_start(c) || c.is_ascii_digit()
}
