//! Configuration options for decoding and encoding.
//!
//! - [`DecodeOptions`]: nesting limit and escape strictness for the decoder
//! - [`EncodeOptions`]: map entry ordering for the encoder
//!
//! Neither option changes the grammar itself: every document accepted under any
//! configuration is a canonical brass document.
//!
//! ## Examples
//!
//! ```rust
//! use serde_brass::{decode_with_options, DecodeOptions};
//!
//! let options = DecodeOptions::new().with_max_depth(Some(2));
//! assert!(decode_with_options(b"(())", options.clone()).is_ok());
//! assert!(decode_with_options(b"((()))", options).is_err());
//! ```

/// Default nesting limit for lists and maps.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for the decoder.
///
/// # Examples
///
/// ```rust
/// use serde_brass::DecodeOptions;
///
/// let options = DecodeOptions::new();
/// assert_eq!(options.max_depth, Some(128));
/// assert!(!options.strict_escapes);
///
/// let options = DecodeOptions::new()
///     .with_max_depth(None)
///     .with_strict_escapes(true);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting of lists and maps; `None` removes the limit, leaving
    /// only the call stack as a bound.
    pub max_depth: Option<usize>,
    /// Reject unknown string escapes instead of dropping them.
    pub strict_escapes: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            strict_escapes: false,
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nesting limit. The top-level list counts as depth 1.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// By default an escape such as `\q` is consumed and produces nothing.
    /// With strict escapes it is a syntax error.
    #[must_use]
    pub fn with_strict_escapes(mut self, strict: bool) -> Self {
        self.strict_escapes = strict;
        self
    }
}

/// Configuration options for the encoder.
///
/// # Examples
///
/// ```rust
/// use serde_brass::{encode_with_options, EncodeOptions, Primitive, Value};
///
/// let map = Value::map(vec![
///     (Primitive::from("b"), Value::from(2)),
///     (Primitive::from("a"), Value::from(1)),
/// ]);
/// let sorted = encode_with_options(&map, EncodeOptions::new().with_sorted_keys(true));
/// assert_eq!(sorted, b"{(\"a\" $1) (\"b\" $2)}");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Write map entries in key order rather than insertion order.
    pub sort_map_keys: bool,
}

impl EncodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sorted_keys(mut self, sorted: bool) -> Self {
        self.sort_map_keys = sorted;
        self
    }
}
