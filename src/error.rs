//! Error types for brass encoding, decoding and serde conversion.
//!
//! Every decode failure is terminal: the decoder never resynchronizes and never
//! hands back a partial tree.
//!
//! ## Error Categories
//!
//! - **Syntax**: a byte that matches no production at the current grammar position
//! - **Eof**: the input ended before a production completed
//! - **Overflow**: an integer or octets length does not fit in 64 bits
//! - **Context**: a list or map where only a primitive is allowed (map keys)
//! - **Limit**: nesting deeper than [`DecodeOptions::max_depth`](crate::DecodeOptions::max_depth)
//! - **Data**: a well-formed value of the wrong kind for the requested Rust type
//! - **Io**: the underlying byte source failed
//!
//! ## Examples
//!
//! ```rust
//! use serde_brass::{decode, Category};
//!
//! let err = decode(b"($GG)").unwrap_err();
//! assert_eq!(err.classify(), Category::Syntax);
//! assert!(err.to_string().contains("offset 2"));
//! ```

use crate::value::Kind;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
///
/// Decoder errors carry the byte offset at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A byte that is not legal at the current grammar position.
    #[error("syntax error at offset {offset}: expected {expected}, found {found}")]
    Syntax {
        offset: usize,
        expected: &'static str,
        found: String,
    },

    /// The input ended in the middle of a production.
    #[error("unexpected end of input at offset {offset}: expected {expected}")]
    UnexpectedEof {
        offset: usize,
        expected: &'static str,
    },

    /// An integer or octets length outside the 64-bit domain.
    #[error("numeric overflow at offset {offset}: {what} does not fit in 64 bits")]
    Overflow { offset: usize, what: &'static str },

    /// A list or map in a position that only admits primitives.
    #[error("expected a primitive at offset {offset}, found a list or map")]
    NotPrimitive { offset: usize },

    /// Nesting deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {limit} at offset {offset}")]
    DepthLimitExceeded { offset: usize, limit: usize },

    /// Bytes left over after a complete document.
    #[error("trailing bytes after document at offset {offset}")]
    TrailingBytes { offset: usize },

    /// A value of the wrong kind for the requested extraction.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: Kind },

    /// A Rust type the brass data model cannot represent.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error while reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Syntax,
    Eof,
    Overflow,
    Context,
    Limit,
    Data,
    Io,
}

impl Error {
    /// Creates a syntax error for an unexpected byte.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_brass::Error;
    ///
    /// let err = Error::syntax(3, "hex digit", b'G');
    /// assert_eq!(
    ///     err.to_string(),
    ///     "syntax error at offset 3: expected hex digit, found 'G'"
    /// );
    /// ```
    pub fn syntax(offset: usize, expected: &'static str, found: u8) -> Self {
        Error::Syntax {
            offset,
            expected,
            found: describe_byte(found),
        }
    }

    /// Creates a syntax error whose `found` part is free text.
    pub(crate) fn syntax_msg(offset: usize, expected: &'static str, found: &str) -> Self {
        Error::Syntax {
            offset,
            expected,
            found: found.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(offset: usize, expected: &'static str) -> Self {
        Error::UnexpectedEof { offset, expected }
    }

    /// Creates an overflow error.
    pub fn overflow(offset: usize, what: &'static str) -> Self {
        Error::Overflow { offset, what }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_brass::{Error, Kind};
    ///
    /// let err = Error::type_mismatch("integer", Kind::List);
    /// assert!(err.to_string().contains("expected integer, found list"));
    /// ```
    pub fn type_mismatch(expected: &'static str, found: Kind) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the broad category of this error.
    #[must_use]
    pub fn classify(&self) -> Category {
        match self {
            Error::Syntax { .. } | Error::TrailingBytes { .. } => Category::Syntax,
            Error::UnexpectedEof { .. } => Category::Eof,
            Error::Overflow { .. } => Category::Overflow,
            Error::NotPrimitive { .. } => Category::Context,
            Error::DepthLimitExceeded { .. } => Category::Limit,
            Error::TypeMismatch { .. } | Error::UnsupportedType(_) | Error::Custom(_) => {
                Category::Data
            }
            Error::Io(_) => Category::Io,
        }
    }

    /// Returns `true` if the input was malformed.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        self.classify() == Category::Syntax
    }

    /// Returns `true` if the input ended early.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.classify() == Category::Eof
    }

    /// Returns `true` for integer or length overflow.
    #[must_use]
    pub fn is_overflow(&self) -> bool {
        self.classify() == Category::Overflow
    }

    /// The byte offset the error refers to, if it came from the decoder.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Syntax { offset, .. }
            | Error::UnexpectedEof { offset, .. }
            | Error::Overflow { offset, .. }
            | Error::NotPrimitive { offset }
            | Error::DepthLimitExceeded { offset, .. }
            | Error::TrailingBytes { offset } => Some(*offset),
            _ => None,
        }
    }
}

fn describe_byte(b: u8) -> String {
    match b {
        b'\r' => "raw carriage return".to_string(),
        b'\n' => "raw newline".to_string(),
        0x21..=0x7e => format!("'{}'", b as char),
        b' ' => "' '".to_string(),
        _ => format!("byte 0x{:02x}", b),
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
