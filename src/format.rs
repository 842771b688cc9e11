//! Brass Format Reference
//!
//! This module documents the brass grammar as implemented by this library. It holds
//! no code.
//!
//! # Overview
//!
//! A brass document is a single list. Lists and maps nest to any depth (up to the
//! decoder's configured limit); everything else is an atom. There is exactly one
//! legal spelling for every value, so the decoder rejects input rather than
//! normalizing it.
//!
//! # Grammar
//!
//! ```text
//! document  = list
//! value     = atom / list / map
//! list      = "(" [ value *( SP value ) ] ")"
//! map       = "{" [ entry *( SP entry ) ] "}"
//! entry     = "(" primitive SP value ")"
//! primitive = atom
//! atom      = "nil" / "true" / "false" / integer / octets / string
//! integer   = [ "-" ] "$" 1*HEX
//! octets    = "#" 1*HEX "$" *( HEX HEX )
//! string    = DQUOTE *( raw / escape ) DQUOTE
//! escape    = "\" ( "\" / DQUOTE / "r" / "n" / "t" / "x" HEX HEX )
//! HEX       = %x30-39 / %x61-66      ; 0-9 a-f, lowercase only
//! SP        = %x20                    ; exactly one
//! ```
//!
//! `raw` is any byte other than `"`, `\`, carriage return and line feed.
//!
//! ## Separators
//!
//! Exactly one space separates list elements, map entries, and the key from the
//! value inside an entry. There is no whitespace anywhere else:
//!
//! | Input | Result |
//! |-------|--------|
//! | `()` | empty list |
//! | `( )` | error |
//! | `(nil  nil)` | error |
//! | `(()())` | error |
//!
//! ## Keywords
//!
//! `nil`, `true` and `false` are read greedily over identifier characters
//! (`a-z A-Z 0-9 _ . / ? !` and bytes `>= 0x80`). `nill` or `True` are errors rather
//! than a keyword followed by garbage.
//!
//! ## Integers
//!
//! Signed 64-bit, hex only:
//!
//! | Value | Encoding |
//! |-------|----------|
//! | `0` | `$0` |
//! | `1023` | `$3ff` |
//! | `-1023` | `-$3ff` |
//! | `i64::MIN` | `-$8000000000000000` |
//!
//! The encoder writes the minimal form. The decoder also accepts leading zeros
//! (`$00ff`), but a magnitude that does not fit the signed range is an overflow
//! error.
//!
//! ## Octets
//!
//! `#`, the byte length in hex, `$`, then two hex digits per byte, high nibble
//! first:
//!
//! ```text
//! #3$616263     "abc"
//! #0$           empty
//! ```
//!
//! The digit count must match the declared length exactly.
//!
//! ## Strings
//!
//! Strings hold arbitrary bytes. Printable ASCII is written raw; the encoder
//! escapes the rest:
//!
//! | Byte | Escape |
//! |------|--------|
//! | `\` | `\\` |
//! | `"` | `\"` |
//! | CR | `\r` |
//! | LF | `\n` |
//! | TAB | `\t` |
//! | other `< 0x20`, `>= 0x80` | `\xHH` |
//!
//! A raw carriage return or line feed inside a string is an error. An escape
//! letter outside the table is consumed and produces no byte, unless
//! [`DecodeOptions::with_strict_escapes`](crate::DecodeOptions::with_strict_escapes)
//! is set, in which case it is an error.
//!
//! ## Maps
//!
//! ```text
//! {("a" $1) ("b" $2)}
//! ```
//!
//! Keys are primitives. A list or map in key position is a
//! [`NotPrimitive`](crate::Error::NotPrimitive) error. A repeated key replaces the
//! earlier value. Entries are written in insertion order, or in key order with
//! [`EncodeOptions::with_sorted_keys`](crate::EncodeOptions::with_sorted_keys).
//!
//! # Serde Documents
//!
//! The serde entry points (`to_string`, `from_slice`, ...) wrap the value in a
//! one-element list:
//!
//! | Rust | Document |
//! |------|----------|
//! | `42` | `($2a)` |
//! | `None`, `()` | `(nil)` |
//! | `"hi"` | `("hi")` |
//! | `vec![1, 2]` | `(($1 $2))` |
//! | `Shape::Unit` | `("Unit")` |
//! | `Shape::Circle(3)` | `({("Circle" $3)})` |
//!
//! Floats have no brass representation and are rejected.
