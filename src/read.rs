//! Byte sources for the decoder.
//!
//! The decoder needs exactly one byte of lookahead, so a source only has to hand
//! out bytes one at a time and be able to give back the last one.

use crate::error::{Error, Result};
use std::io;

/// A byte cursor with single-byte pushback.
///
/// `push_back` restores the byte returned by the most recent successful `next`.
/// Calling it twice without an intervening `next`, or before any byte was read,
/// is a usage error.
pub trait Read {
    /// Returns the next byte, or `None` at end of input.
    fn next(&mut self) -> Result<Option<u8>>;

    /// Makes the next call to [`Read::next`] return the last byte again.
    fn push_back(&mut self);

    /// Number of bytes consumed so far.
    fn offset(&self) -> usize;
}

/// A cursor over an in-memory byte slice.
pub struct SliceRead<'a> {
    slice: &'a [u8],
    index: usize,
    can_push_back: bool,
}

impl<'a> SliceRead<'a> {
    pub fn new(slice: &'a [u8]) -> Self {
        SliceRead {
            slice,
            index: 0,
            can_push_back: false,
        }
    }

    /// The bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.slice[self.index..]
    }
}

impl<'a> Read for SliceRead<'a> {
    #[inline]
    fn next(&mut self) -> Result<Option<u8>> {
        match self.slice.get(self.index) {
            Some(&b) => {
                self.index += 1;
                self.can_push_back = true;
                Ok(Some(b))
            }
            None => {
                self.can_push_back = false;
                Ok(None)
            }
        }
    }

    #[inline]
    fn push_back(&mut self) {
        debug_assert!(self.can_push_back, "push_back without a preceding read");
        if self.can_push_back {
            self.index -= 1;
            self.can_push_back = false;
        }
    }

    #[inline]
    fn offset(&self) -> usize {
        self.index
    }
}

/// A cursor over any [`std::io::Read`].
///
/// Bytes are pulled one at a time, so wrap unbuffered sources in a
/// [`std::io::BufReader`].
pub struct IoRead<R: io::Read> {
    bytes: io::Bytes<R>,
    pushed: Option<u8>,
    last: Option<u8>,
    offset: usize,
}

impl<R: io::Read> IoRead<R> {
    pub fn new(reader: R) -> Self {
        IoRead {
            bytes: reader.bytes(),
            pushed: None,
            last: None,
            offset: 0,
        }
    }
}

impl<R: io::Read> Read for IoRead<R> {
    fn next(&mut self) -> Result<Option<u8>> {
        if let Some(b) = self.pushed.take() {
            self.offset += 1;
            self.last = Some(b);
            return Ok(Some(b));
        }
        match self.bytes.next() {
            Some(Ok(b)) => {
                self.offset += 1;
                self.last = Some(b);
                Ok(Some(b))
            }
            Some(Err(e)) => Err(Error::io(&e.to_string())),
            None => {
                self.last = None;
                Ok(None)
            }
        }
    }

    fn push_back(&mut self) {
        debug_assert!(self.last.is_some(), "push_back without a preceding read");
        if let Some(b) = self.last.take() {
            self.pushed = Some(b);
            self.offset -= 1;
        }
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
