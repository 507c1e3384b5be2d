//! Cursor-advancing scan primitives over the raw document text.
//!
//! Each routine looks only at the bytes from the cursor to the end of the
//! input and never moves the cursor past the end. Every stop byte is ASCII,
//! so the returned slices always fall on `char` boundaries.

use memchr::{memchr, memchr3};

/// Bytes skipped between tokens.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// A cursor into the input text.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Scanner { text, pos: 0 }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The byte under the cursor, or `None` at end of input.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Move one byte forward, stopping at end of input.
    #[inline]
    pub fn bump(&mut self) {
        if self.pos < self.text.len() {
            self.pos += 1;
        }
    }

    #[inline]
    fn rest(&self) -> &'a [u8] {
        &self.text.as_bytes()[self.pos..]
    }

    pub fn skip_whitespace(&mut self) {
        let skipped = self.rest().iter().take_while(|&&b| is_whitespace(b)).count();
        self.pos += skipped;
    }

    /// Read quoted text. The cursor must sit on the opening quote; it ends
    /// on the closing quote, or at end of input if the quote is missing.
    pub fn scan_key(&mut self) -> &'a str {
        self.bump();
        self.take_until_quote()
    }

    /// Skip whitespace, then advance to the next `:` (or end of input).
    pub fn scan_to_colon(&mut self) {
        self.skip_whitespace();
        self.pos = match memchr(b':', self.rest()) {
            Some(offset) => self.pos + offset,
            None => self.text.len(),
        };
    }

    /// Like [`scan_key`](Self::scan_key) but leading whitespace inside the
    /// quotes is dropped.
    pub fn scan_quoted_string(&mut self) -> &'a str {
        self.bump();
        self.skip_whitespace();
        self.take_until_quote()
    }

    /// Read a bare token (number or literal).
    ///
    /// The token ends before `,`, `}` or `]`, or at end of input. Leading and
    /// trailing whitespace is not part of the token. The cursor is left on
    /// the delimiter.
    pub fn scan_unquoted_token(&mut self) -> &'a str {
        self.skip_whitespace();
        let start = self.pos;
        let end = match memchr3(b',', b'}', b']', self.rest()) {
            Some(offset) => start + offset,
            None => self.text.len(),
        };
        self.pos = end;
        self.text[start..end].trim_end_matches(|c: char| c.is_ascii() && is_whitespace(c as u8))
    }

    fn take_until_quote(&mut self) -> &'a str {
        let start = self.pos;
        let end = match memchr(b'"', self.rest()) {
            Some(offset) => start + offset,
            None => self.text.len(),
        };
        self.pos = end;
        &self.text[start..end]
    }
}
