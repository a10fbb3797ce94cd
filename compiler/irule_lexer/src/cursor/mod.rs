//! Byte cursor over the source text.
//!
//! The cursor advances byte-by-byte. Reads past the end return `0x00`, so
//! scanning predicates terminate at EOF without explicit bounds checks at
//! every call site. An interior NUL is told apart from EOF by position.

/// Cursor over the bytes of a source string.
///
/// The cursor is [`Copy`]; a saved copy is a cheap checkpoint.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        self.source.as_bytes().get(pos as usize).copied().unwrap_or(0)
    }

    /// Byte at the current position, `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Reposition the cursor. `pos` is clamped to the source length.
    pub fn set_pos(&mut self, pos: u32) {
        self.pos = pos.min(self.source_len());
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "sources are bounded well below 4 GiB"
    )]
    pub fn source_len(&self) -> u32 {
        self.source.len() as u32
    }

    /// Source text between two byte offsets.
    ///
    /// Returns an empty string for a range that is out of bounds or not on
    /// character boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.source.get(start as usize..end as usize).unwrap_or("")
    }

    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` holds for the current byte.
    ///
    /// `pred(0)` must be `false`, which holds for every ASCII class
    /// predicate.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Number of bytes in the UTF-8 character starting with `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// The character at the current position.
    pub fn current_char(&self) -> char {
        self.source
            .get(self.pos as usize..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0')
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
        self.pos = self.pos.min(self.source_len());
    }

    /// Advance to the next `\n` (not consumed) or EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = self.source.as_bytes().get(self.pos as usize..).unwrap_or(&[]);
        match memchr::memchr(b'\n', remaining) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len(),
        }
    }

    /// Advance over plain string bytes to the next `"`, `\\` or `[`, or EOF.
    ///
    /// With `in_bracket` set, `]` also stops the scan. Returns the byte
    /// found, if any, and the number of newlines skipped on the way.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets < source_len which fits in u32"
    )]
    pub fn eat_string_run(&mut self, in_bracket: bool) -> (Option<u8>, u32) {
        let remaining = self.source.as_bytes().get(self.pos as usize..).unwrap_or(&[]);
        let special = memchr::memchr3(b'"', b'\\', b'[', remaining);
        let found = if in_bracket {
            earliest_of(special, memchr::memchr(b']', remaining))
        } else {
            special
        };
        let end = found.unwrap_or(remaining.len());
        let newlines = memchr::memchr_iter(b'\n', &remaining[..end]).count() as u32;
        self.pos += end as u32;
        (found.map(|i| remaining[i]), newlines)
    }
}

#[inline]
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}
