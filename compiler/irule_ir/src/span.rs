//! Byte ranges into the source text.
//!
//! Lines are stamped on each token separately. Spans exist so the parser
//! can slice raw text (braced patterns, glued words) straight out of the
//! source.

use std::fmt;
use std::ops::Range;

/// Half-open `start..end`, in bytes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// For tokens the parser makes up, e.g. option flags split off a word.
    pub const DUMMY: Span = Span::new(0, 0);

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Smallest span containing both.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(target_pointer_width = "64")]
crate::static_assert_size!(Span, 8);
