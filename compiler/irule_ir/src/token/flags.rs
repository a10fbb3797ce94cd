//! Per-token layout flags.

use bitflags::bitflags;

bitflags! {
    /// Whitespace context preceding a token.
    ///
    /// Tcl words are delimited by whitespace and commands by newlines, so the
    /// parser needs to know what separated a token from its predecessor even
    /// though no whitespace tokens are emitted.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u8 {
        /// Spaces or tabs preceded this token.
        const SPACE_BEFORE = 1 << 0;
        /// A newline (outside a `\` continuation) preceded this token.
        const NEWLINE_BEFORE = 1 << 1;
        /// A comment preceded this token.
        const TRIVIA_BEFORE = 1 << 2;
    }
}

impl TokenFlags {
    /// No separator at all: the token is glued to the previous one.
    #[inline]
    pub fn is_adjacent(self) -> bool {
        !self.intersects(Self::SPACE_BEFORE | Self::NEWLINE_BEFORE | Self::TRIVIA_BEFORE)
    }

    #[inline]
    pub fn starts_line(self) -> bool {
        self.contains(Self::NEWLINE_BEFORE)
    }
}
