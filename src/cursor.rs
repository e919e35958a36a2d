use crate::position::Position;
use std::fmt;

/// Generic cursor trait for parser combinators
///
/// A cursor is an immutable view of the remaining input. Advancing never
/// mutates the cursor in place; it produces a new one, so backtracking is
/// just a matter of holding on to an older cursor and parsing from it again.
///
/// Two cursors compare equal when they sit at the same offset. Comparing
/// cursors that come from unrelated inputs is meaningless.
pub trait Cursor: Clone + PartialEq {
    /// The type of tokens this cursor iterates over
    type Token: Clone + PartialEq + fmt::Debug;

    /// Get the token at the current cursor position, or `None` at end of input
    fn current(&self) -> Option<Self::Token>;

    /// Advance the cursor past the current token
    ///
    /// # Panics
    ///
    /// Panics when called at end of input. Parsers check `current()` first;
    /// advancing past the end is a bug in the calling parser, not a parse error.
    fn advance(self) -> Self;

    /// Get the position of the current token
    fn position(&self) -> Position;

    /// Check if the cursor is at the end of the input
    fn is_end(&self) -> bool {
        self.current().is_none()
    }

    /// Absolute offset of the current token
    fn offset(&self) -> usize {
        self.position().offset
    }
}
