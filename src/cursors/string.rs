use crate::cursor::Cursor;
use crate::position::Position;
use std::fmt;

/// A cursor over an in-memory string, one `char` per token
///
/// The cursor is `Copy`: keeping an old cursor around is all it takes to
/// backtrack to it later.
#[derive(Clone, Copy)]
pub struct StrCursor<'code> {
    input: &'code str,
    /// Byte index of the current char in `input`
    index: usize,
    position: Position,
    tab_width: usize,
}

impl<'code> StrCursor<'code> {
    pub fn new(input: &'code str) -> Self {
        Self::with_tab_width(input, Position::DEFAULT_TAB_WIDTH)
    }

    pub fn with_tab_width(input: &'code str, tab_width: usize) -> Self {
        StrCursor {
            input,
            index: 0,
            position: Position::START,
            tab_width,
        }
    }

    /// The unconsumed part of the input
    pub fn rest(&self) -> &'code str {
        &self.input[self.index..]
    }

    pub fn source(&self) -> &'code str {
        self.input
    }
}

impl fmt::Debug for StrCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrCursor")
            .field("position", &self.position)
            .field("rest", &self.rest())
            .finish()
    }
}

impl PartialEq for StrCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Cursor for StrCursor<'_> {
    type Token = char;

    fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(self) -> Self {
        let Some(ch) = self.current() else {
            panic!("advance past end of input at {}", self.position);
        };
        StrCursor {
            index: self.index + ch.len_utf8(),
            position: self.position.next_char(ch, self.tab_width),
            ..self
        }
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let cursor = StrCursor::new("hello\nworld");
        assert_eq!(cursor.current(), Some('h'));

        let cursor = cursor.advance();
        assert_eq!(cursor.current(), Some('e'));
        assert_eq!(cursor.position(), Position::new(1, 2, 1));
    }

    #[test]
    fn test_newline_handling() {
        let mut cursor = StrCursor::new("ab\ncd");
        for _ in 0..3 {
            cursor = cursor.advance();
        }
        assert_eq!(cursor.current(), Some('c'));
        assert_eq!(cursor.position(), Position::new(2, 1, 3));
    }

    #[test]
    fn test_tab_column_sequence() {
        let mut cursor = StrCursor::new("ab\tcd");
        let mut columns = Vec::new();
        while !cursor.is_end() {
            cursor = cursor.advance();
            columns.push(cursor.position().column);
        }
        assert_eq!(columns, vec![2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_custom_tab_width() {
        let cursor = StrCursor::with_tab_width("\tx", 8).advance();
        assert_eq!(cursor.position().column, 9);
    }

    #[test]
    fn test_multibyte_chars_count_as_one_token() {
        let cursor = StrCursor::new("é!").advance();
        assert_eq!(cursor.current(), Some('!'));
        assert_eq!(cursor.position().offset, 1);
        assert_eq!(cursor.position().column, 2);
        assert_eq!(cursor.rest(), "!");
    }

    #[test]
    fn test_empty_input() {
        let cursor = StrCursor::new("");
        assert!(cursor.is_end());
        assert_eq!(cursor.current(), None);
    }

    #[test]
    #[should_panic(expected = "advance past end of input")]
    fn test_advance_at_end_panics() {
        let _ = StrCursor::new("").advance();
    }

    #[test]
    fn test_copy_independence() {
        let cursor = StrCursor::new("abcd");
        let saved_at_a = cursor;

        let cursor = cursor.advance().advance();
        assert_eq!(cursor.current(), Some('c'));
        assert_eq!(saved_at_a.current(), Some('a'));

        let from_a = saved_at_a.advance();
        assert_eq!(from_a.current(), Some('b'));
        assert_ne!(from_a, cursor);
        assert_eq!(from_a, StrCursor::new("abcd").advance());
    }
}
