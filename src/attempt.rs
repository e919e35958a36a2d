use crate::parser::Parser;
use crate::reply::Reply;

/// Parser combinator that backtracks on failure
///
/// Any failure of the inner parser is moved back to the cursor it started
/// from, so to the surrounding parser it looks like nothing was consumed.
/// The error itself, including its position, is kept.
#[derive(Clone)]
pub struct Attempt<P> {
    parser: P,
}

impl<P> Attempt<P> {
    pub fn new(parser: P) -> Self {
        Attempt { parser }
    }
}

impl<P: Parser> Parser for Attempt<P> {
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        self.parser
            .parse(cursor.clone())
            .map_err(|failure| failure.rewind(cursor))
    }
}

/// Convenience function to create an Attempt parser
pub fn attempt<P: Parser>(parser: P) -> Attempt<P> {
    Attempt::new(parser)
}

/// Extension trait to add .attempt() method support for parsers
pub trait AttemptExt: Parser + Sized {
    fn attempt(self) -> Attempt<Self> {
        Attempt::new(self)
    }
}

impl<P: Parser> AttemptExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::cursors::StrCursor;
    use crate::position::Position;
    use crate::text::{is_char, is_string};
    use crate::then::ThenExt;

    #[test]
    fn test_attempt_success_is_unchanged() {
        let (value, cursor) = attempt(is_string("ab")).parse(StrCursor::new("abc")).unwrap();
        assert_eq!(value, "ab");
        assert_eq!(cursor.rest(), "c");
    }

    #[test]
    fn test_attempt_rewinds_consuming_failure() {
        let start = StrCursor::new("ax");
        let failure = is_char('a')
            .then(is_char('b'))
            .attempt()
            .parse(start)
            .unwrap_err();

        assert_eq!(failure.cursor, start);
        assert_eq!(failure.error.position(), Position::new(1, 2, 1));
    }

    #[test]
    fn test_attempt_non_consuming_failure() {
        let start = StrCursor::new("x");
        let failure = attempt(is_char('a')).parse(start).unwrap_err();
        assert!(!failure.consumed_since(&start));
        assert!(!failure.cursor.is_end());
    }
}
