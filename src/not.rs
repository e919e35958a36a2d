use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::parser::Parser;
use crate::reply::{Failure, Reply};

/// Parser combinator that performs negative lookahead
///
/// Succeeds with () if the given parser fails at the current position.
/// Fails if the given parser succeeds.
/// Never consumes any input regardless of outcome.
#[derive(Clone)]
pub struct Not<P> {
    parser: P,
}

impl<P> Not<P> {
    pub fn new(parser: P) -> Self {
        Not { parser }
    }
}

impl<P: Parser> Parser for Not<P> {
    type Cursor = P::Cursor;
    type Output = ();

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, ()> {
        match self.parser.parse(cursor.clone()) {
            Ok(_) => {
                let error = ParseError::message(cursor.position(), "unexpected match");
                Err(Failure::new(error, cursor))
            }
            Err(_) => Ok(((), cursor)),
        }
    }
}

/// Convenience function to create a Not parser for negative lookahead
pub fn not<P: Parser>(parser: P) -> Not<P> {
    Not::new(parser)
}

/// Extension trait to add .not() method support for parsers
pub trait NotExt: Parser + Sized {
    fn not(self) -> Not<Self> {
        Not::new(self)
    }
}

impl<P: Parser> NotExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursors::StrCursor;
    use crate::text::{alphanumeric, is_string};
    use crate::then::ThenExt;

    #[test]
    fn test_not_succeeds_when_parser_fails() {
        let start = StrCursor::new("abc");
        let ((), cursor) = not(is_string("xyz")).parse(start).unwrap();
        assert_eq!(cursor, start);
    }

    #[test]
    fn test_not_fails_when_parser_succeeds() {
        let start = StrCursor::new("abc");
        let failure = is_string("ab").not().parse(start).unwrap_err();
        assert_eq!(failure.cursor, start);
        assert_eq!(failure.error.items().len(), 1);
    }

    #[test]
    fn test_not_keyword_boundary() {
        let keyword = is_string("if").followed_by(not(alphanumeric()));
        assert!(keyword.parse(StrCursor::new("if x")).is_ok());
        assert!(keyword.parse(StrCursor::new("iffy")).is_err());
    }

    #[test]
    fn test_not_consuming_failure_is_rewound() {
        let start = StrCursor::new("ax");
        let inner = crate::text::is_char('a').then(crate::text::is_char('b'));
        let ((), cursor) = not(inner).parse(start).unwrap();
        assert_eq!(cursor, start);
    }
}
