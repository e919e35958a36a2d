use crate::parser::Parser;
use crate::reply::Reply;

/// Parser combinator that makes a parser optional
///
/// Returns `Some(value)` on success and `None` when the parser fails without
/// consuming input. A failure after consuming input is propagated.
#[derive(Clone)]
pub struct Optional<P> {
    parser: P,
}

impl<P> Optional<P> {
    pub fn new(parser: P) -> Self {
        Optional { parser }
    }
}

impl<P: Parser> Parser for Optional<P> {
    type Cursor = P::Cursor;
    type Output = Option<P::Output>;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        match self.parser.parse(cursor.clone()) {
            Ok((value, cursor)) => Ok((Some(value), cursor)),
            Err(failure) if failure.consumed_since(&cursor) => Err(failure),
            Err(_) => Ok((None, cursor)),
        }
    }
}

/// Convenience function to create an Optional parser
pub fn optional<P: Parser>(parser: P) -> Optional<P> {
    Optional::new(parser)
}

/// Extension trait to add .optional() method support for parsers
pub trait OptionalExt: Parser + Sized {
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }
}

impl<P: Parser> OptionalExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::and::AndExt;
    use crate::cursor::Cursor;
    use crate::cursors::StrCursor;
    use crate::text::{is_char, natural};
    use crate::then::ThenExt;

    #[test]
    fn test_optional_present() {
        let (sign, cursor) = optional(is_char('-')).parse(StrCursor::new("-5")).unwrap();
        assert_eq!(sign, Some('-'));
        assert_eq!(cursor.current(), Some('5'));
    }

    #[test]
    fn test_optional_absent() {
        let start = StrCursor::new("5");
        let (sign, cursor) = optional(is_char('-')).parse(start).unwrap();
        assert_eq!(sign, None);
        assert_eq!(cursor, start);
    }

    #[test]
    fn test_optional_in_sequence() {
        let parser = natural().and(is_char('.').then(natural()).optional());
        let ((whole, fraction), _) = parser.parse(StrCursor::new("3.14")).unwrap();
        assert_eq!((whole, fraction), (3, Some(14)));

        let ((whole, fraction), _) = parser.parse(StrCursor::new("3")).unwrap();
        assert_eq!((whole, fraction), (3, None));
    }

    #[test]
    fn test_optional_propagates_consuming_failure() {
        let start = StrCursor::new(".x");
        let failure = optional(is_char('.').then(natural()))
            .parse(start)
            .unwrap_err();
        assert!(failure.consumed_since(&start));
    }
}
