use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::parser::Parser;
use crate::reply::{Failure, Reply};

/// Parser combinator that checks the value produced by a parser
///
/// When `predicate` rejects the value, the parse fails at the cursor the
/// parser started from with a custom error built by `message`, as if nothing
/// had been consumed.
#[derive(Clone)]
pub struct Assert<P, F, M> {
    parser: P,
    predicate: F,
    message: M,
}

impl<P, F, M> Assert<P, F, M> {
    pub fn new(parser: P, predicate: F, message: M) -> Self {
        Assert {
            parser,
            predicate,
            message,
        }
    }
}

impl<P, F, M> Parser for Assert<P, F, M>
where
    P: Parser,
    F: Fn(&P::Output) -> bool,
    M: Fn(&P::Output) -> String,
{
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (value, next) = self.parser.parse(cursor.clone())?;
        if (self.predicate)(&value) {
            return Ok((value, next));
        }

        let error = ParseError::message(cursor.position(), (self.message)(&value));
        Err(Failure::new(error, cursor))
    }
}

/// Convenience function to create an Assert parser
pub fn assert<P, F, M>(parser: P, predicate: F, message: M) -> Assert<P, F, M>
where
    P: Parser,
    F: Fn(&P::Output) -> bool,
    M: Fn(&P::Output) -> String,
{
    Assert::new(parser, predicate, message)
}

/// Extension trait to add .assert() method support for parsers
pub trait AssertExt: Parser + Sized {
    fn assert<F, M>(self, predicate: F, message: M) -> Assert<Self, F, M>
    where
        F: Fn(&Self::Output) -> bool,
        M: Fn(&Self::Output) -> String,
    {
        Assert::new(self, predicate, message)
    }
}

impl<P: Parser> AssertExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursors::StrCursor;
    use crate::error::Fancy;
    use crate::or::OrExt;
    use crate::position::Position;
    use crate::text::{identifier, natural};
    use pretty_assertions::assert_eq;

    fn byte() -> impl Parser<Cursor = StrCursor<'static>, Output = u64> {
        natural().assert(|n| *n < 256, |n| format!("{} does not fit in a byte", n))
    }

    #[test]
    fn test_assert_accepts() {
        let (value, cursor) = byte().parse(StrCursor::new("200")).unwrap();
        assert_eq!(value, 200);
        assert!(cursor.is_end());
    }

    #[test]
    fn test_assert_rejects_at_start() {
        let start = StrCursor::new("300");
        let failure = byte().parse(start).unwrap_err();
        assert_eq!(failure.cursor, start);
        assert_eq!(
            failure.error,
            ParseError::message(Position::START, "300 does not fit in a byte")
        );
        assert_eq!(
            failure.error.items(),
            &[Fancy::Message("300 does not fit in a byte".into())]
        );
    }

    #[test]
    fn test_assert_rejection_allows_alternative() {
        let not_keyword = assert(
            identifier(),
            |name: &String| name != "fn",
            |name| format!("{} is reserved", name),
        );
        let parser = not_keyword.or(crate::primitive::pure(String::from("<keyword>")));
        let (name, cursor) = parser.parse(StrCursor::new("fn")).unwrap();
        assert_eq!(name, "<keyword>");
        assert_eq!(cursor.rest(), "fn");
    }
}
