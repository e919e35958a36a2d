use crate::parser::Parser;
use crate::reply::Reply;

/// Parser combinator that runs two parsers in sequence and keeps the second result
#[derive(Clone)]
pub struct Then<P1, P2> {
    first: P1,
    second: P2,
}

impl<P1, P2> Then<P1, P2> {
    pub fn new(first: P1, second: P2) -> Self {
        Then { first, second }
    }
}

impl<P1, P2> Parser for Then<P1, P2>
where
    P1: Parser,
    P2: Parser<Cursor = P1::Cursor>,
{
    type Cursor = P1::Cursor;
    type Output = P2::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (_, cursor) = self.first.parse(cursor)?;
        self.second.parse(cursor)
    }
}

/// Parser combinator that runs two parsers in sequence and keeps the first result
#[derive(Clone)]
pub struct FollowedBy<P1, P2> {
    first: P1,
    second: P2,
}

impl<P1, P2> FollowedBy<P1, P2> {
    pub fn new(first: P1, second: P2) -> Self {
        FollowedBy { first, second }
    }
}

impl<P1, P2> Parser for FollowedBy<P1, P2>
where
    P1: Parser,
    P2: Parser<Cursor = P1::Cursor>,
{
    type Cursor = P1::Cursor;
    type Output = P1::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (value, cursor) = self.first.parse(cursor)?;
        let (_, cursor) = self.second.parse(cursor)?;
        Ok((value, cursor))
    }
}

/// Convenience function to create a Then parser
pub fn then<P1, P2>(first: P1, second: P2) -> Then<P1, P2>
where
    P1: Parser,
    P2: Parser<Cursor = P1::Cursor>,
{
    Then::new(first, second)
}

/// Convenience function to create a FollowedBy parser
pub fn followed_by<P1, P2>(first: P1, second: P2) -> FollowedBy<P1, P2>
where
    P1: Parser,
    P2: Parser<Cursor = P1::Cursor>,
{
    FollowedBy::new(first, second)
}

/// Extension trait to add .then() and .followed_by() to parsers
pub trait ThenExt: Parser + Sized {
    fn then<P>(self, next: P) -> Then<Self, P>
    where
        P: Parser<Cursor = Self::Cursor>,
    {
        Then::new(self, next)
    }

    fn followed_by<P>(self, next: P) -> FollowedBy<Self, P>
    where
        P: Parser<Cursor = Self::Cursor>,
    {
        FollowedBy::new(self, next)
    }
}

impl<P: Parser> ThenExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::cursors::StrCursor;
    use crate::text::{is_char, natural};

    #[test]
    fn test_then_keeps_second() {
        let parser = is_char('#').then(natural());
        let (number, cursor) = parser.parse(StrCursor::new("#42;")).unwrap();
        assert_eq!(number, 42);
        assert_eq!(cursor.current(), Some(';'));
    }

    #[test]
    fn test_followed_by_keeps_first() {
        let parser = natural().followed_by(is_char(';'));
        let (number, cursor) = parser.parse(StrCursor::new("42;")).unwrap();
        assert_eq!(number, 42);
        assert!(cursor.is_end());
    }

    #[test]
    fn test_then_first_fails_without_consuming() {
        let start = StrCursor::new("x42");
        let failure = then(is_char('#'), natural()).parse(start).unwrap_err();
        assert!(!failure.consumed_since(&start));
    }

    #[test]
    fn test_then_second_fails_after_consuming() {
        let start = StrCursor::new("#x");
        let failure = then(is_char('#'), natural()).parse(start).unwrap_err();
        assert!(failure.consumed_since(&start));
        assert_eq!(failure.cursor.rest(), "x");
    }

    #[test]
    fn test_followed_by_function_syntax() {
        let parser = followed_by(is_char('a'), is_char('b'));
        let (ch, cursor) = parser.parse(StrCursor::new("ab")).unwrap();
        assert_eq!(ch, 'a');
        assert!(cursor.is_end());
        assert!(parser.parse(StrCursor::new("aa")).is_err());
    }
}
