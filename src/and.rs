use crate::parser::Parser;
use crate::reply::Reply;

/// Parser combinator that sequences two parsers and returns both results as a tuple
///
/// Note: When chaining multiple `.and()` calls, this produces nested tuples like
/// `(((a, b), c), d)` rather than flat tuples like `(a, b, c, d)`. The nested
/// form is explicit about the parsing order when destructuring.
///
/// Example:
/// ```
/// use parsifold::and::AndExt;
/// use parsifold::cursors::StrCursor;
/// use parsifold::parser::Parser;
/// use parsifold::text::{is_char, natural};
///
/// let cursor = StrCursor::new("123.456");
/// let (((int_part, _), frac_part), _) = natural()
///     .and(is_char('.'))
///     .and(natural())
///     .parse(cursor)
///     .unwrap();
/// assert_eq!(int_part, 123);
/// assert_eq!(frac_part, 456);
/// ```
#[derive(Clone)]
pub struct And<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> And<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        And { parser1, parser2 }
    }
}

impl<P1, P2> Parser for And<P1, P2>
where
    P1: Parser,
    P2: Parser<Cursor = P1::Cursor>,
{
    type Cursor = P1::Cursor;
    type Output = (P1::Output, P2::Output);

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (result1, cursor) = self.parser1.parse(cursor)?;
        let (result2, cursor) = self.parser2.parse(cursor)?;
        Ok(((result1, result2), cursor))
    }
}

/// Convenience function to create an And parser
pub fn and<P1, P2>(parser1: P1, parser2: P2) -> And<P1, P2>
where
    P1: Parser,
    P2: Parser<Cursor = P1::Cursor>,
{
    And::new(parser1, parser2)
}

/// Extension trait to add .and() method support for parsers
pub trait AndExt: Parser + Sized {
    fn and<P>(self, other: P) -> And<Self, P>
    where
        P: Parser<Cursor = Self::Cursor>,
    {
        And::new(self, other)
    }
}

/// Implement AndExt for all parsers
impl<P: Parser> AndExt for P {}
