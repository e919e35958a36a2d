use crate::parser::Parser;
use crate::reply::Reply;

/// Parser combinator that builds its second parser from the first result
///
/// This is monadic bind: the continuation sees the value the first parser
/// produced and decides how to go on, e.g. reading a length prefix and then
/// exactly that many items.
#[derive(Clone)]
pub struct Bind<P, F> {
    parser: P,
    continuation: F,
}

impl<P, F> Bind<P, F> {
    pub fn new(parser: P, continuation: F) -> Self {
        Bind {
            parser,
            continuation,
        }
    }
}

impl<P, F, Q> Parser for Bind<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Q,
    Q: Parser<Cursor = P::Cursor>,
{
    type Cursor = P::Cursor;
    type Output = Q::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (value, cursor) = self.parser.parse(cursor)?;
        (self.continuation)(value).parse(cursor)
    }
}

/// Convenience function to create a Bind parser
pub fn bind<P, F, Q>(parser: P, continuation: F) -> Bind<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Q,
    Q: Parser<Cursor = P::Cursor>,
{
    Bind::new(parser, continuation)
}

/// Extension trait to add .bind() method support for parsers
pub trait BindExt: Parser + Sized {
    fn bind<F, Q>(self, continuation: F) -> Bind<Self, F>
    where
        F: Fn(Self::Output) -> Q,
        Q: Parser<Cursor = Self::Cursor>,
    {
        Bind::new(self, continuation)
    }
}

impl<P: Parser> BindExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::count;
    use crate::cursor::Cursor;
    use crate::cursors::StrCursor;
    use crate::map::MapExt;
    use crate::primitive::pure;
    use crate::text::{digit, is_char, letter, natural};
    use crate::then::ThenExt;

    #[test]
    fn test_bind_length_prefixed() {
        let parser = natural()
            .followed_by(is_char(':'))
            .bind(|n| count(letter(), n as usize).map(|cs| cs.into_iter().collect::<String>()));

        let (word, cursor) = parser.parse(StrCursor::new("3:abcd")).unwrap();
        assert_eq!(word, "abc");
        assert_eq!(cursor.current(), Some('d'));

        assert!(parser.parse(StrCursor::new("5:abc")).is_err());
    }

    #[test]
    fn test_bind_first_failure_short_circuits() {
        let start = StrCursor::new("x");
        let parser = bind(digit(), |d| pure(d));
        let failure = parser.parse(start).unwrap_err();
        assert!(!failure.consumed_since(&start));
    }

    #[test]
    fn test_bind_sees_value() {
        let parser = digit().bind(|d: char| {
            let doubled = d.to_digit(10).unwrap_or_default() * 2;
            pure(doubled)
        });
        let (value, _) = parser.parse(StrCursor::new("4")).unwrap();
        assert_eq!(value, 8);
    }
}
