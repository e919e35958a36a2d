use crate::parser::Parser;
use crate::reply::Reply;

/// Parser combinator that transforms the output of a parser using a mapping function
#[derive(Clone)]
pub struct Map<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F> Map<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        Map { parser, mapper }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    type Cursor = P::Cursor;
    type Output = U;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, U> {
        let (value, cursor) = self.parser.parse(cursor)?;
        Ok(((self.mapper)(value), cursor))
    }
}

/// Convenience function to create a Map parser
pub fn map<P, F, U>(parser: P, mapper: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    Map::new(parser, mapper)
}

/// Extension trait to add .map() method support for parsers
pub trait MapExt: Parser + Sized {
    fn map<F, U>(self, mapper: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        Map::new(self, mapper)
    }
}

/// Implement MapExt for all parsers
impl<P: Parser> MapExt for P {}
