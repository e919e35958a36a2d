use crate::parser::Parser;
use crate::reply::Reply;

/// Parser combinator that runs a parser without consuming input on success
///
/// The value is returned with the original cursor. A failure is passed
/// through unchanged, so a consuming failure still counts as consuming.
#[derive(Clone)]
pub struct LookAhead<P> {
    parser: P,
}

impl<P> LookAhead<P> {
    pub fn new(parser: P) -> Self {
        LookAhead { parser }
    }
}

impl<P: Parser> Parser for LookAhead<P> {
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (value, _) = self.parser.parse(cursor.clone())?;
        Ok((value, cursor))
    }
}

/// Convenience function to create a LookAhead parser
pub fn look_ahead<P: Parser>(parser: P) -> LookAhead<P> {
    LookAhead::new(parser)
}

/// Extension trait to add .look_ahead() method support for parsers
pub trait LookAheadExt: Parser + Sized {
    fn look_ahead(self) -> LookAhead<Self> {
        LookAhead::new(self)
    }
}

impl<P: Parser> LookAheadExt for P {}
