use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::parser::Parser;
use crate::reply::{Failure, Reply};

/// Parser combinator that tries the first parser, and if it fails, tries the second parser
///
/// The second parser only runs when the first failed without consuming
/// input. Once the first parser has consumed a token it is committed, and
/// its failure is returned unchanged; wrap it in
/// [`attempt`](crate::attempt::attempt) to backtrack further. When both
/// alternatives fail their errors are merged.
#[derive(Clone)]
pub struct Or<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Or<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Or { parser1, parser2 }
    }
}

impl<P1, P2> Parser for Or<P1, P2>
where
    P1: Parser,
    P2: Parser<Cursor = P1::Cursor, Output = P1::Output>,
{
    type Cursor = P1::Cursor;
    type Output = P1::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        match self.parser1.parse(cursor.clone()) {
            Ok(result) => Ok(result),
            Err(failure) if failure.consumed_since(&cursor) => Err(failure),
            Err(first) => match self.parser2.parse(cursor) {
                Ok(result) => Ok(result),
                Err(second) => Err(first.merge(second)),
            },
        }
    }
}

/// Extension trait to add .or() method support for parsers
pub trait OrExt: Parser + Sized {
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        P: Parser<Cursor = Self::Cursor, Output = Self::Output>,
    {
        Or::new(self, other)
    }
}

/// Implement OrExt for all parsers
impl<P: Parser> OrExt for P {}

/// Convenience function to create an Or parser
pub fn or<P1, P2>(parser1: P1, parser2: P2) -> Or<P1, P2>
where
    P1: Parser,
    P2: Parser<Cursor = P1::Cursor, Output = P1::Output>,
{
    Or::new(parser1, parser2)
}

/// Parser combinator that tries a list of alternatives in order
///
/// Behaves like `p1.or(p2).or(p3)...` over parsers of one type, which in
/// practice means [`BoxedParser`](crate::boxed::BoxedParser)s or references.
/// An empty choice fails without consuming.
#[derive(Clone)]
pub struct Choice<P> {
    parsers: Vec<P>,
}

impl<P> Choice<P> {
    pub fn new(parsers: Vec<P>) -> Self {
        Choice { parsers }
    }
}

impl<P: Parser> Parser for Choice<P> {
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let mut failed: Option<Failure<Self::Cursor>> = None;
        for parser in &self.parsers {
            match parser.parse(cursor.clone()) {
                Ok(result) => return Ok(result),
                Err(failure) if failure.consumed_since(&cursor) => return Err(failure),
                Err(failure) => {
                    failed = Some(match failed {
                        Some(previous) => previous.merge(failure),
                        None => failure,
                    });
                }
            }
        }

        let failure = failed.unwrap_or_else(|| {
            let error = ParseError::message(cursor.position(), "no alternatives to choose from");
            Failure::new(error, cursor)
        });
        Err(failure)
    }
}

/// Convenience function to create a Choice parser
pub fn choice<P: Parser>(parsers: Vec<P>) -> Choice<P> {
    Choice::new(parsers)
}
