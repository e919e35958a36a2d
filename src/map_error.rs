use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::parser::Parser;
use crate::reply::{Failure, Reply};
use std::borrow::Cow;
use std::fmt;

type TokenOf<P> = <<P as Parser>::Cursor as Cursor>::Token;

/// Parser combinator that transforms the error of a parser using a mapping function
///
/// Only the error changes; the failure cursor, and therefore whether the
/// failure counts as having consumed input, is kept.
#[derive(Clone)]
pub struct MapError<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F> MapError<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        MapError { parser, mapper }
    }
}

impl<P, F> fmt::Debug for MapError<P, F>
where
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapError")
            .field("parser", &self.parser)
            .field("mapper", &"<function>")
            .finish()
    }
}

impl<P, F> Parser for MapError<P, F>
where
    P: Parser,
    F: Fn(ParseError<TokenOf<P>>) -> ParseError<TokenOf<P>>,
{
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        self.parser.parse(cursor).map_err(|failure| Failure {
            error: (self.mapper)(failure.error),
            cursor: failure.cursor,
        })
    }
}

/// Parser combinator that names what the wrapped parser expects
///
/// See [`ParseError::relabel`] for how each kind of error is rewritten.
#[derive(Debug, Clone)]
pub struct FailWith<P> {
    parser: P,
    label: Cow<'static, str>,
}

impl<P> FailWith<P> {
    pub fn new(parser: P, label: impl Into<Cow<'static, str>>) -> Self {
        FailWith {
            parser,
            label: label.into(),
        }
    }
}

impl<P: Parser> Parser for FailWith<P> {
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        self.parser.parse(cursor).map_err(|failure| Failure {
            error: failure.error.relabel(self.label.clone()),
            cursor: failure.cursor,
        })
    }
}

/// Extension trait to add .map_error() and .fail_with() to parsers
pub trait MapErrorExt: Parser + Sized {
    fn map_error<F>(self, mapper: F) -> MapError<Self, F>
    where
        F: Fn(ParseError<TokenOf<Self>>) -> ParseError<TokenOf<Self>>,
    {
        MapError::new(self, mapper)
    }

    fn fail_with(self, label: impl Into<Cow<'static, str>>) -> FailWith<Self> {
        FailWith::new(self, label)
    }
}

impl<P: Parser> MapErrorExt for P {}

/// Convenience function to create a MapError parser
pub fn map_error<P, F>(parser: P, mapper: F) -> MapError<P, F>
where
    P: Parser,
    F: Fn(ParseError<TokenOf<P>>) -> ParseError<TokenOf<P>>,
{
    MapError::new(parser, mapper)
}

/// Convenience function to create a FailWith parser
pub fn fail_with<P: Parser>(parser: P, label: impl Into<Cow<'static, str>>) -> FailWith<P> {
    FailWith::new(parser, label)
}
