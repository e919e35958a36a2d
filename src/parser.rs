use crate::cursor::Cursor;
use crate::reply::Reply;
use std::marker::PhantomData;
use std::sync::Arc;

/// Core parser trait for parser combinators
///
/// A parser is a pure function from a cursor to a [`Reply`]. It keeps no
/// mutable state between calls, so one parser value can be run any number of
/// times, including from several threads on independent cursors.
pub trait Parser {
    /// The cursor type this parser reads from
    type Cursor: Cursor;
    /// The value produced on success
    type Output;

    /// Attempt to parse from the given cursor position
    ///
    /// Returns the parsed value and the cursor after it on success. On
    /// failure the returned [`Failure`](crate::reply::Failure) records where
    /// parsing stopped; a failure cursor equal to the input cursor means no
    /// input was consumed.
    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output>;
}

impl<P: Parser + ?Sized> Parser for &P {
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        (**self).parse(cursor)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        (**self).parse(cursor)
    }
}

impl<P: Parser + ?Sized> Parser for Arc<P> {
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        (**self).parse(cursor)
    }
}

/// Parser built from a plain function over cursors
pub struct FromFn<C, F> {
    function: F,
    _cursor: PhantomData<fn() -> C>,
}

impl<C, F: Clone> Clone for FromFn<C, F> {
    fn clone(&self) -> Self {
        from_fn(self.function.clone())
    }
}

impl<C, F, O> Parser for FromFn<C, F>
where
    C: Cursor,
    F: Fn(C) -> Reply<C, O>,
{
    type Cursor = C;
    type Output = O;

    fn parse(&self, cursor: C) -> Reply<C, O> {
        (self.function)(cursor)
    }
}

/// Wrap a function as a parser
///
/// Useful for one-off parsers with control flow that reads more naturally as
/// a function body than as a chain of combinators.
pub fn from_fn<C, F>(function: F) -> FromFn<C, F> {
    FromFn {
        function,
        _cursor: PhantomData,
    }
}
