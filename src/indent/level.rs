use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::reply::Reply;
use std::marker::PhantomData;

pub use crate::position::{IndentLevel, Relation};

/// Parser that returns the indentation level at the cursor without consuming
pub struct Level<C> {
    _cursor: PhantomData<fn() -> C>,
}

impl<C> Clone for Level<C> {
    fn clone(&self) -> Self {
        level()
    }
}

impl<C: Cursor> Parser for Level<C> {
    type Cursor = C;
    type Output = IndentLevel;

    fn parse(&self, cursor: C) -> Reply<C, IndentLevel> {
        Ok((IndentLevel::of(cursor.position()), cursor))
    }
}

pub fn level<C>() -> Level<C> {
    Level {
        _cursor: PhantomData,
    }
}
