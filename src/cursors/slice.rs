use crate::cursor::Cursor;
use crate::position::{Position, PositionFn};
use std::fmt;

/// A cursor over an in-memory list of tokens
///
/// By default every token is one column wide and everything sits on line 1.
/// Tokens produced by a lexer usually know where they came from; pass a
/// [`PositionFn`] to [`SliceCursor::with_positions`] to report those
/// positions instead.
pub struct SliceCursor<'code, T> {
    data: &'code [T],
    index: usize,
    position: Position,
    step: PositionFn<T>,
}

fn column_step<T>(position: Position, _token: &T) -> Position {
    position.next_column()
}

impl<'code, T> SliceCursor<'code, T> {
    pub fn new(data: &'code [T]) -> Self {
        Self::with_positions(data, column_step::<T>)
    }

    pub fn with_positions(data: &'code [T], step: PositionFn<T>) -> Self {
        SliceCursor {
            data,
            index: 0,
            position: Position::START,
            step,
        }
    }

    /// The unconsumed tokens
    pub fn rest(&self) -> &'code [T] {
        &self.data[self.index..]
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceCursor<'_, T> {}

impl<T> PartialEq for SliceCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: fmt::Debug> fmt::Debug for SliceCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceCursor")
            .field("position", &self.position)
            .field("current", &self.data.get(self.index))
            .finish()
    }
}

impl<T> Cursor for SliceCursor<'_, T>
where
    T: Clone + PartialEq + fmt::Debug,
{
    type Token = T;

    fn current(&self) -> Option<T> {
        self.data.get(self.index).cloned()
    }

    fn advance(self) -> Self {
        let Some(token) = self.data.get(self.index) else {
            panic!("advance past end of input at {}", self.position);
        };
        let mut position = (self.step)(self.position, token);
        position.offset = self.position.offset + 1;
        SliceCursor {
            index: self.index + 1,
            position,
            ..self
        }
    }

    fn position(&self) -> Position {
        self.position
    }
}
