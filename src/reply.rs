//! The outcome of running a parser.
//!
//! A [`Reply`] is a plain `Result`: the success half carries the value and the
//! cursor after it, the failure half carries the error and the cursor where
//! parsing stopped. Whether a failure consumed input is decided by comparing
//! its cursor with the cursor the parser started from, which is what the
//! alternation and repetition combinators use to decide between backtracking
//! and committing.

use crate::cursor::Cursor;
use crate::error::ParseError;

/// A failed parse together with the cursor where it stopped
#[derive(Debug, Clone)]
pub struct Failure<C: Cursor> {
    pub error: ParseError<C::Token>,
    pub cursor: C,
}

/// Result of running a parser
pub type Reply<C, T> = Result<(T, C), Failure<C>>;

impl<C: Cursor> Failure<C> {
    pub fn new(error: ParseError<C::Token>, cursor: C) -> Self {
        Failure { error, cursor }
    }

    /// Whether input was consumed between `start` and this failure
    pub fn consumed_since(&self, start: &C) -> bool {
        self.cursor != *start
    }

    /// Reposition the failure, keeping its error
    pub fn rewind(self, cursor: C) -> Self {
        Failure {
            error: self.error,
            cursor,
        }
    }

    /// Turn the failure into a reply of any success type
    pub fn retype<T>(self) -> Reply<C, T> {
        Err(self)
    }

    /// Combine two failures from alternatives tried at the same cursor
    ///
    /// The errors are merged with [`ParseError::merge`]; the cursor of the
    /// failure that got further is kept.
    pub fn merge(self, other: Failure<C>) -> Failure<C> {
        let cursor = if other.cursor.offset() > self.cursor.offset() {
            other.cursor
        } else {
            self.cursor
        };
        Failure {
            error: self.error.merge(other.error),
            cursor,
        }
    }
}

/// Extension trait for working with replies outside of combinators
pub trait ReplyExt<C: Cursor, T> {
    /// Transform the success value, passing failures through untouched
    fn map_value<U, F>(self, f: F) -> Reply<C, U>
    where
        F: FnOnce(T) -> U;

    /// On success, continue with the value and the cursor after it
    fn and_then_reply<U, F>(self, f: F) -> Reply<C, U>
    where
        F: FnOnce(T, C) -> Reply<C, U>;
}

impl<C: Cursor, T> ReplyExt<C, T> for Reply<C, T> {
    fn map_value<U, F>(self, f: F) -> Reply<C, U>
    where
        F: FnOnce(T) -> U,
    {
        self.map(|(value, cursor)| (f(value), cursor))
    }

    fn and_then_reply<U, F>(self, f: F) -> Reply<C, U>
    where
        F: FnOnce(T, C) -> Reply<C, U>,
    {
        match self {
            Ok((value, cursor)) => f(value, cursor),
            Err(failure) => failure.retype(),
        }
    }
}
