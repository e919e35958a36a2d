use crate::cursor::Cursor;
use crate::error::{Item, ParseError};
use crate::parser::Parser;
use crate::reply::{Failure, Reply};
use std::borrow::Cow;
use std::marker::PhantomData;

/// Parser that consumes one token matching a predicate
///
/// On a mismatch it fails without consuming, reporting the token it found
/// and `label` as what was expected.
pub struct Satisfy<C, F> {
    predicate: F,
    label: Cow<'static, str>,
    _cursor: PhantomData<fn() -> C>,
}

impl<C, F: Clone> Clone for Satisfy<C, F> {
    fn clone(&self) -> Self {
        Satisfy {
            predicate: self.predicate.clone(),
            label: self.label.clone(),
            _cursor: PhantomData,
        }
    }
}

impl<C, F> Parser for Satisfy<C, F>
where
    C: Cursor,
    F: Fn(&C::Token) -> bool,
{
    type Cursor = C;
    type Output = C::Token;

    fn parse(&self, cursor: C) -> Reply<C, C::Token> {
        match cursor.current() {
            Some(token) if (self.predicate)(&token) => Ok((token, cursor.advance())),
            found => {
                let unexpected = found.map_or(Item::EndOfInput, Item::Token);
                let error = ParseError::standard(
                    cursor.position(),
                    unexpected,
                    Item::Label(self.label.clone()),
                );
                Err(Failure::new(error, cursor))
            }
        }
    }
}

/// Convenience function to create a Satisfy parser
pub fn satisfy<C, F>(predicate: F, label: impl Into<Cow<'static, str>>) -> Satisfy<C, F>
where
    C: Cursor,
    F: Fn(&C::Token) -> bool,
{
    Satisfy {
        predicate,
        label: label.into(),
        _cursor: PhantomData,
    }
}

/// Parser that matches one specific token
pub fn token<C: Cursor>(expected: C::Token) -> Satisfy<C, impl Fn(&C::Token) -> bool + Clone> {
    let label = format!("{:?}", expected);
    satisfy(move |token: &C::Token| *token == expected, label)
}

/// Parser that consumes any single token
pub fn any<C: Cursor>() -> Satisfy<C, fn(&C::Token) -> bool> {
    fn always<T>(_: &T) -> bool {
        true
    }
    satisfy(always::<C::Token> as fn(&C::Token) -> bool, "any token")
}

/// Parser that only succeeds at end of input
pub struct Eof<C> {
    _cursor: PhantomData<fn() -> C>,
}

impl<C> Clone for Eof<C> {
    fn clone(&self) -> Self {
        eof()
    }
}

impl<C: Cursor> Parser for Eof<C> {
    type Cursor = C;
    type Output = ();

    fn parse(&self, cursor: C) -> Reply<C, ()> {
        match cursor.current() {
            None => Ok(((), cursor)),
            Some(token) => {
                let error = ParseError::standard(
                    cursor.position(),
                    Item::Token(token),
                    Item::EndOfInput,
                );
                Err(Failure::new(error, cursor))
            }
        }
    }
}

pub fn eof<C>() -> Eof<C> {
    Eof {
        _cursor: PhantomData,
    }
}

/// Parser that always succeeds with a clone of its value, consuming nothing
pub struct Pure<C, T> {
    value: T,
    _cursor: PhantomData<fn() -> C>,
}

impl<C, T: Clone> Clone for Pure<C, T> {
    fn clone(&self) -> Self {
        pure(self.value.clone())
    }
}

impl<C: Cursor, T: Clone> Parser for Pure<C, T> {
    type Cursor = C;
    type Output = T;

    fn parse(&self, cursor: C) -> Reply<C, T> {
        Ok((self.value.clone(), cursor))
    }
}

pub fn pure<C, T>(value: T) -> Pure<C, T> {
    Pure {
        value,
        _cursor: PhantomData,
    }
}

/// Parser that always fails with a fixed error, consuming nothing
///
/// The error's position is taken from the cursor at the time of failure
/// when built with [`fail`]; [`parser_error`] reports the error verbatim.
pub struct Fail<C: Cursor, O> {
    reason: FailReason<C::Token>,
    _output: PhantomData<fn() -> O>,
}

enum FailReason<T> {
    Message(Cow<'static, str>),
    Error(ParseError<T>),
}

impl<C: Cursor, O> Clone for Fail<C, O> {
    fn clone(&self) -> Self {
        let reason = match &self.reason {
            FailReason::Message(message) => FailReason::Message(message.clone()),
            FailReason::Error(error) => FailReason::Error(error.clone()),
        };
        Fail {
            reason,
            _output: PhantomData,
        }
    }
}

impl<C: Cursor, O> Parser for Fail<C, O> {
    type Cursor = C;
    type Output = O;

    fn parse(&self, cursor: C) -> Reply<C, O> {
        let error = match &self.reason {
            FailReason::Message(message) => {
                ParseError::message(cursor.position(), message.clone())
            }
            FailReason::Error(error) => error.clone(),
        };
        Err(Failure::new(error, cursor))
    }
}

pub fn fail<C: Cursor, O>(message: impl Into<Cow<'static, str>>) -> Fail<C, O> {
    Fail {
        reason: FailReason::Message(message.into()),
        _output: PhantomData,
    }
}

pub fn parser_error<C: Cursor, O>(error: ParseError<C::Token>) -> Fail<C, O> {
    Fail {
        reason: FailReason::Error(error),
        _output: PhantomData,
    }
}
