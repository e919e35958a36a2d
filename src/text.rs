//! Parsers over character input.
//!
//! Everything here works on any cursor whose tokens are `char`s, which covers
//! [`StrCursor`](crate::cursors::StrCursor), [`StreamCursor`](crate::cursors::StreamCursor)
//! and a [`SliceCursor`](crate::cursors::SliceCursor) over a `[char]`.

use crate::cursor::Cursor;
use crate::error::{Item, ParseError};
use crate::many::{Many1, SkipMany, many1, skip_many};
use crate::parser::Parser;
use crate::primitive::{Satisfy, satisfy};
use crate::reply::{Failure, Reply};
use std::borrow::Cow;
use std::marker::PhantomData;

/// A single-character parser defined by a plain predicate
pub type CharClass<C> = Satisfy<C, fn(&char) -> bool>;

/// Parser that matches one specific character
pub fn is_char<C>(expected: char) -> Satisfy<C, impl Fn(&char) -> bool + Clone + Copy>
where
    C: Cursor<Token = char>,
{
    satisfy(move |ch: &char| *ch == expected, format!("{:?}", expected))
}

fn class<C>(predicate: fn(&char) -> bool, label: &'static str) -> CharClass<C>
where
    C: Cursor<Token = char>,
{
    satisfy(predicate, label)
}

/// Alphabetic character
pub fn letter<C: Cursor<Token = char>>() -> CharClass<C> {
    class(|ch| ch.is_alphabetic(), "letter")
}

/// ASCII decimal digit
pub fn digit<C: Cursor<Token = char>>() -> CharClass<C> {
    class(|ch| ch.is_ascii_digit(), "digit")
}

pub fn alphanumeric<C: Cursor<Token = char>>() -> CharClass<C> {
    class(|ch| ch.is_alphanumeric(), "letter or digit")
}

pub fn whitespace<C: Cursor<Token = char>>() -> CharClass<C> {
    class(|ch| ch.is_whitespace(), "whitespace")
}

pub fn newline<C: Cursor<Token = char>>() -> CharClass<C> {
    class(|ch| *ch == '\n', "newline")
}

/// Parser that matches any character in `chars`
pub fn one_of<C>(chars: &'static str) -> Satisfy<C, impl Fn(&char) -> bool + Clone + Copy>
where
    C: Cursor<Token = char>,
{
    satisfy(move |ch: &char| chars.contains(*ch), format!("one of {:?}", chars))
}

/// Parser that matches any character not in `chars`
pub fn none_of<C>(chars: &'static str) -> Satisfy<C, impl Fn(&char) -> bool + Clone + Copy>
where
    C: Cursor<Token = char>,
{
    satisfy(move |ch: &char| !chars.contains(*ch), format!("none of {:?}", chars))
}

/// Skip any amount of whitespace, newlines included
pub fn spaces<C: Cursor<Token = char>>() -> SkipMany<CharClass<C>> {
    skip_many(whitespace())
}

/// Skip spaces and tabs, stopping at a newline
pub fn inline_spaces<C: Cursor<Token = char>>() -> SkipMany<CharClass<C>> {
    skip_many(class(|ch| *ch == ' ' || *ch == '\t', "space"))
}

/// Parser that matches an exact string
///
/// The match is atomic: on any mismatch it fails at its starting cursor
/// without consuming, reporting the text it actually found.
pub struct IsString<C> {
    expected: Cow<'static, str>,
    _cursor: PhantomData<fn() -> C>,
}

impl<C> Clone for IsString<C> {
    fn clone(&self) -> Self {
        IsString {
            expected: self.expected.clone(),
            _cursor: PhantomData,
        }
    }
}

impl<C> IsString<C> {
    pub fn new(expected: impl Into<Cow<'static, str>>) -> Self {
        IsString {
            expected: expected.into(),
            _cursor: PhantomData,
        }
    }
}

impl<C: Cursor<Token = char>> Parser for IsString<C> {
    type Cursor = C;
    type Output = Cow<'static, str>;

    fn parse(&self, cursor: C) -> Reply<C, Self::Output> {
        let mut current = cursor.clone();
        let mut seen = String::new();

        for expected_char in self.expected.chars() {
            match current.current() {
                Some(ch) if ch == expected_char => {
                    seen.push(ch);
                    current = current.advance();
                }
                found => {
                    let unexpected = match found {
                        Some(ch) => {
                            seen.push(ch);
                            Item::Label(format!("{:?}", seen).into())
                        }
                        None => Item::EndOfInput,
                    };
                    let expected = Item::Label(format!("{:?}", self.expected).into());
                    let error = ParseError::standard(cursor.position(), unexpected, expected);
                    return Err(Failure::new(error, cursor));
                }
            }
        }

        Ok((self.expected.clone(), current))
    }
}

/// Convenience function to create an IsString parser
pub fn is_string<C>(expected: impl Into<Cow<'static, str>>) -> IsString<C>
where
    C: Cursor<Token = char>,
{
    IsString::new(expected)
}

/// Parser that matches one or more decimal digits and returns them as a u64
pub struct Natural<C> {
    digits: Many1<CharClass<C>>,
}

impl<C> Clone for Natural<C> {
    fn clone(&self) -> Self {
        Natural {
            digits: self.digits.clone(),
        }
    }
}

impl<C: Cursor<Token = char>> Parser for Natural<C> {
    type Cursor = C;
    type Output = u64;

    fn parse(&self, cursor: C) -> Reply<C, u64> {
        let start = cursor.position();
        let (digits, cursor) = self.digits.parse(cursor)?;
        let text: String = digits.into_iter().collect();

        match text.parse::<u64>() {
            Ok(value) => Ok((value, cursor)),
            Err(_) => {
                let error = ParseError::message(start, format!("number too large: {}", text));
                Err(Failure::new(error, cursor))
            }
        }
    }
}

pub fn natural<C: Cursor<Token = char>>() -> Natural<C> {
    Natural {
        digits: many1(digit()),
    }
}

/// Parser that matches an optionally signed decimal number as an i64
pub struct Integer<C> {
    digits: Many1<CharClass<C>>,
}

impl<C> Clone for Integer<C> {
    fn clone(&self) -> Self {
        Integer {
            digits: self.digits.clone(),
        }
    }
}

impl<C: Cursor<Token = char>> Parser for Integer<C> {
    type Cursor = C;
    type Output = i64;

    fn parse(&self, cursor: C) -> Reply<C, i64> {
        let start = cursor.position();
        let mut text = String::new();
        let cursor = match cursor.current() {
            Some(sign @ ('-' | '+')) => {
                text.push(sign);
                cursor.advance()
            }
            _ => cursor,
        };

        let (digits, cursor) = self.digits.parse(cursor)?;
        text.extend(digits);

        match text.parse::<i64>() {
            Ok(value) => Ok((value, cursor)),
            Err(_) => {
                let error = ParseError::message(start, format!("number out of range: {}", text));
                Err(Failure::new(error, cursor))
            }
        }
    }
}

pub fn integer<C: Cursor<Token = char>>() -> Integer<C> {
    Integer {
        digits: many1(digit()),
    }
}

/// Parser for a letter followed by letters, digits or underscores
pub struct Identifier<C> {
    _cursor: PhantomData<fn() -> C>,
}

impl<C> Clone for Identifier<C> {
    fn clone(&self) -> Self {
        identifier()
    }
}

impl<C: Cursor<Token = char>> Parser for Identifier<C> {
    type Cursor = C;
    type Output = String;

    fn parse(&self, cursor: C) -> Reply<C, String> {
        let (first, mut cursor) = letter().parse(cursor).map_err(|failure| Failure {
            error: failure.error.relabel("identifier"),
            cursor: failure.cursor,
        })?;

        let mut name = String::from(first);
        while let Some(ch) = cursor.current() {
            if !(ch.is_alphanumeric() || ch == '_') {
                break;
            }
            name.push(ch);
            cursor = cursor.advance();
        }
        Ok((name, cursor))
    }
}

pub fn identifier<C>() -> Identifier<C> {
    Identifier {
        _cursor: PhantomData,
    }
}
