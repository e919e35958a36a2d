//! Lists of items with separators.
//!
//! Three flavours, each in a zero-or-more and a one-or-more variant:
//!
//! - [`sep_by`]: `a,b,c` with no trailing separator. A separator that is not
//!   followed by an item fails after consuming the separator.
//! - [`end_by`]: `a;b;c;` where every item is followed by a separator.
//! - [`sep_end_by`]: `a,b,c` or `a,b,c,`, the trailing separator is optional.
//!
//! Whitespace is not skipped automatically.

use crate::parser::Parser;
use crate::reply::Reply;

/// Parser combinator for separated items without a trailing separator
#[derive(Clone)]
pub struct SepBy<P, S> {
    item: P,
    separator: S,
    at_least_one: bool,
}

impl<P, S> SepBy<P, S> {
    pub fn new(item: P, separator: S, at_least_one: bool) -> Self {
        SepBy {
            item,
            separator,
            at_least_one,
        }
    }
}

impl<P, S> Parser for SepBy<P, S>
where
    P: Parser,
    S: Parser<Cursor = P::Cursor>,
{
    type Cursor = P::Cursor;
    type Output = Vec<P::Output>;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (first, mut cursor) = match self.item.parse(cursor.clone()) {
            Ok(result) => result,
            Err(failure) if self.at_least_one || failure.consumed_since(&cursor) => {
                return Err(failure);
            }
            Err(_) => return Ok((Vec::new(), cursor)),
        };

        let mut results = vec![first];
        loop {
            let next = match self.separator.parse(cursor.clone()) {
                Ok((_, next)) => next,
                Err(failure) if failure.consumed_since(&cursor) => return Err(failure),
                Err(_) => break,
            };
            match self.item.parse(next) {
                Ok((value, next)) => {
                    results.push(value);
                    cursor = next;
                }
                Err(failure) if failure.consumed_since(&cursor) => return Err(failure),
                Err(_) => break,
            }
        }
        Ok((results, cursor))
    }
}

/// Zero or more items separated by `separator`
pub fn sep_by<P, S>(item: P, separator: S) -> SepBy<P, S>
where
    P: Parser,
    S: Parser<Cursor = P::Cursor>,
{
    SepBy::new(item, separator, false)
}

/// One or more items separated by `separator`
pub fn sep_by1<P, S>(item: P, separator: S) -> SepBy<P, S>
where
    P: Parser,
    S: Parser<Cursor = P::Cursor>,
{
    SepBy::new(item, separator, true)
}

/// Parser combinator for items that are each followed by a separator
#[derive(Clone)]
pub struct EndBy<P, S> {
    item: P,
    separator: S,
    at_least_one: bool,
}

impl<P, S> EndBy<P, S> {
    pub fn new(item: P, separator: S, at_least_one: bool) -> Self {
        EndBy {
            item,
            separator,
            at_least_one,
        }
    }
}

impl<P, S> Parser for EndBy<P, S>
where
    P: Parser,
    S: Parser<Cursor = P::Cursor>,
{
    type Cursor = P::Cursor;
    type Output = Vec<P::Output>;

    fn parse(&self, mut cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let mut results = Vec::new();
        loop {
            let (value, next) = match self.item.parse(cursor.clone()) {
                Ok(result) => result,
                Err(failure) if failure.consumed_since(&cursor) => return Err(failure),
                Err(failure) if self.at_least_one && results.is_empty() => return Err(failure),
                Err(_) => break,
            };
            let (_, next) = self.separator.parse(next)?;
            results.push(value);
            cursor = next;
        }
        Ok((results, cursor))
    }
}

/// Zero or more items, each terminated by `separator`
pub fn end_by<P, S>(item: P, separator: S) -> EndBy<P, S>
where
    P: Parser,
    S: Parser<Cursor = P::Cursor>,
{
    EndBy::new(item, separator, false)
}

/// One or more items, each terminated by `separator`
pub fn end_by1<P, S>(item: P, separator: S) -> EndBy<P, S>
where
    P: Parser,
    S: Parser<Cursor = P::Cursor>,
{
    EndBy::new(item, separator, true)
}

/// Parser combinator for separated items with an optional trailing separator
#[derive(Clone)]
pub struct SepEndBy<P, S> {
    item: P,
    separator: S,
    at_least_one: bool,
}

impl<P, S> SepEndBy<P, S> {
    pub fn new(item: P, separator: S, at_least_one: bool) -> Self {
        SepEndBy {
            item,
            separator,
            at_least_one,
        }
    }
}

impl<P, S> Parser for SepEndBy<P, S>
where
    P: Parser,
    S: Parser<Cursor = P::Cursor>,
{
    type Cursor = P::Cursor;
    type Output = Vec<P::Output>;

    fn parse(&self, mut cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let mut results = Vec::new();
        loop {
            match self.item.parse(cursor.clone()) {
                Ok((value, next)) => {
                    results.push(value);
                    cursor = next;
                }
                Err(failure) if failure.consumed_since(&cursor) => return Err(failure),
                Err(failure) if self.at_least_one && results.is_empty() => return Err(failure),
                Err(_) => break,
            }
            match self.separator.parse(cursor.clone()) {
                Ok((_, next)) => cursor = next,
                Err(failure) if failure.consumed_since(&cursor) => return Err(failure),
                Err(_) => break,
            }
        }
        Ok((results, cursor))
    }
}

/// Zero or more separated items, trailing separator allowed
pub fn sep_end_by<P, S>(item: P, separator: S) -> SepEndBy<P, S>
where
    P: Parser,
    S: Parser<Cursor = P::Cursor>,
{
    SepEndBy::new(item, separator, false)
}

/// One or more separated items, trailing separator allowed
pub fn sep_end_by1<P, S>(item: P, separator: S) -> SepEndBy<P, S>
where
    P: Parser,
    S: Parser<Cursor = P::Cursor>,
{
    SepEndBy::new(item, separator, true)
}
