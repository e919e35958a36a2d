use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::parser::Parser;
use crate::position::{IndentLevel, Relation};
use crate::reply::{Failure, Reply};
use tracing::trace;

/// Parser combinator for a header followed by an indented block of items
///
/// After skipping space, the level R of the header's first token becomes the
/// reference. Items follow on lines indented deeper than R, every one at the
/// level of the first item. The block ends before the first line at level R
/// or less, or at end of input; the space skipped to reach that line is left
/// unconsumed for the enclosing parser. An item at a level above R that is
/// not the block's level is an indentation error.
pub struct BlockMany<S, H, I, F> {
    sc: S,
    head: H,
    item: I,
    combine: F,
    at_least_one: bool,
}

impl<S, H, I, F> Clone for BlockMany<S, H, I, F>
where
    S: Clone,
    H: Clone,
    I: Clone,
    F: Clone,
{
    fn clone(&self) -> Self {
        BlockMany {
            sc: self.sc.clone(),
            head: self.head.clone(),
            item: self.item.clone(),
            combine: self.combine.clone(),
            at_least_one: self.at_least_one,
        }
    }
}

impl<S, H, I, F, O> Parser for BlockMany<S, H, I, F>
where
    S: Parser,
    H: Parser<Cursor = S::Cursor>,
    I: Parser<Cursor = S::Cursor>,
    F: Fn(H::Output, Vec<I::Output>) -> O,
{
    type Cursor = S::Cursor;
    type Output = O;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, O> {
        let (_, cursor) = self.sc.parse(cursor)?;
        let reference = IndentLevel::of(cursor.position());
        let (header, mut cursor) = self.head.parse(cursor)?;

        let mut items = Vec::new();
        let mut required: Option<IndentLevel> = None;
        loop {
            let (_, line) = self.sc.parse(cursor.clone())?;
            let actual = IndentLevel::of(line.position());
            if line.is_end() || actual <= reference {
                if self.at_least_one && items.is_empty() {
                    return Err(self.missing_item(line, reference, actual));
                }
                break;
            }

            let level = *required.get_or_insert(actual);
            if actual != level {
                trace!(
                    line = line.position().line,
                    %level,
                    %actual,
                    "block item at wrong indentation"
                );
                let error = ParseError::indentation(line.position(), Relation::Eq, level, actual);
                return Err(Failure::new(error, line));
            }

            let (value, next) = self.item.parse(line)?;
            items.push(value);
            cursor = next;
        }

        Ok(((self.combine)(header, items), cursor))
    }
}

impl<S, H, I, F> BlockMany<S, H, I, F>
where
    S: Parser,
    I: Parser<Cursor = S::Cursor>,
{
    fn missing_item(
        &self,
        line: S::Cursor,
        reference: IndentLevel,
        actual: IndentLevel,
    ) -> Failure<S::Cursor> {
        if line.is_end() {
            if let Err(failure) = self.item.parse(line.clone()) {
                return failure;
            }
        }
        let error = ParseError::indentation(line.position(), Relation::Gt, reference, actual);
        Failure::new(error, line)
    }
}

/// A header followed by zero or more indented items
pub fn block_many<S, H, I, F, O>(sc: S, head: H, item: I, combine: F) -> BlockMany<S, H, I, F>
where
    S: Parser,
    H: Parser<Cursor = S::Cursor>,
    I: Parser<Cursor = S::Cursor>,
    F: Fn(H::Output, Vec<I::Output>) -> O,
{
    BlockMany {
        sc,
        head,
        item,
        combine,
        at_least_one: false,
    }
}

/// A header followed by one or more indented items
pub fn block_many1<S, H, I, F, O>(sc: S, head: H, item: I, combine: F) -> BlockMany<S, H, I, F>
where
    S: Parser,
    H: Parser<Cursor = S::Cursor>,
    I: Parser<Cursor = S::Cursor>,
    F: Fn(H::Output, Vec<I::Output>) -> O,
{
    BlockMany {
        sc,
        head,
        item,
        combine,
        at_least_one: true,
    }
}
