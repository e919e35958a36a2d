use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::parser::Parser;
use crate::position::{IndentLevel, Relation};
use crate::reply::{Failure, Reply};

/// Parser combinator for items repeated at a constrained indentation
///
/// Before each item the space consumer runs and the level of the next token
/// is checked against `reference` with `relation`. The repetition ends,
/// leaving the skipped space unconsumed, at end of input, at a level that
/// violates the relation, or when the item fails without consuming.
#[derive(Clone)]
pub struct IndentedMany<S, I> {
    reference: IndentLevel,
    relation: Relation,
    sc: S,
    item: I,
    at_least_one: bool,
}

impl<S, I> Parser for IndentedMany<S, I>
where
    S: Parser,
    I: Parser<Cursor = S::Cursor>,
{
    type Cursor = S::Cursor;
    type Output = Vec<I::Output>;

    fn parse(&self, mut cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let mut items = Vec::new();
        let stop = loop {
            let (_, line) = self.sc.parse(cursor.clone())?;
            let actual = IndentLevel::of(line.position());

            if line.is_end() {
                break match self.item.parse(line.clone()) {
                    Err(failure) => failure,
                    Ok(_) => self.violation(line, actual),
                };
            }
            if !self.relation.satisfies(self.reference, actual) {
                break self.violation(line, actual);
            }

            match self.item.parse(line.clone()) {
                Ok((value, next)) => {
                    items.push(value);
                    cursor = next;
                }
                Err(failure) if failure.consumed_since(&line) => return Err(failure),
                Err(failure) => break failure,
            }
        };

        if self.at_least_one && items.is_empty() {
            return Err(stop);
        }
        Ok((items, cursor))
    }
}

impl<S, I> IndentedMany<S, I>
where
    S: Parser,
{
    fn violation(&self, line: S::Cursor, actual: IndentLevel) -> Failure<S::Cursor> {
        let error = ParseError::indentation(line.position(), self.relation, self.reference, actual);
        Failure::new(error, line)
    }
}

/// Zero or more items, each at a level satisfying `relation` against `reference`
pub fn indented_many<S, I>(
    reference: IndentLevel,
    relation: Relation,
    sc: S,
    item: I,
) -> IndentedMany<S, I>
where
    S: Parser,
    I: Parser<Cursor = S::Cursor>,
{
    IndentedMany {
        reference,
        relation,
        sc,
        item,
        at_least_one: false,
    }
}

/// One or more items, each at a level satisfying `relation` against `reference`
pub fn indented_many1<S, I>(
    reference: IndentLevel,
    relation: Relation,
    sc: S,
    item: I,
) -> IndentedMany<S, I>
where
    S: Parser,
    I: Parser<Cursor = S::Cursor>,
{
    IndentedMany {
        reference,
        relation,
        sc,
        item,
        at_least_one: true,
    }
}
