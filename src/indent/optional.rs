use crate::indent::guard::check;
use crate::parser::Parser;
use crate::position::{IndentLevel, Relation};
use crate::reply::Reply;

/// Parser combinator for an optional item at a constrained indentation
///
/// Like [`optional`](crate::optional::optional), except that an item that
/// parses but starts at a level violating `relation` against `reference` is
/// an indentation error at the item's start rather than a success.
#[derive(Clone)]
pub struct IndentedOptional<P> {
    reference: IndentLevel,
    relation: Relation,
    parser: P,
}

impl<P: Parser> Parser for IndentedOptional<P> {
    type Cursor = P::Cursor;
    type Output = Option<P::Output>;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        match self.parser.parse(cursor.clone()) {
            Ok((value, next)) => {
                check(cursor, self.relation, self.reference)?;
                Ok((Some(value), next))
            }
            Err(failure) if failure.consumed_since(&cursor) => Err(failure),
            Err(_) => Ok((None, cursor)),
        }
    }
}

pub fn indented_optional<P: Parser>(
    reference: IndentLevel,
    relation: Relation,
    parser: P,
) -> IndentedOptional<P> {
    IndentedOptional {
        reference,
        relation,
        parser,
    }
}
