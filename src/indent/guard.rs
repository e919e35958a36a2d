use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::parser::Parser;
use crate::position::{IndentLevel, Relation};
use crate::reply::{Failure, Reply};
use tracing::trace;

/// Fails unless the level at `cursor` relates to `reference` as required
pub(crate) fn check<C: Cursor>(
    cursor: C,
    relation: Relation,
    reference: IndentLevel,
) -> Reply<C, IndentLevel> {
    let position = cursor.position();
    let actual = IndentLevel::of(position);
    if relation.satisfies(reference, actual) {
        return Ok((actual, cursor));
    }

    trace!(
        line = position.line,
        %relation,
        %reference,
        %actual,
        "indentation violation"
    );
    let error = ParseError::indentation(position, relation, reference, actual);
    Err(Failure::new(error, cursor))
}

/// Parser that skips space and then checks the indentation level
///
/// Runs the space consumer, reads the level of the next token and succeeds
/// with it when it satisfies `relation` against `reference`. Otherwise it
/// fails with an indentation error after the skipped space.
#[derive(Clone)]
pub struct Guard<S> {
    sc: S,
    relation: Relation,
    reference: IndentLevel,
}

impl<S> Guard<S> {
    pub fn new(sc: S, relation: Relation, reference: IndentLevel) -> Self {
        Guard {
            sc,
            relation,
            reference,
        }
    }
}

impl<S: Parser> Parser for Guard<S> {
    type Cursor = S::Cursor;
    type Output = IndentLevel;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, IndentLevel> {
        let (_, cursor) = self.sc.parse(cursor)?;
        check(cursor, self.relation, self.reference)
    }
}

pub fn guard<S: Parser>(sc: S, relation: Relation, reference: IndentLevel) -> Guard<S> {
    Guard::new(sc, relation, reference)
}

/// Parser combinator that requires its parser to start in the first column
#[derive(Clone)]
pub struct NonIndented<S, P> {
    guard: Guard<S>,
    parser: P,
}

impl<S, P> Parser for NonIndented<S, P>
where
    S: Parser,
    P: Parser<Cursor = S::Cursor>,
{
    type Cursor = S::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (_, cursor) = self.guard.parse(cursor)?;
        self.parser.parse(cursor)
    }
}

pub fn non_indented<S, P>(sc: S, parser: P) -> NonIndented<S, P>
where
    S: Parser,
    P: Parser<Cursor = S::Cursor>,
{
    NonIndented {
        guard: guard(sc, Relation::Eq, IndentLevel::FIRST),
        parser,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursors::StrCursor;
    use crate::text::{identifier, spaces};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_guard_accepts() {
        let parser = guard(spaces(), Relation::Gt, IndentLevel::FIRST);
        let (actual, cursor) = parser.parse(StrCursor::new("\n  x")).unwrap();
        assert_eq!(actual, IndentLevel::new(3));
        assert_eq!(cursor.current(), Some('x'));
    }

    #[test]
    fn test_guard_rejects() {
        let parser = guard(spaces(), Relation::Eq, IndentLevel::new(5));
        let failure = parser.parse(StrCursor::new("\n  x")).unwrap_err();
        assert_eq!(
            failure.error.indentation_violation(),
            Some((Relation::Eq, IndentLevel::new(5), IndentLevel::new(3)))
        );
        assert_eq!(failure.error.position().line, 2);
        assert_eq!(failure.cursor.current(), Some('x'));
    }

    #[test]
    fn test_guard_any_relation() {
        let parser = guard(spaces(), Relation::Any, IndentLevel::new(40));
        assert!(parser.parse(StrCursor::new("  x")).is_ok());
    }

    #[test]
    fn test_non_indented() {
        let parser = non_indented(spaces(), identifier());
        let (name, _) = parser.parse(StrCursor::new("\ntop")).unwrap();
        assert_eq!(name, "top");

        let failure = parser.parse(StrCursor::new("\n nested")).unwrap_err();
        assert_eq!(
            failure.error.indentation_violation(),
            Some((Relation::Eq, IndentLevel::FIRST, IndentLevel::new(2)))
        );
    }
}
