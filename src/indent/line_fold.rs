use crate::attempt::{Attempt, attempt};
use crate::cursor::Cursor;
use crate::indent::guard::{Guard, guard};
use crate::parser::Parser;
use crate::position::{IndentLevel, Relation};
use crate::reply::Reply;

/// Parser combinator for a logical line that may continue on indented lines
///
/// Skips space, records the level L of the first token and builds the body
/// from `body(fold)`. `fold` is a space consumer that only succeeds when the
/// token after the skipped space sits at a level greater than L; on failure it
/// backtracks, so the body stops cleanly at the first line that is not a
/// continuation.
pub struct LineFold<S, F> {
    sc: S,
    body: F,
}

impl<S: Clone, F: Clone> Clone for LineFold<S, F> {
    fn clone(&self) -> Self {
        LineFold {
            sc: self.sc.clone(),
            body: self.body.clone(),
        }
    }
}

impl<S, F, Q> Parser for LineFold<S, F>
where
    S: Parser + Clone,
    F: Fn(Attempt<Guard<S>>) -> Q,
    Q: Parser<Cursor = S::Cursor>,
{
    type Cursor = S::Cursor;
    type Output = Q::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (_, cursor) = self.sc.parse(cursor)?;
        let reference = IndentLevel::of(cursor.position());
        let fold = attempt(guard(self.sc.clone(), Relation::Gt, reference));
        (self.body)(fold).parse(cursor)
    }
}

pub fn line_fold<S, F, Q>(sc: S, body: F) -> LineFold<S, F>
where
    S: Parser + Clone,
    F: Fn(Attempt<Guard<S>>) -> Q,
    Q: Parser<Cursor = S::Cursor>,
{
    LineFold { sc, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursors::StrCursor;
    use crate::many::many;
    use crate::text::{identifier, is_char, spaces};
    use crate::then::ThenExt;
    use pretty_assertions::assert_eq;

    fn words<'a>() -> impl Parser<Cursor = StrCursor<'a>, Output = Vec<String>> {
        line_fold(spaces(), |fold| {
            identifier()
                .followed_by(is_char('='))
                .then(many(fold.then(identifier())))
        })
    }

    #[test]
    fn test_line_fold_continues_on_indented_line() {
        let (parsed, cursor) = words().parse(StrCursor::new("x= a b\n   c\n  d")).unwrap();
        assert_eq!(parsed, vec!["a", "b", "c", "d"]);
        assert!(cursor.is_end());
    }

    #[test]
    fn test_line_fold_stops_at_unindented_line() {
        let (parsed, cursor) = words().parse(StrCursor::new("x= a\ny= b")).unwrap();
        assert_eq!(parsed, vec!["a"]);
        assert_eq!(cursor.rest(), "\ny= b");
    }

    #[test]
    fn test_line_fold_reference_is_first_token() {
        let (parsed, cursor) = words().parse(StrCursor::new("\n  x= a\n  b")).unwrap();
        assert_eq!(parsed, vec!["a"]);
        assert_eq!(cursor.rest(), "\n  b");
    }
}
