use crate::parser::Parser;
use crate::reply::Reply;

/// Parser combinator that matches content between opening and closing delimiters
///
/// Runs the three parsers in order and keeps only the content. Whitespace is
/// not skipped automatically.
#[derive(Clone)]
pub struct Between<O, P, C> {
    open: O,
    content: P,
    close: C,
}

impl<O, P, C> Between<O, P, C> {
    pub fn new(open: O, content: P, close: C) -> Self {
        Between {
            open,
            content,
            close,
        }
    }
}

impl<O, P, C> Parser for Between<O, P, C>
where
    O: Parser,
    P: Parser<Cursor = O::Cursor>,
    C: Parser<Cursor = O::Cursor>,
{
    type Cursor = O::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (_, cursor) = self.open.parse(cursor)?;
        let (value, cursor) = self.content.parse(cursor)?;
        let (_, cursor) = self.close.parse(cursor)?;
        Ok((value, cursor))
    }
}

/// Convenience function to create a Between parser
pub fn between<O, P, C>(open: O, content: P, close: C) -> Between<O, P, C>
where
    O: Parser,
    P: Parser<Cursor = O::Cursor>,
    C: Parser<Cursor = O::Cursor>,
{
    Between::new(open, content, close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::cursors::StrCursor;
    use crate::separated::sep_by;
    use crate::text::{is_char, is_string, natural};

    #[test]
    fn test_between_parentheses() {
        let parser = between(is_char('('), natural(), is_char(')'));
        let (value, cursor) = parser.parse(StrCursor::new("(42)x")).unwrap();
        assert_eq!(value, 42);
        assert_eq!(cursor.current(), Some('x'));
    }

    #[test]
    fn test_between_list() {
        let parser = between(is_char('['), sep_by(natural(), is_char(',')), is_char(']'));
        let (values, cursor) = parser.parse(StrCursor::new("[1,2,3]")).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
        assert!(cursor.is_end());

        let (empty, _) = parser.parse(StrCursor::new("[]")).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_between_string_delimiters() {
        let parser = between(is_string("{{"), natural(), is_string("}}"));
        let (value, _) = parser.parse(StrCursor::new("{{7}}")).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_between_missing_close() {
        let start = StrCursor::new("(42");
        let failure = between(is_char('('), natural(), is_char(')'))
            .parse(start)
            .unwrap_err();
        assert!(failure.consumed_since(&start));
        assert!(failure.cursor.is_end());
    }

    #[test]
    fn test_between_missing_open() {
        let start = StrCursor::new("42)");
        let failure = between(is_char('('), natural(), is_char(')'))
            .parse(start)
            .unwrap_err();
        assert!(!failure.consumed_since(&start));
    }
}
