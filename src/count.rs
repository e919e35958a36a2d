use crate::parser::Parser;
use crate::reply::Reply;

/// Parser combinator that runs a parser exactly `n` times
///
/// `count(p, 0)` succeeds with an empty vector without running `p`.
#[derive(Clone)]
pub struct Count<P> {
    parser: P,
    times: usize,
}

impl<P> Count<P> {
    pub fn new(parser: P, times: usize) -> Self {
        Count { parser, times }
    }
}

impl<P: Parser> Parser for Count<P> {
    type Cursor = P::Cursor;
    type Output = Vec<P::Output>;

    fn parse(&self, mut cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let mut results = Vec::with_capacity(self.times);
        for _ in 0..self.times {
            let (value, next) = self.parser.parse(cursor)?;
            results.push(value);
            cursor = next;
        }
        Ok((results, cursor))
    }
}

/// Convenience function to create a Count parser
pub fn count<P: Parser>(parser: P, times: usize) -> Count<P> {
    Count::new(parser, times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::cursors::StrCursor;
    use crate::text::digit;

    #[test]
    fn test_count_exact() {
        let (digits, cursor) = count(digit(), 3).parse(StrCursor::new("12345")).unwrap();
        assert_eq!(digits, vec!['1', '2', '3']);
        assert_eq!(cursor.current(), Some('4'));
    }

    #[test]
    fn test_count_zero() {
        let start = StrCursor::new("abc");
        let (digits, cursor) = count(digit(), 0).parse(start).unwrap();
        assert!(digits.is_empty());
        assert_eq!(cursor, start);
    }

    #[test]
    fn test_count_too_few() {
        let start = StrCursor::new("12x");
        let failure = count(digit(), 3).parse(start).unwrap_err();
        assert!(failure.consumed_since(&start));
        assert_eq!(failure.cursor.current(), Some('x'));
    }
}
