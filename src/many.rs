use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::parser::Parser;
use crate::reply::{Failure, Reply};

/// Runs `parser` until it fails, handing every value to `sink`
///
/// A failure that did not consume input ends the repetition successfully at
/// the cursor before it. A failure after consuming input is returned as is.
fn repeat<P, F>(
    parser: &P,
    mut cursor: P::Cursor,
    require_progress: bool,
    mut sink: F,
) -> Reply<P::Cursor, ()>
where
    P: Parser,
    F: FnMut(P::Output),
{
    loop {
        match parser.parse(cursor.clone()) {
            Ok((value, next)) => {
                if require_progress && next == cursor {
                    let error = ParseError::message(
                        cursor.position(),
                        "repeated parser succeeded without consuming input",
                    );
                    return Err(Failure::new(error, cursor));
                }
                sink(value);
                cursor = next;
            }
            Err(failure) if failure.consumed_since(&cursor) => return Err(failure),
            Err(_) => return Ok(((), cursor)),
        }
    }
}

/// Parser combinator that matches zero or more occurrences of the given parser
///
/// A parser that can succeed without consuming input makes `Many` loop
/// forever. Call [`Many::require_progress`] to turn such an iteration into an
/// error instead.
#[derive(Clone)]
pub struct Many<P> {
    parser: P,
    require_progress: bool,
}

impl<P> Many<P> {
    pub fn new(parser: P) -> Self {
        Many {
            parser,
            require_progress: false,
        }
    }

    /// Fail when an iteration succeeds without consuming input
    pub fn require_progress(self) -> Self {
        Many {
            require_progress: true,
            ..self
        }
    }
}

impl<P: Parser> Parser for Many<P> {
    type Cursor = P::Cursor;
    type Output = Vec<P::Output>;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let mut results = Vec::new();
        let ((), cursor) = repeat(&self.parser, cursor, self.require_progress, |value| {
            results.push(value)
        })?;
        Ok((results, cursor))
    }
}

/// Convenience function to create a Many parser
pub fn many<P: Parser>(parser: P) -> Many<P> {
    Many::new(parser)
}

/// Parser combinator that matches one or more occurrences of the given parser
#[derive(Clone)]
pub struct Many1<P> {
    parser: P,
    require_progress: bool,
}

impl<P> Many1<P> {
    pub fn new(parser: P) -> Self {
        Many1 {
            parser,
            require_progress: false,
        }
    }

    /// Fail when an iteration succeeds without consuming input
    pub fn require_progress(self) -> Self {
        Many1 {
            require_progress: true,
            ..self
        }
    }
}

impl<P: Parser> Parser for Many1<P> {
    type Cursor = P::Cursor;
    type Output = Vec<P::Output>;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let (first, cursor) = self.parser.parse(cursor)?;
        let mut results = vec![first];
        let ((), cursor) = repeat(&self.parser, cursor, self.require_progress, |value| {
            results.push(value)
        })?;
        Ok((results, cursor))
    }
}

/// Convenience function to create a Many1 parser
pub fn many1<P: Parser>(parser: P) -> Many1<P> {
    Many1::new(parser)
}

/// Parser combinator that skips zero or more occurrences of the given parser
#[derive(Clone)]
pub struct SkipMany<P> {
    parser: P,
    require_progress: bool,
}

impl<P> SkipMany<P> {
    pub fn new(parser: P) -> Self {
        SkipMany {
            parser,
            require_progress: false,
        }
    }

    /// Fail when an iteration succeeds without consuming input
    pub fn require_progress(self) -> Self {
        SkipMany {
            require_progress: true,
            ..self
        }
    }
}

impl<P: Parser> Parser for SkipMany<P> {
    type Cursor = P::Cursor;
    type Output = ();

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, ()> {
        repeat(&self.parser, cursor, self.require_progress, drop)
    }
}

/// Convenience function to create a SkipMany parser
pub fn skip_many<P: Parser>(parser: P) -> SkipMany<P> {
    SkipMany::new(parser)
}

/// Extension trait to add repetition methods to parsers
pub trait ManyExt: Parser + Sized {
    fn many(self) -> Many<Self> {
        Many::new(self)
    }

    fn many1(self) -> Many1<Self> {
        Many1::new(self)
    }

    fn skip_many(self) -> SkipMany<Self> {
        SkipMany::new(self)
    }
}

impl<P: Parser> ManyExt for P {}
