use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::reply::Reply;
use std::borrow::Cow;
use tracing::trace;

/// Parser combinator that reports its progress through `tracing`
///
/// Emits a trace event when the parser is entered, when it succeeds and when
/// it fails, tagged with `name` and the line and column involved. The parse
/// result is passed through untouched.
#[derive(Clone)]
pub struct Traced<P> {
    parser: P,
    name: Cow<'static, str>,
}

impl<P> Traced<P> {
    pub fn new(parser: P, name: impl Into<Cow<'static, str>>) -> Self {
        Traced {
            parser,
            name: name.into(),
        }
    }
}

impl<P: Parser> Parser for Traced<P> {
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let start = cursor.position();
        trace!(
            parser = %self.name,
            line = start.line,
            column = start.column,
            "enter"
        );

        let reply = self.parser.parse(cursor);
        match &reply {
            Ok((_, next)) => trace!(
                parser = %self.name,
                consumed = next.offset() - start.offset,
                "success"
            ),
            Err(failure) => trace!(
                parser = %self.name,
                line = failure.error.position().line,
                column = failure.error.position().column,
                consumed = failure.cursor.offset() != start.offset,
                "failure"
            ),
        }
        reply
    }
}

/// Convenience function to create a Traced parser
pub fn traced<P: Parser>(parser: P, name: impl Into<Cow<'static, str>>) -> Traced<P> {
    Traced::new(parser, name)
}

/// Extension trait to add .traced() method support for parsers
pub trait TracedExt: Parser + Sized {
    fn traced(self, name: impl Into<Cow<'static, str>>) -> Traced<Self> {
        Traced::new(self, name)
    }
}

impl<P: Parser> TracedExt for P {}
