use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::reply::Reply;
use std::fmt;
use std::marker::PhantomData;

/// Location of a token in the input
///
/// `line` and `column` are 1-based. `offset` counts tokens from the start of
/// the input, or bytes for stream-backed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    /// Position of the first token of any input
    pub const START: Position = Position {
        line: 1,
        column: 1,
        offset: 0,
    };

    pub const DEFAULT_TAB_WIDTH: usize = 4;

    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }

    /// Position after consuming `ch`
    ///
    /// A newline starts the next line at column 1. A tab moves to the next
    /// multiple of `tab_width`, plus one. Everything else is one column wide.
    pub fn next_char(self, ch: char, tab_width: usize) -> Self {
        match ch {
            '\n' => Position {
                line: self.line + 1,
                column: 1,
                offset: self.offset + 1,
            },
            '\t' => Position {
                column: tab_stop(self.column, tab_width),
                offset: self.offset + 1,
                ..self
            },
            _ => self.next_column(),
        }
    }

    /// Position one column to the right
    pub fn next_column(self) -> Self {
        Position {
            column: self.column + 1,
            offset: self.offset + 1,
            ..self
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

fn tab_stop(column: usize, tab_width: usize) -> usize {
    if tab_width == 0 {
        return column + 1;
    }
    ((column - 1) / tab_width + 1) * tab_width + 1
}

/// Caller-supplied rule for moving a position past one token
pub type PositionFn<T> = fn(Position, &T) -> Position;

/// Indentation of a line: the 1-based column of its first token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndentLevel(usize);

impl IndentLevel {
    /// Level of a token in the first column
    pub const FIRST: IndentLevel = IndentLevel(1);

    pub fn new(column: usize) -> Self {
        IndentLevel(column)
    }

    pub fn of(position: Position) -> Self {
        IndentLevel(position.column)
    }

    pub fn column(self) -> usize {
        self.0
    }
}

impl fmt::Display for IndentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an actual indentation level must relate to a reference level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Eq,
    Ge,
    Gt,
    Any,
}

impl Relation {
    pub fn satisfies(self, reference: IndentLevel, actual: IndentLevel) -> bool {
        match self {
            Relation::Eq => actual == reference,
            Relation::Ge => actual >= reference,
            Relation::Gt => actual > reference,
            Relation::Any => true,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Relation::Eq => "equal to",
            Relation::Ge => "greater than or equal to",
            Relation::Gt => "greater than",
            Relation::Any => "anything",
        };
        f.write_str(text)
    }
}

/// Start and end position of a successful parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Position of the first consumed token
    pub start: Position,
    /// Position just past the last consumed token
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Number of offset units covered by the span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

/// Parser that returns the current position without consuming input
pub struct CurrentPosition<C> {
    _cursor: PhantomData<fn() -> C>,
}

impl<C> Clone for CurrentPosition<C> {
    fn clone(&self) -> Self {
        position()
    }
}

impl<C: Cursor> Parser for CurrentPosition<C> {
    type Cursor = C;
    type Output = Position;

    fn parse(&self, cursor: C) -> Reply<C, Position> {
        Ok((cursor.position(), cursor))
    }
}

/// Convenience function to create a CurrentPosition parser
pub fn position<C>() -> CurrentPosition<C> {
    CurrentPosition {
        _cursor: PhantomData,
    }
}

/// A parser combinator that captures the span of a successful parse
#[derive(Clone)]
pub struct WithSpan<P> {
    parser: P,
}

impl<P> WithSpan<P> {
    pub fn new(parser: P) -> Self {
        WithSpan { parser }
    }
}

impl<P: Parser> Parser for WithSpan<P> {
    type Cursor = P::Cursor;
    type Output = (P::Output, Span);

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        let start = cursor.position();
        let (output, next) = self.parser.parse(cursor)?;
        let span = Span::new(start, next.position());
        Ok(((output, span), next))
    }
}

/// Extension trait to add span tracking to any parser
pub trait SpanExt: Parser + Sized {
    /// Wrap this parser to capture its span
    fn with_span(self) -> WithSpan<Self> {
        WithSpan::new(self)
    }
}

impl<P: Parser> SpanExt for P {}
