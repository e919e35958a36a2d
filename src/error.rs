use crate::position::{IndentLevel, Position, Relation};
use std::borrow::Cow;
use std::fmt;
use std::io;

/// Something a parser saw or wanted to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<T> {
    Token(T),
    Label(Cow<'static, str>),
    EndOfInput,
}

impl<T> Item<T> {
    pub fn label(label: impl Into<Cow<'static, str>>) -> Self {
        Item::Label(label.into())
    }
}

impl<T: fmt::Debug> fmt::Display for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Token(token) => write!(f, "{:?}", token),
            Item::Label(label) => f.write_str(label),
            Item::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Free-form error content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fancy {
    Message(Cow<'static, str>),
    Indentation {
        relation: Relation,
        reference: IndentLevel,
        actual: IndentLevel,
    },
}

impl fmt::Display for Fancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fancy::Message(message) => f.write_str(message),
            Fancy::Indentation {
                relation,
                reference,
                actual,
            } => write!(
                f,
                "incorrect indentation (got {}, should be {} {})",
                actual, relation, reference
            ),
        }
    }
}

/// A parse error positioned in the input
///
/// `Standard` errors come from token-level primitives and list what was found
/// and what would have been accepted. `Custom` errors carry free-form content:
/// explicit failure messages, rejected assertions and indentation violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError<T> {
    Standard {
        position: Position,
        unexpected: Vec<Item<T>>,
        expected: Vec<Item<T>>,
    },
    Custom {
        position: Position,
        items: Vec<Fancy>,
    },
}

impl<T: PartialEq> ParseError<T> {
    pub fn standard(position: Position, unexpected: Item<T>, expected: Item<T>) -> Self {
        ParseError::Standard {
            position,
            unexpected: vec![unexpected],
            expected: vec![expected],
        }
    }

    pub fn custom(position: Position, item: Fancy) -> Self {
        ParseError::Custom {
            position,
            items: vec![item],
        }
    }

    pub fn message(position: Position, message: impl Into<Cow<'static, str>>) -> Self {
        Self::custom(position, Fancy::Message(message.into()))
    }

    pub fn indentation(
        position: Position,
        relation: Relation,
        reference: IndentLevel,
        actual: IndentLevel,
    ) -> Self {
        Self::custom(
            position,
            Fancy::Indentation {
                relation,
                reference,
                actual,
            },
        )
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::Standard { position, .. } | ParseError::Custom { position, .. } => {
                *position
            }
        }
    }

    /// Combine errors from competing alternatives
    ///
    /// The error that got further into the input wins. At the same offset two
    /// errors of one kind are unioned without duplicates; a custom error takes
    /// precedence over a standard one.
    pub fn merge(self, other: ParseError<T>) -> ParseError<T> {
        let (left, right) = (self.position().offset, other.position().offset);
        if left > right {
            return self;
        }
        if right > left {
            return other;
        }

        match (self, other) {
            (
                ParseError::Standard {
                    position,
                    unexpected,
                    expected,
                },
                ParseError::Standard {
                    unexpected: more_unexpected,
                    expected: more_expected,
                    ..
                },
            ) => ParseError::Standard {
                position,
                unexpected: union(unexpected, more_unexpected),
                expected: union(expected, more_expected),
            },
            (
                ParseError::Custom { position, items },
                ParseError::Custom {
                    items: more_items, ..
                },
            ) => ParseError::Custom {
                position,
                items: union(items, more_items),
            },
            (custom @ ParseError::Custom { .. }, ParseError::Standard { .. })
            | (ParseError::Standard { .. }, custom @ ParseError::Custom { .. }) => custom,
        }
    }

    /// Replace what the error says was expected with `label`
    ///
    /// A standard error keeps what it found and expects only `label`. A custom
    /// error is replaced by the single message `label`.
    pub fn relabel(self, label: impl Into<Cow<'static, str>>) -> ParseError<T> {
        match self {
            ParseError::Standard {
                position,
                unexpected,
                ..
            } => ParseError::Standard {
                position,
                unexpected,
                expected: vec![Item::Label(label.into())],
            },
            ParseError::Custom { position, .. } => ParseError::message(position, label),
        }
    }
}

impl<T> ParseError<T> {
    pub fn unexpected(&self) -> &[Item<T>] {
        match self {
            ParseError::Standard { unexpected, .. } => unexpected,
            ParseError::Custom { .. } => &[],
        }
    }

    pub fn expected(&self) -> &[Item<T>] {
        match self {
            ParseError::Standard { expected, .. } => expected,
            ParseError::Custom { .. } => &[],
        }
    }

    pub fn items(&self) -> &[Fancy] {
        match self {
            ParseError::Standard { .. } => &[],
            ParseError::Custom { items, .. } => items,
        }
    }

    /// The first indentation violation carried by this error
    pub fn indentation_violation(&self) -> Option<(Relation, IndentLevel, IndentLevel)> {
        self.items().iter().find_map(|item| match item {
            Fancy::Indentation {
                relation,
                reference,
                actual,
            } => Some((*relation, *reference, *actual)),
            Fancy::Message(_) => None,
        })
    }
}

fn union<I: PartialEq>(mut into: Vec<I>, from: Vec<I>) -> Vec<I> {
    for item in from {
        if !into.contains(&item) {
            into.push(item);
        }
    }
    into
}

fn write_alternatives<I: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[I]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" or ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl<T: fmt::Debug> fmt::Display for ParseError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = match self {
            ParseError::Standard { position, .. } | ParseError::Custom { position, .. } => {
                position
            }
        };
        writeln!(f, "(line {}, column {}):", position.line, position.column)?;

        match self {
            ParseError::Custom { items, .. } => {
                for item in items {
                    writeln!(f, "{}", item)?;
                }
            }
            ParseError::Standard {
                unexpected,
                expected,
                ..
            } => {
                if !unexpected.is_empty() {
                    f.write_str("unexpected ")?;
                    write_alternatives(f, unexpected)?;
                    writeln!(f)?;
                }
                if !expected.is_empty() {
                    f.write_str("expected ")?;
                    write_alternatives(f, expected)?;
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

impl<T: fmt::Debug> std::error::Error for ParseError<T> {}

/// Errors raised while setting up an input source
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read input stream: {0}")]
    Io(#[from] io::Error),
    #[error("stream window must hold at least {min} bytes, got {got}")]
    WindowTooSmall { min: usize, got: usize },
}
