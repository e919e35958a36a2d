//! # Parsifold - Parser Combinator Library
//!
//! Parsifold provides composable, type-safe parsers over any token stream that
//! implements [`Cursor`], with bounded backtracking, layout-sensitive blocks
//! and permutation parsing. The library emphasizes:
//!
//! - **Predictable backtracking**: alternatives only run when the previous one
//!   failed without consuming input; [`attempt`] opts back into backtracking
//! - **Rich error reporting**: errors carry line, column and offset, and merge
//!   the expectations of every alternative tried at the furthest position
//! - **Composability**: small parsers combine into larger ones using combinators
//! - **Layout**: indentation-aware combinators for offside-rule languages
//!
//! ```
//! use parsifold::prelude::*;
//!
//! let list = between(is_char('['), sep_by(natural(), is_char(',')), is_char(']'));
//! let (values, _) = list.parse(StrCursor::new("[1,2,3]")).unwrap();
//! assert_eq!(values, vec![1, 2, 3]);
//! ```

pub mod and;
pub mod assert;
pub mod attempt;
pub mod between;
pub mod bind;
pub mod boxed;
pub mod count;
pub mod cursor;
pub mod cursors;
pub mod error;
pub mod indent;
pub mod indirect;
pub mod look_ahead;
pub mod many;
pub mod map;
pub mod map_error;
pub mod not;
pub mod optional;
pub mod or;
pub mod parser;
pub mod permutation;
pub mod position;
pub mod primitive;
pub mod reply;
pub mod separated;
pub mod text;
pub mod then;
pub mod traced;

pub use attempt::attempt;
pub use between::between;
pub use boxed::BoxedParser;
pub use cursor::Cursor;
pub use cursors::{SliceCursor, StrCursor, StreamCursor};
pub use error::{Fancy, InputError, Item, ParseError};
pub use parser::Parser;
pub use position::{IndentLevel, Position, Relation, Span, position};
pub use reply::{Failure, Reply, ReplyExt};

/// Traits and constructors for writing grammars with a single import
pub mod prelude {
    pub use crate::and::{AndExt, and};
    pub use crate::assert::{AssertExt, assert};
    pub use crate::attempt::{AttemptExt, attempt};
    pub use crate::between::between;
    pub use crate::bind::{BindExt, bind};
    pub use crate::boxed::{BoxedExt, BoxedParser, boxed};
    pub use crate::count::count;
    pub use crate::cursor::Cursor;
    pub use crate::cursors::{Encoding, SliceCursor, StrCursor, StreamConfig, StreamCursor};
    pub use crate::error::{Fancy, Item, ParseError};
    pub use crate::indent::{
        IndentLevel, Relation, block_many, block_many1, guard, indented_many, indented_many1,
        indented_optional, level, line_fold, non_indented,
    };
    pub use crate::indirect::indirect;
    pub use crate::look_ahead::{LookAheadExt, look_ahead};
    pub use crate::many::{ManyExt, many, many1, skip_many};
    pub use crate::map::{MapExt, map};
    pub use crate::map_error::{MapErrorExt, fail_with, map_error};
    pub use crate::not::{NotExt, not};
    pub use crate::optional::{OptionalExt, optional};
    pub use crate::or::{OrExt, choice, or};
    pub use crate::parser::{Parser, from_fn};
    pub use crate::permutation::{Permutation, Permute};
    pub use crate::position::{Position, Span, SpanExt, position};
    pub use crate::primitive::{any, eof, fail, parser_error, pure, satisfy, token};
    pub use crate::reply::{Failure, Reply, ReplyExt};
    pub use crate::separated::{end_by, end_by1, sep_by, sep_by1, sep_end_by, sep_end_by1};
    pub use crate::text::{
        alphanumeric, digit, identifier, integer, is_char, is_string, inline_spaces, letter,
        natural, newline, none_of, one_of, spaces, whitespace,
    };
    pub use crate::then::{ThenExt, followed_by, then};
    pub use crate::traced::{TracedExt, traced};
}
