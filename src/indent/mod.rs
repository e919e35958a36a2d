//! Indentation-sensitive parsing.
//!
//! The indentation of a line is the column of its first token. These
//! combinators read the column after running a space consumer `sc` and
//! compare it against a reference level, which is how layout languages
//! decide where a block ends or whether a line continues the previous one.
//!
//! The space consumer must skip newlines as well as spaces, since most of
//! these combinators look at the first token of the *next* line.

pub mod block;
pub mod guard;
pub mod level;
pub mod line_fold;
pub mod many;
pub mod optional;

pub use block::{BlockMany, block_many, block_many1};
pub use guard::{Guard, NonIndented, guard, non_indented};
pub use level::{IndentLevel, Level, Relation, level};
pub use line_fold::{LineFold, line_fold};
pub use many::{IndentedMany, indented_many, indented_many1};
pub use optional::{IndentedOptional, indented_optional};
