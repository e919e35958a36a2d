//! Parsing a set of items that may appear in any order.
//!
//! A [`Permutation`] is built up one slot at a time. Each slot is a parser and
//! a `combine` function folding its value into an accumulator, starting from
//! a seed. However the input orders the items, the combine functions run in
//! the order the slots were added, so the result does not depend on the input
//! order.
//!
//! ```
//! use parsifold::cursors::StrCursor;
//! use parsifold::parser::Parser;
//! use parsifold::permutation::Permutation;
//! use parsifold::text::is_char;
//!
//! let flags = Permutation::new(String::new())
//!     .add(is_char('a'), |mut acc: String, c| { acc.push(c); acc })
//!     .add_optional(is_char('b'), '-', |mut acc: String, c| { acc.push(c); acc })
//!     .add(is_char('c'), |mut acc: String, c| { acc.push(c); acc })
//!     .build();
//!
//! assert_eq!(flags.parse(StrCursor::new("cba")).unwrap().0, "abc");
//! assert_eq!(flags.parse(StrCursor::new("ca")).unwrap().0, "a-c");
//! ```

use crate::boxed::{BoxedExt, BoxedParser};
use crate::cursor::Cursor;
use crate::map::map;
use crate::parser::Parser;
use crate::reply::{Failure, Reply};
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

type Value = Box<dyn Any + Send>;
type DefaultFn<'a> = Arc<dyn Fn() -> Value + Send + Sync + 'a>;
type Assemble<'a, T> = Arc<dyn Fn(&mut [Option<Value>]) -> T + Send + Sync + 'a>;

struct Slot<'a, C> {
    parser: BoxedParser<'a, C, Value>,
    default: Option<DefaultFn<'a>>,
}

/// One choice in the tree of orderings: parse `slot`, then continue in `rest`
#[derive(Debug, Clone)]
struct Branch {
    slot: usize,
    rest: Vec<Branch>,
}

/// Adds slot `slot` to every ordering of an existing tree
///
/// The new slot may come first, followed by any old ordering, or it may be
/// spliced in after any prefix of an old ordering.
fn splice(slot: usize, tree: Vec<Branch>) -> Vec<Branch> {
    let mut spliced = Vec::with_capacity(tree.len() + 1);
    spliced.push(Branch {
        slot,
        rest: tree.clone(),
    });
    spliced.extend(tree.into_iter().map(|branch| Branch {
        slot: branch.slot,
        rest: splice(slot, branch.rest),
    }));
    spliced
}

fn count(tree: &[Branch]) -> usize {
    tree.iter().map(|branch| 1 + count(&branch.rest)).sum()
}

fn box_value<O: Any + Send>(value: O) -> Value {
    Box::new(value)
}

/// Builder for a permutation parser
///
/// The tree of orderings grows factorially with the number of slots, which
/// keeps this practical for the handful of items permutations usually cover.
pub struct Permutation<'a, C, T> {
    slots: Vec<Slot<'a, C>>,
    tree: Vec<Branch>,
    assemble: Assemble<'a, T>,
}

impl<'a, C, T> Permutation<'a, C, T>
where
    C: Cursor + 'a,
    T: 'a,
{
    /// Start an empty permutation whose accumulator starts at `seed`
    pub fn new(seed: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Permutation {
            slots: Vec::new(),
            tree: Vec::new(),
            assemble: Arc::new(move |_: &mut [Option<Value>]| seed.clone()),
        }
    }

    /// Add a slot that must appear exactly once
    pub fn add<P, F, U>(self, parser: P, combine: F) -> Permutation<'a, C, U>
    where
        P: Parser<Cursor = C> + Send + Sync + 'a,
        P::Output: Send + 'static,
        F: Fn(T, P::Output) -> U + Send + Sync + 'a,
        U: 'a,
    {
        self.push(parser, None, combine)
    }

    /// Add a slot that may be missing, in which case `default` is used
    ///
    /// The parser must not succeed without consuming input; such a success
    /// would fill the slot on every attempt to match it.
    pub fn add_optional<P, F, U>(
        self,
        parser: P,
        default: P::Output,
        combine: F,
    ) -> Permutation<'a, C, U>
    where
        P: Parser<Cursor = C> + Send + Sync + 'a,
        P::Output: Clone + Send + Sync + 'static,
        F: Fn(T, P::Output) -> U + Send + Sync + 'a,
        U: 'a,
    {
        let default: DefaultFn<'a> = Arc::new(move || box_value(default.clone()));
        self.push(parser, Some(default), combine)
    }

    fn push<P, F, U>(
        self,
        parser: P,
        default: Option<DefaultFn<'a>>,
        combine: F,
    ) -> Permutation<'a, C, U>
    where
        P: Parser<Cursor = C> + Send + Sync + 'a,
        P::Output: Send + 'static,
        F: Fn(T, P::Output) -> U + Send + Sync + 'a,
        U: 'a,
    {
        let Permutation {
            mut slots,
            tree,
            assemble,
        } = self;

        let index = slots.len();
        slots.push(Slot {
            parser: map(parser, box_value::<P::Output>).boxed(),
            default,
        });

        let assemble: Assemble<'a, U> = Arc::new(move |values: &mut [Option<Value>]| {
            let accumulated = assemble(&mut *values);
            let Some(value) = values[index].take() else {
                unreachable!("permutation slot {index} was never filled");
            };
            let Ok(value) = value.downcast::<P::Output>() else {
                unreachable!("permutation slot {index} holds a value of the wrong type");
            };
            combine(accumulated, *value)
        });

        Permutation {
            slots,
            tree: splice(index, tree),
            assemble,
        }
    }

    /// Finish the permutation into a parser
    pub fn build(self) -> Permute<'a, C, T> {
        debug!(
            slots = self.slots.len(),
            branches = count(&self.tree),
            "built permutation parser"
        );
        Permute {
            slots: Arc::new(self.slots),
            tree: Arc::new(self.tree),
            assemble: self.assemble,
        }
    }
}

/// Parser that matches every slot of a [`Permutation`] once, in any order
///
/// At each step the remaining slots are tried in turn. A slot that fails
/// after consuming input fails the whole parse. When no remaining slot
/// matches, the parse ends if every unmatched slot has a default, and fails
/// with the merged errors of the remaining slots otherwise.
pub struct Permute<'a, C, T> {
    slots: Arc<Vec<Slot<'a, C>>>,
    tree: Arc<Vec<Branch>>,
    assemble: Assemble<'a, T>,
}

impl<C, T> Clone for Permute<'_, C, T> {
    fn clone(&self) -> Self {
        Permute {
            slots: Arc::clone(&self.slots),
            tree: Arc::clone(&self.tree),
            assemble: Arc::clone(&self.assemble),
        }
    }
}

impl<'a, C: Cursor, T> Permute<'a, C, T> {
    /// Try every branch at `cursor`, returning the first that matches
    fn step<'t>(
        &self,
        branches: &'t [Branch],
        cursor: &C,
    ) -> Result<(&'t Branch, Value, C), Failure<C>> {
        let mut failed: Option<Failure<C>> = None;
        for branch in branches {
            match self.slots[branch.slot].parser.parse(cursor.clone()) {
                Ok((value, next)) => return Ok((branch, value, next)),
                Err(failure) if failure.consumed_since(cursor) => return Err(failure),
                Err(failure) => {
                    failed = Some(match failed {
                        Some(previous) => previous.merge(failure),
                        None => failure,
                    });
                }
            }
        }
        match failed {
            Some(failure) => Err(failure),
            None => unreachable!("permutation step over an empty set of branches"),
        }
    }
}

impl<'a, C: Cursor, T> Parser for Permute<'a, C, T> {
    type Cursor = C;
    type Output = T;

    fn parse(&self, mut cursor: C) -> Reply<C, T> {
        let mut values: Vec<Option<Value>> = self.slots.iter().map(|_| None).collect();
        let mut branches: &[Branch] = &self.tree;

        while !branches.is_empty() {
            match self.step(branches, &cursor) {
                Ok((branch, value, next)) => {
                    values[branch.slot] = Some(value);
                    branches = &branch.rest;
                    cursor = next;
                }
                Err(failure) if failure.consumed_since(&cursor) => return Err(failure),
                Err(failure) => {
                    let unfilled = self.slots.iter().zip(values.iter_mut());
                    for (slot, value) in unfilled.filter(|(_, value)| value.is_none()) {
                        match &slot.default {
                            Some(default) => *value = Some(default()),
                            None => return Err(failure),
                        }
                    }
                    break;
                }
            }
        }

        Ok(((self.assemble)(&mut values[..]), cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursors::StrCursor;
    use crate::error::Item;
    use crate::text::{is_char, is_string, natural, one_of};
    use crate::then::ThenExt;
    use pretty_assertions::assert_eq;

    fn push(mut acc: String, c: char) -> String {
        acc.push(c);
        acc
    }

    fn abc<'a>() -> Permute<'a, StrCursor<'a>, String> {
        Permutation::new(String::new())
            .add(is_char('a'), push)
            .add_optional(is_char('b'), 'd', push)
            .add(is_char('c'), push)
            .build()
    }

    #[test]
    fn test_splice_builds_every_ordering() {
        let tree = splice(2, splice(1, splice(0, Vec::new())));
        assert_eq!(tree.len(), 3);
        assert_eq!(count(&tree), 3 + 6 + 6);
    }

    #[test]
    fn test_permutation_in_registration_order() {
        let (value, cursor) = abc().parse(StrCursor::new("abc")).unwrap();
        assert_eq!(value, "abc");
        assert!(cursor.is_end());
    }

    #[test]
    fn test_permutation_reordered() {
        let (value, _) = abc().parse(StrCursor::new("bca")).unwrap();
        assert_eq!(value, "abc");
    }

    #[test]
    fn test_permutation_default_fills_missing_optional() {
        let (value, cursor) = abc().parse(StrCursor::new("ca!")).unwrap();
        assert_eq!(value, "adc");
        assert_eq!(cursor.rest(), "!");
    }

    #[test]
    fn test_permutation_missing_required() {
        let start = StrCursor::new("ba");
        let failure = abc().parse(start).unwrap_err();
        assert_eq!(failure.error.position().offset, 2);
        assert_eq!(failure.error.expected(), &[Item::label("'c'")]);
    }

    #[test]
    fn test_permutation_each_slot_once() {
        let (value, cursor) = abc().parse(StrCursor::new("acac")).unwrap();
        assert_eq!(value, "adc");
        assert_eq!(cursor.rest(), "ac");
    }

    #[test]
    fn test_permutation_consuming_failure_aborts() {
        let options = Permutation::new((0u64, false))
            .add(is_string("-n").then(natural()), |(_, verbose), n| (n, verbose))
            .add_optional(is_string("-v"), "".into(), |(n, _), _| (n, true))
            .build();

        let (parsed, _) = options.parse(StrCursor::new("-v-n4")).unwrap();
        assert_eq!(parsed, (4, true));

        let start = StrCursor::new("-v-nx");
        let failure = options.parse(start).unwrap_err();
        assert!(failure.consumed_since(&start));
        assert_eq!(failure.cursor.rest(), "x");
    }

    #[test]
    fn test_permutation_mixed_value_types() {
        #[derive(Debug, PartialEq, Clone, Default)]
        struct Config {
            width: u64,
            sign: char,
        }

        let parser = Permutation::new(Config::default())
            .add(is_char('w').then(natural()), |config, width| Config { width, ..config })
            .add_optional(one_of("+-"), ' ', |config, sign| Config { sign, ..config })
            .build();

        let (config, _) = parser.parse(StrCursor::new("-w80")).unwrap();
        assert_eq!(config, Config { width: 80, sign: '-' });
        let (config, _) = parser.parse(StrCursor::new("w3")).unwrap();
        assert_eq!(config, Config { width: 3, sign: ' ' });
    }

    #[test]
    fn test_permute_is_reusable_and_shareable() {
        let parser = abc();
        let copy = parser.clone();
        std::thread::scope(|scope| {
            scope.spawn(|| assert_eq!(parser.parse(StrCursor::new("cab")).unwrap().0, "abc"));
            scope.spawn(|| assert_eq!(copy.parse(StrCursor::new("ac")).unwrap().0, "adc"));
        });
    }
}
