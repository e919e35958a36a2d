use crate::parser::Parser;
use crate::reply::Reply;
use once_cell::sync::OnceCell;
use tracing::trace;

/// A parser that defers the construction of the actual parser until parse time.
///
/// This is what breaks the cycle in recursive grammars: a rule can refer to
/// itself through `indirect(rule)` without building an infinitely large
/// parser. The supplier runs once, on first use, and the built parser is
/// cached for every later parse, including from other threads.
///
/// Left recursion is not detected; a rule that calls itself before consuming
/// input recurses until the stack overflows.
pub struct Indirect<F, P> {
    supplier: F,
    parser: OnceCell<P>,
}

impl<F, P> Indirect<F, P>
where
    F: Fn() -> P,
    P: Parser,
{
    /// Create a new indirect parser with the given supplier function
    pub fn new(supplier: F) -> Self {
        Self {
            supplier,
            parser: OnceCell::new(),
        }
    }

    fn get(&self) -> &P {
        self.parser.get_or_init(|| {
            trace!(
                parser = std::any::type_name::<P>(),
                "building indirect parser"
            );
            (self.supplier)()
        })
    }
}

impl<F, P> Parser for Indirect<F, P>
where
    F: Fn() -> P,
    P: Parser,
{
    type Cursor = P::Cursor;
    type Output = P::Output;

    fn parse(&self, cursor: Self::Cursor) -> Reply<Self::Cursor, Self::Output> {
        self.get().parse(cursor)
    }
}

/// Create an indirect parser from a supplier function
pub fn indirect<F, P>(supplier: F) -> Indirect<F, P>
where
    F: Fn() -> P,
    P: Parser,
{
    Indirect::new(supplier)
}
