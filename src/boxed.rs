use crate::parser::Parser;
use std::sync::Arc;

/// A type-erased, cheaply clonable parser
///
/// Erasing the concrete type lets recursive grammars name their own parser
/// type and lets parsers of different shapes sit side by side in one
/// collection. The parser must be `Send + Sync` so grammars can be shared
/// between threads. `'a` bounds whatever the parser borrows, usually
/// `'static` or the lifetime of the input of a borrowing cursor.
pub type BoxedParser<'a, C, O> = Arc<dyn Parser<Cursor = C, Output = O> + Send + Sync + 'a>;

/// Extension trait to add .boxed() method support for parsers
pub trait BoxedExt: Parser + Sized + Send + Sync {
    fn boxed<'a>(self) -> BoxedParser<'a, Self::Cursor, Self::Output>
    where
        Self: 'a,
    {
        Arc::new(self)
    }
}

impl<P: Parser + Send + Sync> BoxedExt for P {}

/// Convenience function to erase a parser's type
pub fn boxed<'a, P>(parser: P) -> BoxedParser<'a, P::Cursor, P::Output>
where
    P: Parser + Send + Sync + 'a,
{
    Arc::new(parser)
}
