pub mod context_tracker;
pub mod memory_store;
pub mod util;
pub mod indexing {
    pub mod dictionary;
    pub mod triple_index;
}

use crate::core::{Assertion, Triple, TripleMatch, TriplePattern};
use crate::error::Result;

/// Contract of a context-aware triple store backend.
///
/// `QStore` is the in-memory reference implementation; any other engine
/// plugged in behind the same adapter must give the same answers.
pub trait TripleStore<T> {
    /// Asserts `triple` in `context`, `None` meaning the default context.
    fn add(
        &mut self,
        triple: &Triple<T>,
        context: Option<&T>,
        assertion: Assertion,
    ) -> Result<()>;

    /// Removes the matches of `pattern` from `context`, or from every context
    /// when `context` is `None`.
    fn remove(&mut self, pattern: &TriplePattern<T>, context: Option<&T>) -> usize;

    fn triples(
        &self,
        pattern: &TriplePattern<T>,
        context: Option<&T>,
    ) -> Result<Vec<TripleMatch<T>>>;

    fn contexts(&self, pattern: &TriplePattern<T>) -> Result<Vec<T>>;

    fn count(&self, context: Option<&T>) -> usize;
}
