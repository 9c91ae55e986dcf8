use std::collections::HashSet;
use std::hash::Hash;

use crate::core::{
    Assertion, ContextKey, EncodedPattern, EncodedTerm, EncodedTriple, Triple, TripleMatch,
    TriplePattern,
};
use crate::error::{Error, Result};
use crate::storage::context_tracker::ContextTracker;
use crate::storage::indexing::dictionary::Dictionary;
use crate::storage::indexing::triple_index::TripleIndex;
use crate::storage::util::{StoreConfig, StoreStats};
use crate::storage::TripleStore;

/// In-memory, context-aware triple store over an opaque term type `T`.
///
/// All operations are synchronous. Reads take `&self` and never mutate any
/// state, so a `RwLock<QStore<T>>` gives concurrent readers with a single
/// writer.
#[derive(Debug)]
pub struct QStore<T> {
    dictionary: Dictionary<T>,
    index: TripleIndex,
    tracker: ContextTracker,
    known_contexts: HashSet<EncodedTerm>,
    config: StoreConfig,
}

impl<T> QStore<T>
where
    T: Eq + Hash + Clone,
{
    pub const CONTEXT_AWARE: bool = true;
    pub const FORMULA_AWARE: bool = false;

    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let dictionary = match config.id_seed {
            Some(seed) => Dictionary::with_seed(seed),
            None => Dictionary::new(),
        };
        Self {
            dictionary,
            index: TripleIndex::new(),
            tracker: ContextTracker::new(),
            known_contexts: HashSet::new(),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn graph_aware(&self) -> bool {
        self.config.graph_aware
    }

    /// Asserts `triple` in `context` (`None` for the default context only).
    ///
    /// Quoted statements are rejected with `UnsupportedOperation` before any
    /// state changes.
    pub fn add(
        &mut self,
        triple: &Triple<T>,
        context: Option<&T>,
        assertion: Assertion,
    ) -> Result<()> {
        if assertion.is_quoted() {
            log::warn!("rejected quoted statement: store is not formula aware");
            return Err(Error::UnsupportedOperation(
                "quoted statements are not supported by this store".to_string(),
            ));
        }

        let encoded = EncodedTriple::new(
            self.dictionary.encode(&triple.subject),
            self.dictionary.encode(&triple.predicate),
            self.dictionary.encode(&triple.object),
        );
        let context = context.map(|c| self.dictionary.encode(c));

        let fresh = self.index.insert(encoded);
        self.tracker.add_membership(encoded, context, false, fresh);
        if let Some(id) = context {
            self.known_contexts.insert(id);
        }
        Ok(())
    }

    /// Every triple matching `pattern` that is present in `context`, with the
    /// named contexts it is asserted in. No duplicates, no particular order.
    pub fn triples(
        &self,
        pattern: &TriplePattern<T>,
        context: Option<&T>,
    ) -> Result<Vec<TripleMatch<T>>> {
        let (Some(context), Some(pattern)) = (self.resolve_context(context), self.lookup(pattern))
        else {
            return Ok(Vec::new());
        };
        self.matching(&pattern, context).iter().map(|t| self.decode_match(t)).collect()
    }

    /// Removes every triple matching `pattern` from `context`, or from all
    /// contexts when `context` is `None`. Returns the number of matched triples.
    pub fn remove(&mut self, pattern: &TriplePattern<T>, context: Option<&T>) -> usize {
        let (Some(requested), Some(encoded)) = (self.resolve_context(context), self.lookup(pattern))
        else {
            return 0;
        };

        let matches = self.matching(&encoded, requested);
        for triple in &matches {
            for cid in self.tracker.contexts_of(triple, false) {
                if requested.is_some() && cid != requested {
                    continue;
                }
                self.tracker.remove_membership(*triple, cid);
            }

            // a triple left only in the implicit default context goes with it
            let asserted = self.tracker.contexts_of(triple, true);
            if asserted.contains(&None) && (requested.is_none() || asserted.len() == 1) {
                self.tracker.remove_membership(*triple, None);
            }

            if self.tracker.membership_of(triple).is_empty() {
                self.index.remove(triple);
                self.tracker.forget(triple);
                log::trace!("triple {:?} left the store", triple);
            }
        }

        self.tracker.drop_if_empty(requested);

        if let Some(id) = requested {
            if encoded.is_wildcard() && !self.config.graph_aware {
                self.known_contexts.remove(&id);
            }
        }
        log::debug!("removed {} matching triples", matches.len());
        matches.len()
    }

    /// Known named contexts for the wildcard pattern; otherwise the distinct
    /// named contexts the matching triples are asserted in.
    pub fn contexts(&self, pattern: &TriplePattern<T>) -> Result<Vec<T>> {
        if pattern.is_wildcard() {
            return self.known_contexts.iter().map(|id| self.decode(*id)).collect();
        }
        let Some(encoded) = self.lookup(pattern) else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let mut contexts = Vec::new();
        for triple in self.index.candidates(&encoded) {
            for id in self.tracker.contexts_of(&triple, true).into_iter().flatten() {
                if seen.insert(id) {
                    contexts.push(self.decode(id)?);
                }
            }
        }
        Ok(contexts)
    }

    /// Number of triples in `context`; `None` counts the default context.
    pub fn count(&self, context: Option<&T>) -> usize {
        self.resolve_context(context).map_or(0, |key| self.tracker.count(key))
    }

    pub fn len(&self) -> usize {
        self.count(None)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers an empty named context. Graph-aware stores only.
    pub fn add_graph(&mut self, graph: &T) -> Result<()> {
        self.require_graph_aware("add_graph")?;
        let id = self.dictionary.encode(graph);
        self.known_contexts.insert(id);
        Ok(())
    }

    /// Removes every triple of `graph` and forgets the context. Graph-aware
    /// stores only; an unknown graph is a no-op.
    pub fn remove_graph(&mut self, graph: &T) -> Result<()> {
        self.require_graph_aware("remove_graph")?;
        self.remove(&TriplePattern::any(), Some(graph));
        if let Some(id) = self.dictionary.lookup(graph) {
            self.known_contexts.remove(&id);
        }
        Ok(())
    }

    pub fn stats(&self) -> StoreStats {
        let triples = self.index.len();
        let explicit = self.tracker.explicit_entries();
        StoreStats {
            terms: self.dictionary.len(),
            triples,
            explicit_memberships: explicit,
            compressed_memberships: triples.saturating_sub(explicit),
            known_contexts: self.known_contexts.len(),
            context_sizes: self.tracker.context_sizes().collect(),
        }
    }

    /// Cross-checks the dictionary, the position indices and the context
    /// maps against each other.
    pub fn check_consistency(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::Inconsistent(msg));

        if !self.dictionary.is_bijective() {
            return fail("dictionary directions disagree".to_string());
        }
        if !self.index.is_consistent() {
            return fail("position indices disagree".to_string());
        }

        let default = self.tracker.default_contexts();
        for triple in self.index.iter() {
            for id in [triple.subject, triple.predicate, triple.object] {
                if !self.dictionary.contains_id(id) {
                    return fail(format!("{:?} uses unencoded term {}", triple, id));
                }
            }
            let membership = self.tracker.membership_of(triple);
            if membership.is_empty() {
                return fail(format!("{:?} is indexed without any context", triple));
            }
            for cid in membership.contexts(false) {
                if !self.tracker.triples_in(cid).is_some_and(|set| set.contains(triple)) {
                    return fail(format!("{:?} missing from context {:?}", triple, cid));
                }
            }
            if membership.contains(None) && membership.is_quoted(None) != Some(false) {
                return fail(format!("{:?} is quoted in the default context", triple));
            }
        }

        for triple in self.tracker.explicit_triples() {
            if !self.index.contains(triple) {
                return fail(format!("{:?} keeps a membership after removal", triple));
            }
            if default.is_some_and(|d| d == self.tracker.membership_of(triple)) {
                return fail(format!("{:?} stores the default membership explicitly", triple));
            }
        }

        for (cid, triple) in self.tracker.reverse_entries() {
            if !self.index.contains(triple) || !self.tracker.has_context(triple, cid) {
                return fail(format!("context {:?} lists stale {:?}", cid, triple));
            }
        }
        Ok(())
    }

    /// `Some(key)` for the default context or a known named one, `None` for
    /// a context term never seen by the dictionary.
    fn resolve_context(&self, context: Option<&T>) -> Option<ContextKey> {
        match context {
            None => Some(None),
            Some(term) => self.dictionary.lookup(term).map(Some),
        }
    }

    /// Encodes the bound positions; `None` if any of them is unknown.
    fn lookup(&self, pattern: &TriplePattern<T>) -> Option<EncodedPattern> {
        let position = |term: &Option<T>| match term {
            None => Some(None),
            Some(term) => self.dictionary.lookup(term).map(Some),
        };
        Some(EncodedPattern {
            subject: position(&pattern.subject)?,
            predicate: position(&pattern.predicate)?,
            object: position(&pattern.object)?,
        })
    }

    fn matching(&self, pattern: &EncodedPattern, context: ContextKey) -> Vec<EncodedTriple> {
        let candidates: Vec<EncodedTriple> = if pattern.is_wildcard() {
            self.tracker
                .triples_in(context)
                .map(|set| set.iter().copied().collect())
                .unwrap_or_default()
        } else {
            self.index.candidates(pattern).into_iter().collect()
        };
        candidates.into_iter().filter(|t| self.tracker.has_context(t, context)).collect()
    }

    fn decode(&self, id: EncodedTerm) -> Result<T> {
        self.dictionary.decode(id).cloned()
    }

    fn decode_match(&self, triple: &EncodedTriple) -> Result<TripleMatch<T>> {
        let contexts = self
            .tracker
            .contexts_of(triple, true)
            .into_iter()
            .flatten()
            .map(|id| self.decode(id))
            .collect::<Result<Vec<T>>>()?;
        Ok(TripleMatch {
            triple: Triple::new(
                self.decode(triple.subject)?,
                self.decode(triple.predicate)?,
                self.decode(triple.object)?,
            ),
            contexts,
        })
    }

    fn require_graph_aware(&self, operation: &str) -> Result<()> {
        if self.config.graph_aware {
            Ok(())
        } else {
            Err(Error::UnsupportedOperation(format!(
                "{} called on a store that is not graph aware",
                operation
            )))
        }
    }
}

impl<T> Default for QStore<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TripleStore<T> for QStore<T>
where
    T: Eq + Hash + Clone,
{
    fn add(
        &mut self,
        triple: &Triple<T>,
        context: Option<&T>,
        assertion: Assertion,
    ) -> Result<()> {
        QStore::add(self, triple, context, assertion)
    }

    fn remove(&mut self, pattern: &TriplePattern<T>, context: Option<&T>) -> usize {
        QStore::remove(self, pattern, context)
    }

    fn triples(
        &self,
        pattern: &TriplePattern<T>,
        context: Option<&T>,
    ) -> Result<Vec<TripleMatch<T>>> {
        QStore::triples(self, pattern, context)
    }

    fn contexts(&self, pattern: &TriplePattern<T>) -> Result<Vec<T>> {
        QStore::contexts(self, pattern)
    }

    fn count(&self, context: Option<&T>) -> usize {
        QStore::count(self, context)
    }
}
