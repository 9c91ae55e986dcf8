//! Per-triple context membership, with the default-membership compression.
//!
//! Every triple belongs to a set of contexts, each flagged quoted or not.
//! Most triples share one membership (the first one ever recorded for an
//! asserted triple, typically `{None: asserted}`), so that baseline is kept
//! once as `default_contexts` and triples whose membership equals it by value
//! carry no explicit entry at all.
//!
//! `Membership` values are never mutated in place: `with` and `without`
//! return new values, which are then compared against the baseline before
//! being written back.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::core::{ContextKey, EncodedTriple};

/// Immutable mapping `ContextKey -> quoted`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Membership(BTreeMap<ContextKey, bool>);

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of `self` with `context` set to `quoted`. An asserted membership
    /// also asserts the triple in the default context.
    pub fn with(&self, context: ContextKey, quoted: bool) -> Self {
        let mut entries = self.0.clone();
        entries.insert(context, quoted);
        if !quoted {
            entries.insert(None, false);
        }
        Membership(entries)
    }

    /// Copy of `self` without `context`.
    pub fn without(&self, context: ContextKey) -> Self {
        let mut entries = self.0.clone();
        entries.remove(&context);
        Membership(entries)
    }

    pub fn contains(&self, context: ContextKey) -> bool {
        self.0.contains_key(&context)
    }

    pub fn is_quoted(&self, context: ContextKey) -> Option<bool> {
        self.0.get(&context).copied()
    }

    /// Context keys, optionally restricted to asserted (non-quoted) entries.
    pub fn contexts(&self, skip_quoted: bool) -> impl Iterator<Item = ContextKey> + '_ {
        self.0.iter().filter(move |(_, quoted)| !skip_quoted || !**quoted).map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ContextKey, bool)> for Membership {
    fn from_iter<I: IntoIterator<Item = (ContextKey, bool)>>(iter: I) -> Self {
        Membership(iter.into_iter().collect())
    }
}

#[derive(Debug)]
pub struct ContextTracker {
    triple_contexts: HashMap<EncodedTriple, Membership>,
    default_contexts: Option<Membership>,
    context_triples: HashMap<ContextKey, HashSet<EncodedTriple>>,
    empty: Membership,
}

impl ContextTracker {
    pub fn new() -> Self {
        let mut context_triples = HashMap::new();
        context_triples.insert(None, HashSet::new());
        ContextTracker {
            triple_contexts: HashMap::new(),
            default_contexts: None,
            context_triples,
            empty: Membership::new(),
        }
    }

    /// Resolved membership of `triple`: its explicit entry, else the default
    /// baseline, else empty if no baseline was established yet.
    pub fn membership_of(&self, triple: &EncodedTriple) -> &Membership {
        self.triple_contexts
            .get(triple)
            .or(self.default_contexts.as_ref())
            .unwrap_or(&self.empty)
    }

    /// Records `triple` in `context`. `fresh` tells whether the triple was
    /// newly indexed, in which case any stale resolved membership is ignored.
    pub fn add_membership(
        &mut self,
        triple: EncodedTriple,
        context: ContextKey,
        quoted: bool,
        fresh: bool,
    ) {
        let membership = if fresh {
            Membership::new().with(context, quoted)
        } else {
            self.membership_of(&triple).with(context, quoted)
        };

        if !quoted {
            self.context_triples.entry(None).or_default().insert(triple);
        }
        self.context_triples.entry(context).or_default().insert(triple);

        if self.default_contexts.is_none() && !quoted {
            log::debug!("default membership established: {:?}", membership);
            self.default_contexts = Some(membership.clone());
        }
        self.store(triple, membership);
    }

    /// Drops `context` from the membership of `triple`.
    pub fn remove_membership(&mut self, triple: EncodedTriple, context: ContextKey) {
        let membership = self.membership_of(&triple).without(context);
        self.store(triple, membership);
        if let Some(members) = self.context_triples.get_mut(&context) {
            members.remove(&triple);
        }
    }

    /// Removes any explicit entry of a triple that left the store.
    pub fn forget(&mut self, triple: &EncodedTriple) {
        self.triple_contexts.remove(triple);
    }

    pub fn contexts_of(&self, triple: &EncodedTriple, skip_quoted: bool) -> Vec<ContextKey> {
        self.membership_of(triple).contexts(skip_quoted).collect()
    }

    pub fn has_context(&self, triple: &EncodedTriple, context: ContextKey) -> bool {
        self.membership_of(triple).contains(context)
    }

    /// Members of `context`, if the context has a triple set.
    pub fn triples_in(&self, context: ContextKey) -> Option<&HashSet<EncodedTriple>> {
        self.context_triples.get(&context)
    }

    pub fn count(&self, context: ContextKey) -> usize {
        self.context_triples.get(&context).map_or(0, HashSet::len)
    }

    /// Drops the triple set of a named context once it is empty. The default
    /// context is never dropped.
    pub fn drop_if_empty(&mut self, context: ContextKey) -> bool {
        if context.is_none() {
            return false;
        }
        if self.context_triples.get(&context).is_some_and(HashSet::is_empty) {
            self.context_triples.remove(&context);
            log::debug!("dropped empty context {:?}", context);
            return true;
        }
        false
    }

    pub fn default_contexts(&self) -> Option<&Membership> {
        self.default_contexts.as_ref()
    }

    /// Number of triples carrying an explicit membership entry.
    pub fn explicit_entries(&self) -> usize {
        self.triple_contexts.len()
    }

    pub fn has_explicit_entry(&self, triple: &EncodedTriple) -> bool {
        self.triple_contexts.contains_key(triple)
    }

    pub fn context_sizes(&self) -> impl Iterator<Item = (ContextKey, usize)> + '_ {
        self.context_triples.iter().map(|(key, set)| (*key, set.len()))
    }

    /// Every `(context, triple)` pair recorded in the reverse map.
    pub fn reverse_entries(&self) -> impl Iterator<Item = (ContextKey, &EncodedTriple)> + '_ {
        self.context_triples.iter().flat_map(|(key, set)| set.iter().map(move |t| (*key, t)))
    }

    /// Triples with an explicit membership entry.
    pub fn explicit_triples(&self) -> impl Iterator<Item = &EncodedTriple> + '_ {
        self.triple_contexts.keys()
    }

    fn store(&mut self, triple: EncodedTriple, membership: Membership) {
        if self.default_contexts.as_ref() == Some(&membership) {
            self.triple_contexts.remove(&triple);
        } else {
            self.triple_contexts.insert(triple, membership);
        }
    }
}

impl Default for ContextTracker {
    fn default() -> Self {
        Self::new()
    }
}
