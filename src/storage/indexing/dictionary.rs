use std::collections::HashMap;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::EncodedTerm;
use crate::error::{Error, Result};

/// Bidirectional mapping between opaque terms and random `EncodedTerm` ids.
///
/// Ids are allocated on first `encode` and live as long as the dictionary.
/// `term_to_id` and `id_to_term` are always mutual inverses.
#[derive(Debug)]
pub struct Dictionary<T> {
    term_to_id: HashMap<T, EncodedTerm>,
    id_to_term: HashMap<EncodedTerm, T>,
    rng: StdRng,
}

impl<T> Dictionary<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Dictionary whose id sequence is reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Dictionary { term_to_id: HashMap::new(), id_to_term: HashMap::new(), rng }
    }

    /// Returns the id of `term`, allocating a fresh one if it is unknown.
    pub fn encode(&mut self, term: &T) -> EncodedTerm {
        if let Some(&id) = self.term_to_id.get(term) {
            return id;
        }
        let mut id = EncodedTerm(self.rng.random());
        while self.id_to_term.contains_key(&id) {
            log::trace!("id collision on {}, redrawing", id);
            id = EncodedTerm(self.rng.random());
        }
        self.term_to_id.insert(term.clone(), id);
        self.id_to_term.insert(id, term.clone());
        id
    }

    /// Read-only counterpart of `encode`: never allocates.
    pub fn lookup(&self, term: &T) -> Option<EncodedTerm> {
        self.term_to_id.get(term).copied()
    }

    pub fn decode(&self, id: EncodedTerm) -> Result<&T> {
        self.id_to_term.get(&id).ok_or_else(|| {
            log::error!("decode of unknown identifier {}", id);
            Error::UnknownIdentifier(id)
        })
    }

    pub fn contains_id(&self, id: EncodedTerm) -> bool {
        self.id_to_term.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.term_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_to_id.is_empty()
    }

    /// Checks that both directions agree entry for entry.
    pub fn is_bijective(&self) -> bool {
        self.term_to_id.len() == self.id_to_term.len()
            && self
                .term_to_id
                .iter()
                .all(|(term, id)| self.id_to_term.get(id).is_some_and(|back| back == term))
    }
}

impl<T> Default for Dictionary<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
