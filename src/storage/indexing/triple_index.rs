use std::collections::{HashMap, HashSet};

use crate::core::{EncodedPattern, EncodedTerm, EncodedTriple};

type PositionIndex = HashMap<EncodedTerm, HashSet<EncodedTriple>>;

/// Three parallel position indices: by subject, by predicate and by object.
///
/// A triple is present in all three or in none. There is deliberately no
/// global enumeration; the fully wildcard pattern is answered from the
/// context tracker instead.
#[derive(Debug, Default)]
pub struct TripleIndex {
    by_subject: PositionIndex,
    by_predicate: PositionIndex,
    by_object: PositionIndex,
}

impl TripleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `triple` to the three indices. Returns `true` if it was not
    /// indexed before.
    pub fn insert(&mut self, triple: EncodedTriple) -> bool {
        let fresh = self.by_subject.entry(triple.subject).or_default().insert(triple);
        self.by_predicate.entry(triple.predicate).or_default().insert(triple);
        self.by_object.entry(triple.object).or_default().insert(triple);
        fresh
    }

    /// Removes `triple` from the three indices, dropping emptied sets.
    /// Removing an absent triple is a no-op; returns whether it was present.
    pub fn remove(&mut self, triple: &EncodedTriple) -> bool {
        let present = remove_from(&mut self.by_subject, triple.subject, triple);
        remove_from(&mut self.by_predicate, triple.predicate, triple);
        remove_from(&mut self.by_object, triple.object, triple);
        present
    }

    pub fn contains(&self, triple: &EncodedTriple) -> bool {
        self.by_subject.get(&triple.subject).is_some_and(|set| set.contains(triple))
    }

    /// Triples matching a pattern with at least one bound position.
    ///
    /// The fully wildcard pattern yields an empty set. A bound position
    /// missing from its index short-circuits to empty.
    pub fn candidates(&self, pattern: &EncodedPattern) -> HashSet<EncodedTriple> {
        if let Some(triple) = pattern.as_triple() {
            return if self.contains(&triple) { HashSet::from([triple]) } else { HashSet::new() };
        }

        let mut sets: Vec<&HashSet<EncodedTriple>> = Vec::with_capacity(2);
        let positions = [
            (pattern.subject, &self.by_subject),
            (pattern.predicate, &self.by_predicate),
            (pattern.object, &self.by_object),
        ];
        for (bound, index) in positions {
            if let Some(id) = bound {
                match index.get(&id) {
                    Some(set) => sets.push(set),
                    None => return HashSet::new(),
                }
            }
        }

        // intersect starting from the smallest set
        sets.sort_by_key(|set| set.len());
        let Some((smallest, rest)) = sets.split_first() else {
            debug_assert!(pattern.is_wildcard());
            return HashSet::new();
        };
        smallest
            .iter()
            .filter(|triple| rest.iter().all(|set| set.contains(*triple)))
            .copied()
            .collect()
    }

    /// Number of distinct indexed triples.
    pub fn len(&self) -> usize {
        self.by_subject.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_subject.is_empty()
    }

    /// Every indexed triple, read from the subject index.
    pub fn iter(&self) -> impl Iterator<Item = &EncodedTriple> {
        self.by_subject.values().flatten()
    }

    /// True when the predicate and object indices hold exactly the triples
    /// of the subject index, each under its own key, with no empty sets.
    pub fn is_consistent(&self) -> bool {
        let check = |index: &PositionIndex, key: fn(&EncodedTriple) -> EncodedTerm| {
            index.iter().all(|(id, set)| !set.is_empty() && set.iter().all(|t| key(t) == *id))
        };
        let total = self.len();
        check(&self.by_subject, |t| t.subject)
            && check(&self.by_predicate, |t| t.predicate)
            && check(&self.by_object, |t| t.object)
            && self.by_predicate.values().map(HashSet::len).sum::<usize>() == total
            && self.by_object.values().map(HashSet::len).sum::<usize>() == total
            && self.iter().all(|t| {
                self.by_predicate.get(&t.predicate).is_some_and(|set| set.contains(t))
                    && self.by_object.get(&t.object).is_some_and(|set| set.contains(t))
            })
    }
}

fn remove_from(index: &mut PositionIndex, key: EncodedTerm, triple: &EncodedTriple) -> bool {
    let Some(set) = index.get_mut(&key) else {
        return false;
    };
    let removed = set.remove(triple);
    if set.is_empty() {
        index.remove(&key);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: u64, p: u64, o: u64) -> EncodedTriple {
        EncodedTriple::new(EncodedTerm(s), EncodedTerm(p), EncodedTerm(o))
    }

    fn pattern(s: Option<u64>, p: Option<u64>, o: Option<u64>) -> EncodedPattern {
        EncodedPattern {
            subject: s.map(EncodedTerm),
            predicate: p.map(EncodedTerm),
            object: o.map(EncodedTerm),
        }
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut index = TripleIndex::new();
        assert!(index.insert(t(1, 2, 3)));
        assert!(!index.insert(t(1, 2, 3)));
        assert_eq!(index.len(), 1);
        assert!(index.is_consistent());
    }

    #[test]
    fn test_remove_drops_empty_sets() {
        let mut index = TripleIndex::new();
        index.insert(t(1, 2, 3));
        assert!(index.remove(&t(1, 2, 3)));
        assert!(!index.remove(&t(1, 2, 3)));
        assert!(index.is_empty());
        assert!(index.candidates(&pattern(None, Some(2), None)).is_empty());
        assert!(index.is_consistent());
    }

    #[test]
    fn test_candidates_intersection() {
        let mut index = TripleIndex::new();
        index.insert(t(1, 10, 100));
        index.insert(t(1, 11, 101));
        index.insert(t(2, 10, 102));

        let hits = index.candidates(&pattern(Some(1), Some(10), None));
        assert_eq!(hits, HashSet::from([t(1, 10, 100)]));

        let hits = index.candidates(&pattern(None, Some(10), None));
        assert_eq!(hits, HashSet::from([t(1, 10, 100), t(2, 10, 102)]));

        let hits = index.candidates(&pattern(Some(2), None, Some(101)));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_candidates_fully_bound() {
        let mut index = TripleIndex::new();
        index.insert(t(1, 2, 3));
        assert_eq!(index.candidates(&pattern(Some(1), Some(2), Some(3))).len(), 1);
        assert!(index.candidates(&pattern(Some(1), Some(2), Some(4))).is_empty());
    }

    #[test]
    fn test_unknown_position_short_circuits() {
        let mut index = TripleIndex::new();
        index.insert(t(1, 2, 3));
        assert!(index.candidates(&pattern(Some(1), Some(99), None)).is_empty());
        assert!(index.candidates(&EncodedPattern::default()).is_empty());
    }
}
