//! Core data structures and types for the QStore triple store

use std::fmt;

/// Compact identifier standing in for a term inside the indices.
/// Drawn at random from the full u64 space by the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedTerm(pub u64);

impl fmt::Display for EncodedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}

/// `None` is the unnamed default context, `Some(id)` a named one.
pub type ContextKey = Option<EncodedTerm>;

/// Internal triple with encoded IDs, the primary key of every index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedTriple {
    pub subject: EncodedTerm,
    pub predicate: EncodedTerm,
    pub object: EncodedTerm,
}

impl EncodedTriple {
    pub fn new(subject: EncodedTerm, predicate: EncodedTerm, object: EncodedTerm) -> Self {
        Self { subject, predicate, object }
    }
}

/// User-facing triple of opaque terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple<T> {
    pub subject: T,
    pub predicate: T,
    pub object: T,
}

impl<T> Triple<T> {
    pub fn new(subject: T, predicate: T, object: T) -> Self {
        Self { subject, predicate, object }
    }
}

impl<T> From<(T, T, T)> for Triple<T> {
    fn from((subject, predicate, object): (T, T, T)) -> Self {
        Self { subject, predicate, object }
    }
}

/// Triple pattern where `None` positions are wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern<T> {
    pub subject: Option<T>,
    pub predicate: Option<T>,
    pub object: Option<T>,
}

impl<T> TriplePattern<T> {
    pub fn new(subject: Option<T>, predicate: Option<T>, object: Option<T>) -> Self {
        Self { subject, predicate, object }
    }

    /// The `(None, None, None)` pattern.
    pub fn any() -> Self {
        Self { subject: None, predicate: None, object: None }
    }

    pub fn is_wildcard(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }
}

impl<T> Default for TriplePattern<T> {
    fn default() -> Self {
        Self::any()
    }
}

impl<T> From<Triple<T>> for TriplePattern<T> {
    fn from(triple: Triple<T>) -> Self {
        Self {
            subject: Some(triple.subject),
            predicate: Some(triple.predicate),
            object: Some(triple.object),
        }
    }
}

impl<T> From<(Option<T>, Option<T>, Option<T>)> for TriplePattern<T> {
    fn from((subject, predicate, object): (Option<T>, Option<T>, Option<T>)) -> Self {
        Self { subject, predicate, object }
    }
}

/// Pattern over encoded terms, as handed to the triple index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodedPattern {
    pub subject: Option<EncodedTerm>,
    pub predicate: Option<EncodedTerm>,
    pub object: Option<EncodedTerm>,
}

impl EncodedPattern {
    pub fn is_wildcard(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }

    /// Returns the triple when every position is bound.
    pub fn as_triple(&self) -> Option<EncodedTriple> {
        Some(EncodedTriple::new(self.subject?, self.predicate?, self.object?))
    }
}

impl From<EncodedTriple> for EncodedPattern {
    fn from(triple: EncodedTriple) -> Self {
        Self {
            subject: Some(triple.subject),
            predicate: Some(triple.predicate),
            object: Some(triple.object),
        }
    }
}

/// One answer of a pattern query: the decoded triple and the named contexts
/// it is asserted in (quoted memberships and the default context excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripleMatch<T> {
    pub triple: Triple<T>,
    pub contexts: Vec<T>,
}

/// Whether a statement is asserted or only quoted (formula membership).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Assertion {
    #[default]
    Asserted,
    Quoted,
}

impl Assertion {
    pub fn is_quoted(self) -> bool {
        matches!(self, Assertion::Quoted)
    }
}

impl From<bool> for Assertion {
    fn from(quoted: bool) -> Self {
        if quoted {
            Assertion::Quoted
        } else {
            Assertion::Asserted
        }
    }
}

impl From<Assertion> for bool {
    fn from(value: Assertion) -> Self {
        value.is_quoted()
    }
}
