//! # QStore
//!
//! QStore is an in-memory, context-aware store for RDF-style statements.
//!
//! Statements are `(subject, predicate, object)` triples over an opaque term
//! type, each asserted in one or more contexts (named graphs) and always
//! visible in the unnamed default context. Terms are dictionary-encoded to
//! random 64-bit identifiers; the encoded triples are indexed by subject,
//! predicate and object so partial patterns are answered by set
//! intersection. Triples whose context membership equals the store-wide
//! baseline carry no per-triple bookkeeping at all.
//!
//! ## Features
//!
//! - Exact and partial pattern queries, scoped to a context or not
//! - Cascading removal across contexts
//! - Graph-aware tracking of empty named contexts
//! - N-Triples / N-Quads loading through oxigraph
//!
//! ## Example
//!
//! ```rust
//! use qstore::{Assertion, QStore, Triple, TriplePattern};
//!
//! fn example() -> qstore::Result<()> {
//!     let mut store: QStore<&str> = QStore::new();
//!     let triple = Triple::new("ex:alice", "ex:knows", "ex:bob");
//!     store.add(&triple, Some(&"ex:graph1"), Assertion::Asserted)?;
//!
//!     let hits = store.triples(&TriplePattern::new(Some("ex:alice"), None, None), None)?;
//!     assert_eq!(hits.len(), 1);
//!     assert_eq!(hits[0].contexts, vec!["ex:graph1"]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::new_without_default)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::fn_params_excessive_bools)]

/// Core data structures and types
pub mod core;

/// Module for parsing RDF documents into a store
pub mod parsing;

pub mod storage;

pub mod error {
    //! Error types and result definitions

    use crate::core::EncodedTerm;
    use thiserror::Error;

    /// Result type alias for QStore operations
    pub type Result<T> = std::result::Result<T, Error>;

    /// Main error type for QStore
    #[derive(Error, Debug)]
    pub enum Error {
        /// Operation the store does not implement, such as quoted assertions
        #[error("Unsupported operation: {0}")]
        UnsupportedOperation(String),

        /// Decode of an identifier that was never encoded
        #[error("Unknown identifier: {0}")]
        UnknownIdentifier(EncodedTerm),

        /// Index or context bookkeeping disagree with each other
        #[error("Inconsistent store: {0}")]
        Inconsistent(String),

        /// Configuration error
        #[error("Configuration error: {0}")]
        Config(String),

        /// RDF parse error
        #[error("Parse error: {0}")]
        Parse(String),

        /// Configuration file could not be decoded
        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),

        /// IO error
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }
}

// Re-export commonly used types
pub use crate::core::{
    Assertion, ContextKey, EncodedTerm, EncodedTriple, Triple, TripleMatch, TriplePattern,
};
pub use error::{Error, Result};
pub use storage::memory_store::QStore;
pub use storage::util::{StoreConfig, StoreStats};
pub use storage::TripleStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedOperation("quoted graphs".to_string());
        assert_eq!(format!("{}", err), "Unsupported operation: quoted graphs");

        let err = Error::UnknownIdentifier(EncodedTerm(255));
        assert_eq!(format!("{}", err), "Unknown identifier: #00000000000000ff");
    }
}
