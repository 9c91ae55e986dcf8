use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::ContextKey;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Keep named contexts known after their last triple is removed, and
    /// allow registering empty ones with `add_graph`.
    pub graph_aware: bool,
    /// Seed for identifier allocation. `None` seeds from OS entropy.
    pub id_seed: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { graph_aware: true, id_seed: None }
    }
}

impl StoreConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: StoreConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }
}

/// Store bookkeeping breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Distinct encoded terms, including context names
    pub terms: usize,
    /// Triples present in the position indices
    pub triples: usize,
    /// Triples carrying an explicit membership entry
    pub explicit_memberships: usize,
    /// Triples relying on the shared default membership
    pub compressed_memberships: usize,
    /// Known named contexts
    pub known_contexts: usize,
    /// Triple count per context; the default context is keyed `None`
    pub context_sizes: HashMap<ContextKey, usize>,
}

impl StoreStats {
    /// Share of triples stored without an explicit membership entry.
    #[allow(clippy::cast_precision_loss)]
    pub fn compression_ratio(&self) -> f64 {
        if self.triples == 0 {
            0.0
        } else {
            self.compressed_memberships as f64 / self.triples as f64
        }
    }
}
