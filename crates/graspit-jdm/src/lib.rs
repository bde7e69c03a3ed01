//! graspit Lexical Network Layer
//!
//! Client implementations of the `LexicalSource` trait from `graspit-domain`.
//!
//! # Architecture
//!
//! The classification core only ever talks to the lexical network through
//! the `LexicalSource` read contract, which is total: any failure inside a
//! source degrades to empty data for the term. This crate provides the two
//! implementations:
//!
//! - `MockLexicon`: deterministic in-memory fixtures for testing
//! - `JdmClient`: the JeuxDeMots REST API, with a two-tier (memory + disk)
//!   cache, request rate limiting and retry with backoff
//!
//! # Examples
//!
//! ```
//! use graspit_jdm::MockLexicon;
//! use graspit_domain::LexicalSource;
//!
//! let mut lexicon = MockLexicon::new();
//! lexicon.add_term("bois", &[("matériau", 120.0)], &["_INFO-SEM:substance"], &[6, 50]);
//!
//! assert!(lexicon.knows("bois"));
//! assert!(lexicon.hyperonyms("inconnu").is_empty());
//! ```

#![warn(missing_docs)]

pub mod client;

use graspit_domain::LexicalSource;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use client::{JdmClient, JdmSettings, PrefetchReport, RelationDocument, DEFAULT_ENDPOINT};

/// Errors that can occur inside the JeuxDeMots client.
///
/// These never cross the `LexicalSource` boundary: the trait implementation
/// degrades every failure to empty data for the affected term.
#[derive(Error, Debug)]
pub enum JdmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Cache directory or cache file I/O error
    #[error("Cache I/O error: {0}")]
    Cache(#[from] std::io::Error),

    /// Async runtime construction failed
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Per-term fixture data for the mock lexicon
#[derive(Debug, Clone, Default)]
struct MockEntry {
    hyperonyms: HashMap<String, f64>,
    semantic_types: HashSet<String>,
    relation_types: HashSet<u32>,
}

/// Mock lexical source for deterministic testing
///
/// Returns pre-configured per-term data without any network access. Terms
/// that were never added behave exactly like terms unknown to the real
/// network: every read returns empty data.
///
/// # Examples
///
/// ```
/// use graspit_jdm::MockLexicon;
/// use graspit_domain::LexicalSource;
///
/// let mut lexicon = MockLexicon::new();
/// lexicon.add_term("désert", &[("étendue", 50.0)], &[], &[6, 15]);
///
/// assert_eq!(lexicon.hyperonyms("désert").len(), 1);
/// assert_eq!(lexicon.read_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockLexicon {
    entries: Arc<Mutex<HashMap<String, MockEntry>>>,
    read_count: Arc<Mutex<usize>>,
}

impl MockLexicon {
    /// Create an empty mock lexicon (every term unknown)
    pub fn new() -> Self {
        Self::default()
    }

    /// Register fixture data for a term
    pub fn add_term(
        &mut self,
        term: impl Into<String>,
        hyperonyms: &[(&str, f64)],
        semantic_types: &[&str],
        relation_types: &[u32],
    ) {
        let entry = MockEntry {
            hyperonyms: hyperonyms
                .iter()
                .map(|(name, w)| (name.to_string(), *w))
                .collect(),
            semantic_types: semantic_types.iter().map(|s| s.to_string()).collect(),
            relation_types: relation_types.iter().copied().collect(),
        };
        self.entries.lock().unwrap().insert(term.into(), entry);
    }

    /// Number of trait reads served so far (all four methods count)
    pub fn read_count(&self) -> usize {
        *self.read_count.lock().unwrap()
    }

    /// Reset the read counter
    pub fn reset_read_count(&self) {
        *self.read_count.lock().unwrap() = 0;
    }

    fn record_read(&self) {
        *self.read_count.lock().unwrap() += 1;
    }
}

impl LexicalSource for MockLexicon {
    fn hyperonyms(&self, term: &str) -> HashMap<String, f64> {
        self.record_read();
        self.entries
            .lock()
            .unwrap()
            .get(term)
            .map(|e| e.hyperonyms.clone())
            .unwrap_or_default()
    }

    fn semantic_types(&self, term: &str) -> HashSet<String> {
        self.record_read();
        self.entries
            .lock()
            .unwrap()
            .get(term)
            .map(|e| e.semantic_types.clone())
            .unwrap_or_default()
    }

    fn relation_types_present(&self, term: &str) -> HashSet<u32> {
        self.record_read();
        self.entries
            .lock()
            .unwrap()
            .get(term)
            .map(|e| e.relation_types.clone())
            .unwrap_or_default()
    }

    fn knows(&self, term: &str) -> bool {
        self.record_read();
        self.entries.lock().unwrap().contains_key(term)
    }
}
