//! Signature extraction with per-term memoization

use graspit_domain::relation::is_informative;
use graspit_domain::{detect_definiteness, LexicalSource, Signature, SymbolSet};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Builds semantic signatures for terms by querying the lexical source,
/// memoizing each term for the rest of the session.
///
/// The memo cache is private to the extractor instance, so independent
/// classifiers (and tests) never contaminate each other. Signatures are
/// treated as stable for a session: a cached term is never refetched.
/// Cache writes are serialized behind the lock; when two callers race on
/// the same uncached term, the first insert wins and both observe the same
/// signature.
pub struct SignatureExtractor<L: LexicalSource> {
    source: L,
    max_hyperonyms: usize,
    cache: Mutex<HashMap<String, Arc<Signature>>>,
}

impl<L: LexicalSource> SignatureExtractor<L> {
    /// Create an extractor over a lexical source.
    ///
    /// `max_hyperonyms` bounds the H block to the top-N hyperonyms by
    /// descending associative weight.
    pub fn new(source: L, max_hyperonyms: usize) -> Self {
        Self {
            source,
            max_hyperonyms,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying lexical source
    pub fn source(&self) -> &L {
        &self.source
    }

    /// Number of terms currently memoized
    pub fn cached_terms(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    /// Extract the signature of a term, memoized per term.
    ///
    /// On a cache miss this issues the three logical reads against the
    /// lexical source (hyperonyms, semantic types, relation types present)
    /// and may block on network or disk I/O inside the source.
    pub fn extract(&self, term: &str) -> Arc<Signature> {
        if let Some(sig) = self.cache.lock().unwrap().get(term) {
            return Arc::clone(sig);
        }

        // Build outside the lock: the source reads may block, and distinct
        // terms must be extractable in parallel.
        let mut sig = Signature::new();

        let hyperonyms = self.source.hyperonyms(term);
        if !hyperonyms.is_empty() {
            let mut ranked: Vec<(String, f64)> = hyperonyms
                .into_iter()
                .filter(|(_, weight)| *weight > 0.0)
                .collect();
            // Weight ties resolved by name so the top-N cut is deterministic
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            sig.hyperonyms = ranked
                .into_iter()
                .take(self.max_hyperonyms)
                .map(|(name, _)| name)
                .collect();
        }

        sig.sst = self.source.semantic_types(term);
        sig.trt = self
            .source
            .relation_types_present(term)
            .into_iter()
            .filter(|id| is_informative(*id))
            .map(|id| id.to_string())
            .collect();

        let mut cache = self.cache.lock().unwrap();
        Arc::clone(
            cache
                .entry(term.to_string())
                .or_insert_with(|| Arc::new(sig)),
        )
    }

    /// Extract both terms of a pair as symbol sets.
    ///
    /// The right-hand set additionally receives the definiteness token
    /// derived from the raw complement text - but only when the complement
    /// is known to the lexical source: a term with empty blocks yields an
    /// empty symbol set, so callers can treat an empty-empty pair as
    /// "unknown, skip". The definiteness token depends on the surface text
    /// of this pair and is therefore never memoized with the signature.
    pub fn extract_pair(&self, a: &str, b: &str) -> (SymbolSet, SymbolSet) {
        let sig_a = self.extract(a);
        let sig_b = self.extract(b);

        let set_a = sig_a.to_symbol_set();
        let mut set_b = sig_b.to_symbol_set();
        if !set_b.is_empty() {
            set_b.insert(detect_definiteness(b).token().to_string());
        }

        (set_a, set_b)
    }
}
