//! Semantic signature - the symbolic feature set characterizing a term

use std::collections::HashSet;

/// A flat set of namespaced feature tokens, the currency of all similarity
/// computations.
pub type SymbolSet = HashSet<String>;

/// Semantic signature of a single term, composed of three disjoint blocks of
/// symbolic features drawn from the lexical network.
///
/// Signatures are immutable once built: the extractor constructs them from
/// lexical-network reads and memoizes them for the rest of the session.
/// The definiteness marker of a pair's right-hand term is *not* part of a
/// signature - it depends on the raw surface text of the pair, so it is
/// injected into the projected symbol set at pair-extraction time and must
/// never be cached keyed by term alone.
///
/// # Examples
///
/// ```
/// use graspit_domain::Signature;
///
/// let sig = Signature {
///     hyperonyms: ["matériau".to_string()].into_iter().collect(),
///     trt: ["6".to_string()].into_iter().collect(),
///     sst: ["_INFO-SEM:substance".to_string()].into_iter().collect(),
/// };
///
/// let symbols = sig.to_symbol_set();
/// assert!(symbols.contains("H:matériau"));
/// assert!(symbols.contains("TRT:6"));
/// assert!(symbols.contains("SST:_INFO-SEM:substance"));
/// assert_eq!(sig.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Names of generalization terms, bounded to the top-N by associative
    /// weight at extraction time
    pub hyperonyms: HashSet<String>,

    /// Identifiers of the relation types the term participates in,
    /// restricted to the informative allow-list
    pub trt: HashSet<String>,

    /// Names of the standardized semantic-type tags attached to the term
    pub sst: HashSet<String>,
}

impl Signature {
    /// Create an empty signature (a term unknown to the lexical source)
    pub fn new() -> Self {
        Self::default()
    }

    /// Project the three blocks into a single set of namespaced tokens.
    ///
    /// Tokens are prefixed `H:`, `TRT:` and `SST:` so features from
    /// different blocks can never collide in the flat set.
    pub fn to_symbol_set(&self) -> SymbolSet {
        let mut symbols =
            HashSet::with_capacity(self.hyperonyms.len() + self.trt.len() + self.sst.len());
        for h in &self.hyperonyms {
            symbols.insert(format!("H:{}", h));
        }
        for t in &self.trt {
            symbols.insert(format!("TRT:{}", t));
        }
        for s in &self.sst {
            symbols.insert(format!("SST:{}", s));
        }
        symbols
    }

    /// Total feature count across the three blocks
    pub fn len(&self) -> usize {
        self.hyperonyms.len() + self.trt.len() + self.sst.len()
    }

    /// True when every block is empty (the lexical source has no data for
    /// the term)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
