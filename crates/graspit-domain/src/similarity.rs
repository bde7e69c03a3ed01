//! Set-cosine similarity over symbol sets
//!
//! Similarity treats a symbol set as a binary indicator vector over the
//! feature space. Both forms are pure functions returning a value in [0, 1]
//! and degrade to 0.0 on empty operands or empty intersections - there is no
//! vacuous full match between two unknown terms.

use crate::signature::SymbolSet;
use std::collections::HashMap;

/// Cosine similarity between two symbol sets.
///
/// `|A ∩ B| / (sqrt(|A|) * sqrt(|B|))`, which is the cosine of the angle
/// between the two binary indicator vectors.
///
/// Returns 0.0 when either set is empty or the intersection is empty.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use graspit_domain::cosine;
///
/// let a: HashSet<String> = ["H:meuble", "TRT:6"].iter().map(|s| s.to_string()).collect();
/// let b: HashSet<String> = ["H:meuble", "TRT:50"].iter().map(|s| s.to_string()).collect();
///
/// let sim = cosine(&a, &b);
/// assert!((sim - 0.5).abs() < 1e-12); // 1 shared / (sqrt(2) * sqrt(2))
/// assert_eq!(cosine(&a, &HashSet::new()), 0.0);
/// ```
pub fn cosine(a: &SymbolSet, b: &SymbolSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    if shared == 0 {
        return 0.0;
    }
    shared as f64 / ((a.len() as f64).sqrt() * (b.len() as f64).sqrt())
}

/// Per-feature weights for the weighted similarity form.
///
/// Features absent from the table weigh 1.0, so an empty table makes
/// [`weighted_cosine`] coincide exactly with [`cosine`].
#[derive(Debug, Clone, Default)]
pub struct FeatureWeights {
    weights: HashMap<String, f64>,
}

impl FeatureWeights {
    /// Create an empty weight table (every feature weighs 1.0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of a feature
    pub fn set(&mut self, feature: impl Into<String>, weight: f64) {
        self.weights.insert(feature.into(), weight);
    }

    /// Weight of a feature, 1.0 if unknown
    pub fn get(&self, feature: &str) -> f64 {
        self.weights.get(feature).copied().unwrap_or(1.0)
    }

    /// Number of features with an explicit weight
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True when no feature has an explicit weight
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Feature-weighted cosine similarity between two symbol sets.
///
/// Each feature contributes its weight instead of a unit count: the
/// numerator is the sum of weights over the intersection and the denominator
/// is the product of the weighted L2 norms. Falls back to 0.0 when either
/// set is empty, the intersection contributes nothing, or either norm is
/// zero.
///
/// With all weights at 1.0 this equals [`cosine`] exactly.
pub fn weighted_cosine(a: &SymbolSet, b: &SymbolSet, weights: &FeatureWeights) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.intersection(b).map(|f| weights.get(f)).sum();
    if dot == 0.0 {
        return 0.0;
    }
    let norm_a: f64 = a.iter().map(|f| weights.get(f).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|f| weights.get(f).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_symbol_set() -> impl Strategy<Value = SymbolSet> {
        proptest::collection::hash_set("[a-f]{1,3}", 0..12)
            .prop_map(|s| s.into_iter().map(|t| format!("H:{}", t)).collect())
    }

    proptest! {
        /// Property: similarity is symmetric
        #[test]
        fn test_cosine_symmetric(a in arb_symbol_set(), b in arb_symbol_set()) {
            prop_assert_eq!(cosine(&a, &b), cosine(&b, &a));
        }

        /// Property: similarity is bounded in [0, 1]
        #[test]
        fn test_cosine_bounded(a in arb_symbol_set(), b in arb_symbol_set()) {
            let sim = cosine(&a, &b);
            prop_assert!((0.0..=1.0).contains(&sim), "similarity {} out of bounds", sim);
        }

        /// Property: a nonempty set is fully similar to itself
        #[test]
        fn test_cosine_self_identity(a in arb_symbol_set()) {
            if a.is_empty() {
                prop_assert_eq!(cosine(&a, &a), 0.0);
            } else {
                prop_assert!((cosine(&a, &a) - 1.0).abs() < 1e-9);
            }
        }

        /// Property: weighted form with no explicit weights equals unweighted
        #[test]
        fn test_weighted_degenerates(a in arb_symbol_set(), b in arb_symbol_set()) {
            let weights = FeatureWeights::new();
            let diff = (weighted_cosine(&a, &b, &weights) - cosine(&a, &b)).abs();
            prop_assert!(diff < 1e-9);
        }
    }
}
