//! graspit Classifier
//!
//! The classification engine: turns a pair of terms joined by a genitive
//! construction ("A de B") into a ranked list of semantic-relation
//! candidates, using symbolic signatures from a lexical network instead of a
//! trained statistical model.
//!
//! # Architecture
//!
//! ```text
//! (A, B) → SignatureExtractor → symbol sets → RuleStore scoring → ranked relations
//! ```
//!
//! Training ingests labeled pairs into the rule store; in `knn` mode every
//! valid example becomes one permanent rule and prediction votes over the k
//! nearest rules, in `fusion` mode similar same-type rules are merged into
//! generalized rules and prediction takes the best match per relation type.
//!
//! # Key Properties
//!
//! - **Total operations**: no core call can fail. Unknown terms degrade to
//!   empty feature sets, unscoreable pairs are skipped (training) or yield
//!   the `"unknown"` sentinel (prediction), degenerate configurations yield
//!   the sentinel as well.
//! - **Deterministic**: given a frozen store and extractor cache, repeated
//!   predictions return identical ranked lists; tie-breaking is documented
//!   on [`Classifier`].
//!
//! # Example Usage
//!
//! ```
//! use graspit_classifier::{Classifier, ClassifierConfig};
//! use graspit_domain::example::LabeledPair;
//! use graspit_jdm::MockLexicon;
//!
//! let mut lexicon = MockLexicon::new();
//! lexicon.add_term("tabouret", &[("meuble", 60.0)], &[], &[6, 50]);
//! lexicon.add_term("bois", &[("matériau", 80.0)], &[], &[6, 50]);
//!
//! let mut classifier = Classifier::new(lexicon, ClassifierConfig::default());
//! classifier.train(&[LabeledPair::new("tabouret", "bois", "r_objetmatiere")]);
//!
//! let prediction = classifier.predict("tabouret", "bois");
//! assert_eq!(prediction.relation, "r_objetmatiere");
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod extractor;
mod store;

#[cfg(test)]
mod tests;

pub use classifier::{Classifier, Explanation, Prediction, UNKNOWN_RELATION};
pub use config::{ClassifierConfig, Mode};
pub use extractor::SignatureExtractor;
pub use store::{RuleGroups, RuleStore};
