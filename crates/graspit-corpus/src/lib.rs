//! graspit Corpus Layer
//!
//! Labeled-corpus loading, train/test splitting and offline evaluation.
//!
//! A corpus directory holds one JSON file per relation type, named after the
//! relation label (`r_lieu.json`, `r_objetmatiere.json`, ...), each
//! containing an array of `{"A": ..., "B": ...}` genitive pairs. Splitting
//! is stratified per label and seeded, so runs are reproducible. Evaluation
//! replays a held-out set through a trained classifier and reports
//! per-class precision/recall/F1, macro averages, accuracy and the top
//! confusions.

#![warn(missing_docs)]

mod eval;
mod loader;
mod split;

use thiserror::Error;

pub use eval::{evaluate, ClassMetrics, Confusion, Evaluation};
pub use loader::{all_terms, load_corpus};
pub use split::{split_train_test, DEFAULT_SEED, DEFAULT_TRAIN_RATIO};

/// Errors that can occur while loading a corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Corpus directory or file I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus file is not valid JSON of the expected shape
    #[error("JSON parse error in {file}: {source}")]
    Json {
        /// File that failed to parse
        file: String,
        /// Underlying parse error
        source: serde_json::Error,
    },
}
