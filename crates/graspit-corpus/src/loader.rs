//! Corpus loading from per-relation JSON files

use crate::CorpusError;
use graspit_domain::example::LabeledPair;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One raw corpus entry: the two sides of a genitive pair
#[derive(Debug, Deserialize)]
struct RawExample {
    #[serde(rename = "A", default)]
    a: String,
    #[serde(rename = "B", default)]
    b: String,
}

/// Load every `<relation_label>.json` file of a corpus directory.
///
/// Files are read in sorted name order so the corpus order is stable across
/// runs. Entries with a blank side are dropped.
///
/// # Errors
///
/// Fails on directory/file I/O errors and on corpus files that are not a
/// JSON array of `{"A": ..., "B": ...}` objects - a corrupt corpus is a
/// caller-visible error, not something to silently skip.
pub fn load_corpus(dir: impl AsRef<Path>) -> Result<Vec<LabeledPair>, CorpusError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir.as_ref())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut corpus = Vec::new();
    for path in files {
        let relation = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();

        let contents = fs::read_to_string(&path)?;
        let examples: Vec<RawExample> =
            serde_json::from_str(&contents).map_err(|source| CorpusError::Json {
                file: path.display().to_string(),
                source,
            })?;

        let before = corpus.len();
        for example in examples {
            let a = example.a.trim();
            let b = example.b.trim();
            if !a.is_empty() && !b.is_empty() {
                corpus.push(LabeledPair::new(a, b, relation.clone()));
            }
        }
        debug!("{}: {} examples", relation, corpus.len() - before);
    }

    info!("corpus loaded: {} examples", corpus.len());
    Ok(corpus)
}

/// Unique terms of a corpus (both sides), in first-seen order.
///
/// This is the prefetch input: every term whose signature training or
/// evaluation will need.
pub fn all_terms(corpus: &[LabeledPair]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for example in corpus {
        for term in [&example.head, &example.complement] {
            if seen.insert(term.clone()) {
                terms.push(term.clone());
            }
        }
    }
    terms
}
