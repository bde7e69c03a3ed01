//! Prefetch command implementation.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use graspit_corpus::{all_terms, load_corpus};
use std::time::Instant;

/// Execute the prefetch command: warm the lexical cache for every corpus
/// term.
pub fn execute_prefetch(config: &Config, formatter: &Formatter) -> Result<()> {
    let corpus = load_corpus(&config.corpus.corpus_dir)?;
    if corpus.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "no corpus examples found in {}",
            config.corpus.corpus_dir.display()
        )));
    }

    let terms = all_terms(&corpus);
    println!(
        "{}",
        formatter.info(&format!(
            "{} unique terms across {} examples",
            terms.len(),
            corpus.len()
        ))
    );

    let client = super::build_client(config)?;
    let start = Instant::now();
    let report = client.prefetch(&terms);

    println!(
        "{}",
        formatter.success(&format!(
            "Prefetch done in {:.1}s: {} fetched, {} already cached",
            start.elapsed().as_secs_f64(),
            report.fetched,
            report.cached
        ))
    );

    Ok(())
}
