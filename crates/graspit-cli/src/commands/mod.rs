//! Command implementations.

pub mod classify;
pub mod evaluate;
pub mod prefetch;
pub mod signature;

pub use self::classify::execute_classify;
pub use self::evaluate::execute_evaluate;
pub use self::prefetch::execute_prefetch;
pub use self::signature::execute_signature;

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use graspit_classifier::Classifier;
use graspit_corpus::all_terms;
use graspit_domain::example::LabeledPair;
use graspit_jdm::JdmClient;
use std::time::Instant;

/// Build the lexical client from configuration.
pub(crate) fn build_client(config: &Config) -> Result<JdmClient> {
    Ok(JdmClient::with_settings(
        config.corpus.cache_dir.clone(),
        config.jdm.clone(),
    )?)
}

/// Prefetch the lexical data for a corpus and train a classifier.
///
/// `prefetch_set` is usually the whole corpus (so evaluation terms are
/// warmed too) while `train_set` may be just the training split.
pub(crate) fn trained_classifier(
    config: &Config,
    prefetch_set: &[LabeledPair],
    train_set: &[LabeledPair],
    formatter: &Formatter,
) -> Result<Classifier<JdmClient>> {
    let client = build_client(config)?;

    let terms = all_terms(prefetch_set);
    println!(
        "{}",
        formatter.info(&format!("Prefetching {} unique terms...", terms.len()))
    );
    let start = Instant::now();
    let report = client.prefetch(&terms);
    println!(
        "{}",
        formatter.info(&format!(
            "Prefetch done in {:.1}s ({} fetched, {} cached)",
            start.elapsed().as_secs_f64(),
            report.fetched,
            report.cached
        ))
    );

    let mut classifier = Classifier::new(client, config.classifier.clone());
    let start = Instant::now();
    classifier.train(train_set);
    let mut summary = format!(
        "Trained {} rules from {} examples in {:.1}s",
        classifier.rule_count(),
        train_set.len(),
        start.elapsed().as_secs_f64()
    );
    if classifier.skipped() > 0 {
        summary.push_str(&format!(
            " ({} skipped, unknown signatures)",
            classifier.skipped()
        ));
    }
    println!("{}", formatter.success(&summary));

    Ok(classifier)
}
