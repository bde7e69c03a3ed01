//! Evaluate command implementation.

use crate::cli::EvaluateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use graspit_corpus::{evaluate, load_corpus, split_train_test};

/// Execute the evaluate command: train on the corpus split, score the
/// held-out set and print the metrics.
pub fn execute_evaluate(args: EvaluateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut config = config.clone();
    if let Some(ratio) = args.train_ratio {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(CliError::InvalidInput(
                "train_ratio must be between 0.0 and 1.0".to_string(),
            ));
        }
        config.corpus.train_ratio = ratio;
    }
    if let Some(seed) = args.seed {
        config.corpus.seed = seed;
    }

    let corpus = load_corpus(&config.corpus.corpus_dir)?;
    if corpus.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "no corpus examples found in {}",
            config.corpus.corpus_dir.display()
        )));
    }

    let (train_set, test_set) =
        split_train_test(&corpus, config.corpus.train_ratio, config.corpus.seed);
    println!(
        "{}",
        formatter.info(&format!(
            "Corpus: {} examples ({} train, {} test)",
            corpus.len(),
            train_set.len(),
            test_set.len()
        ))
    );

    let classifier = super::trained_classifier(&config, &corpus, &train_set, formatter)?;

    if test_set.is_empty() {
        println!(
            "{}",
            formatter.warning("Empty test split; nothing to evaluate.")
        );
        return Ok(());
    }

    let result = evaluate(&classifier, &test_set);
    println!("{}", formatter.format_evaluation(&result, args.confusions)?);

    Ok(())
}
