//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::parser::resolve_pair;
use graspit_corpus::load_corpus;
use std::time::Instant;

/// Execute the classify command: train on the full corpus, then classify
/// one expression.
pub fn execute_classify(args: ClassifyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let corpus = load_corpus(&config.corpus.corpus_dir)?;
    let classifier = super::trained_classifier(config, &corpus, &corpus, formatter)?;

    let Some((head, complement)) = resolve_pair(&args.expression, classifier.extractor().source())
    else {
        println!(
            "{}",
            formatter.warning("No genitive marker found in the expression.")
        );
        return Ok(());
    };

    println!(
        "{}",
        formatter.info(&format!("A = '{}', B = '{}'", head, complement))
    );

    let start = Instant::now();
    let output = if args.explain {
        let explanations = classifier.explain(&head, &complement, args.top);
        formatter.format_explanations(&explanations)?
    } else {
        let ranked = classifier.predict_ranked(&head, &complement, args.top);
        formatter.format_predictions(&ranked)?
    };
    let elapsed = start.elapsed();

    println!("{}", output);
    println!(
        "{}",
        formatter.info(&format!("Inference in {} ms", elapsed.as_millis()))
    );

    Ok(())
}
