//! Signature command implementation.

use crate::cli::SignatureArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use graspit_classifier::SignatureExtractor;

/// Execute the signature command: show the three feature blocks of a term.
pub fn execute_signature(
    args: SignatureArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let client = super::build_client(config)?;
    let extractor = SignatureExtractor::new(client, config.classifier.max_hyperonyms);

    let signature = extractor.extract(&args.term);
    println!("{}", formatter.format_signature(&args.term, &signature)?);

    Ok(())
}
