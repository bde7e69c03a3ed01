//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Trains on the full corpus once, then classifies every entered genitive
//! expression, showing the ranked candidates with their diagnostics.

use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::parser::resolve_pair;
use graspit_corpus::load_corpus;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::time::Instant;

/// Run the interactive REPL.
pub fn run_repl(config: &Config, formatter: &Formatter) -> Result<()> {
    let corpus = load_corpus(&config.corpus.corpus_dir)?;
    if corpus.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "no corpus examples found in {}",
            config.corpus.corpus_dir.display()
        )));
    }
    let classifier = commands::trained_classifier(config, &corpus, &corpus, formatter)?;

    println!();
    println!(
        "{}",
        formatter.info("graspit REPL - Enter an expression (\"A de B\"), 'help' for commands, 'exit' to quit")
    );
    println!();

    let mut editor = DefaultEditor::new().map_err(|e| {
        CliError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to initialize editor: {}", e),
        ))
    })?;

    let history_path = Config::history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("graspit> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match line {
                    "exit" | "quit" | "q" => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    "help" | "?" => print_help(),
                    _ => {
                        if let Some(term) = line.strip_prefix("signature ") {
                            show_signature(term.trim(), &classifier, formatter);
                        } else {
                            classify_expression(line, &classifier, formatter);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    editor.save_history(&history_path).ok();

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  <expression>      Classify a genitive expression, e.g. 'dégâts de la tempête'");
    println!("  signature <term>  Show the semantic signature of a term");
    println!("  help, ?           Show this help");
    println!("  exit, quit, q     Leave the REPL");
}

fn show_signature(
    term: &str,
    classifier: &graspit_classifier::Classifier<graspit_jdm::JdmClient>,
    formatter: &Formatter,
) {
    let signature = classifier.extractor().extract(term);
    match formatter.format_signature(term, &signature) {
        Ok(out) => println!("{}", out),
        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
    }
}

fn classify_expression(
    expression: &str,
    classifier: &graspit_classifier::Classifier<graspit_jdm::JdmClient>,
    formatter: &Formatter,
) {
    let Some((head, complement)) = resolve_pair(expression, classifier.extractor().source()) else {
        println!(
            "{}",
            formatter.warning("No genitive marker found; try 'A de B'.")
        );
        return;
    };

    println!(
        "{}",
        formatter.info(&format!("A = '{}', B = '{}'", head, complement))
    );

    let start = Instant::now();
    let explanations = classifier.explain(&head, &complement, 5);
    let elapsed = start.elapsed();

    match formatter.format_explanations(&explanations) {
        Ok(out) => {
            println!("{}", out);
            println!(
                "{}",
                formatter.info(&format!("Inference in {} ms", elapsed.as_millis()))
            );
        }
        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
    }
}
