//! graspit CLI - semantic relation classification for French genitive
//! constructions, backed by the JeuxDeMots lexical network.

use clap::Parser;
use graspit_cli::commands;
use graspit_cli::repl;
use graspit_cli::{Cli, Command, Config, Formatter};
use std::path::Path;

fn main() {
    // Log to stderr so tables stay clean on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    // CLI flags override the config file
    if let Some(mode) = cli.mode {
        config.classifier.mode = mode.into();
    }
    if let Some(k) = cli.k {
        config.classifier.k = k;
    }

    // Determine output format and color setting
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&config, &formatter)?;
        }
        Some(Command::Evaluate(args)) => {
            commands::execute_evaluate(args, &config, &formatter)?;
        }
        Some(Command::Classify(args)) => {
            commands::execute_classify(args, &config, &formatter)?;
        }
        Some(Command::Signature(args)) => {
            commands::execute_signature(args, &config, &formatter)?;
        }
        Some(Command::Prefetch) => {
            commands::execute_prefetch(&config, &formatter)?;
        }
    }

    Ok(())
}
