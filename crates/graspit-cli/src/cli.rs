//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use graspit_classifier::Mode;

/// graspit - classify the semantic relation of French genitive constructions.
#[derive(Debug, Parser)]
#[command(name = "graspit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Classifier mode
    #[arg(short, long, value_enum, global = true)]
    pub mode: Option<ModeArg>,

    /// Neighbor count for knn voting
    #[arg(short, long, global = true)]
    pub k: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (labels only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => Self::Table,
            CliFormat::Json => Self::Json,
            CliFormat::Quiet => Self::Quiet,
        }
    }
}

/// Classifier mode options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Nearest-neighbor voting over raw example rules
    Knn,
    /// Best match against fused generalized rules
    Fusion,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Knn => Mode::Knn,
            ModeArg::Fusion => Mode::Fusion,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Train on the corpus split and score the held-out set
    Evaluate(EvaluateArgs),

    /// Classify a genitive expression ("A de B")
    Classify(ClassifyArgs),

    /// Show the semantic signature of a term
    Signature(SignatureArgs),

    /// Warm the lexical cache for every corpus term
    Prefetch,

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Override the train share of the split (0.0-1.0)
    #[arg(long)]
    pub train_ratio: Option<f64>,

    /// Override the split shuffle seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of top confusions to list
    #[arg(long, default_value = "15")]
    pub confusions: usize,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// The expression to classify, e.g. "dégâts de la tempête"
    pub expression: String,

    /// Number of ranked candidates to show
    #[arg(short = 'n', long, default_value = "5")]
    pub top: usize,

    /// Show scoring diagnostics per candidate
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for the signature command.
#[derive(Debug, Parser)]
pub struct SignatureArgs {
    /// The term to inspect
    pub term: String,
}
