//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use graspit_classifier::{Explanation, Prediction};
use graspit_corpus::Evaluation;
use graspit_domain::relation::display_name;
use graspit_domain::Signature;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format ranked predictions.
    pub fn format_predictions(&self, predictions: &[Prediction]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = predictions
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "relation": p.relation,
                            "score": p.score,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if predictions.is_empty() {
                    return Ok(self.colorize("No candidate relation.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Rank", "Relation", "Score", ""]);
                for (i, prediction) in predictions.iter().enumerate() {
                    let marker = if i == 0 { "<--" } else { "" };
                    builder.push_record([
                        (i + 1).to_string(),
                        display_name(&prediction.relation).to_string(),
                        format!("{:.3}", prediction.score),
                        marker.to_string(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(predictions
                .iter()
                .map(|p| p.relation.clone())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format ranked predictions with diagnostics.
    pub fn format_explanations(&self, explanations: &[Explanation]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = explanations
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "relation": e.relation,
                            "score": e.score,
                            "best_sim_left": e.best_sim_left,
                            "best_sim_right": e.best_sim_right,
                            "votes": e.votes,
                            "weight": e.weight,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if explanations.is_empty() {
                    return Ok(self.colorize("No candidate relation.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Rank", "Relation", "Score", "Sim A", "Sim B", "Votes", ""]);
                for (i, explanation) in explanations.iter().enumerate() {
                    let marker = if i == 0 { "<--" } else { "" };
                    builder.push_record([
                        (i + 1).to_string(),
                        display_name(&explanation.relation).to_string(),
                        format!("{:.3}", explanation.score),
                        format!("{:.3}", explanation.best_sim_left),
                        format!("{:.3}", explanation.best_sim_right),
                        explanation.votes.to_string(),
                        marker.to_string(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(explanations
                .iter()
                .map(|e| e.relation.clone())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the semantic signature of a term.
    pub fn format_signature(&self, term: &str, signature: &Signature) -> Result<String> {
        let mut hyperonyms: Vec<&String> = signature.hyperonyms.iter().collect();
        hyperonyms.sort();
        let mut trt: Vec<&String> = signature.trt.iter().collect();
        trt.sort();
        let mut sst: Vec<&String> = signature.sst.iter().collect();
        sst.sort();

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "term": term,
                "hyperonyms": hyperonyms,
                "trt": trt,
                "sst": sst,
                "symbols": signature.len(),
            }))?),
            OutputFormat::Table => {
                if signature.is_empty() {
                    return Ok(self.colorize(
                        &format!("'{}' is unknown to the lexical network.", term),
                        "yellow",
                    ));
                }

                let mut out = String::new();
                out.push_str(&format!("Signature of '{}'\n", term));
                out.push_str(&format!(
                    "  H   ({}): {}\n",
                    hyperonyms.len(),
                    join_limited(&hyperonyms, 10)
                ));
                out.push_str(&format!("  TRT ({}): {}\n", trt.len(), join_limited(&trt, 30)));
                out.push_str(&format!("  SST ({}): {}\n", sst.len(), join_limited(&sst, 10)));
                out.push_str(&format!("  Total symbols: {}", signature.len()));
                Ok(out)
            }
            OutputFormat::Quiet => {
                let symbols = signature.to_symbol_set();
                let mut sorted: Vec<String> = symbols.into_iter().collect();
                sorted.sort();
                Ok(sorted.join("\n"))
            }
        }
    }

    /// Format an evaluation report.
    pub fn format_evaluation(&self, evaluation: &Evaluation, top_confusions: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let per_class: Vec<serde_json::Value> = evaluation
                    .per_class
                    .iter()
                    .map(|(label, m)| {
                        serde_json::json!({
                            "class": label,
                            "precision": m.precision,
                            "recall": m.recall,
                            "f1": m.f1,
                            "support": m.support,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "per_class": per_class,
                    "macro_precision": evaluation.macro_precision,
                    "macro_recall": evaluation.macro_recall,
                    "macro_f1": evaluation.macro_f1,
                    "accuracy": evaluation.accuracy,
                }))?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Type", "P", "R", "F1", "Support"]);
                for (label, metrics) in &evaluation.per_class {
                    builder.push_record([
                        display_name(label).to_string(),
                        format!("{:.1}%", metrics.precision * 100.0),
                        format!("{:.1}%", metrics.recall * 100.0),
                        format!("{:.3}", metrics.f1),
                        metrics.support.to_string(),
                    ]);
                }
                builder.push_record([
                    "Macro avg".to_string(),
                    format!("{:.1}%", evaluation.macro_precision * 100.0),
                    format!("{:.1}%", evaluation.macro_recall * 100.0),
                    format!("{:.3}", evaluation.macro_f1),
                    evaluation.predictions.len().to_string(),
                ]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let mut out = table.to_string();
                out.push_str(&format!(
                    "\nAccuracy: {:.1}%",
                    evaluation.accuracy * 100.0
                ));

                let confusions = evaluation.confusions(top_confusions);
                if !confusions.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Expected", "Predicted", "Count"]);
                    for confusion in &confusions {
                        builder.push_record([
                            display_name(&confusion.expected).to_string(),
                            display_name(&confusion.predicted).to_string(),
                            confusion.count.to_string(),
                        ]);
                    }
                    let mut table = builder.build();
                    table
                        .with(Style::rounded())
                        .with(Modify::new(Rows::first()).with(Alignment::center()));
                    out.push_str(&format!("\n\nTop confusions:\n{}", table));
                }

                Ok(out)
            }
            OutputFormat::Quiet => Ok(format!("{:.4}", evaluation.accuracy)),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Apply a color when colors are enabled.
    fn colorize(&self, message: &str, color: &str) -> String {
        if !self.color_enabled {
            return message.to_string();
        }
        match color {
            "green" => message.green().to_string(),
            "red" => message.red().to_string(),
            "blue" => message.blue().to_string(),
            "yellow" => message.yellow().to_string(),
            _ => message.to_string(),
        }
    }
}

/// Join up to `limit` items, appending an ellipsis marker beyond that.
fn join_limited(items: &[&String], limit: usize) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    let shown: Vec<&str> = items.iter().take(limit).map(|s| s.as_str()).collect();
    let mut out = shown.join(", ");
    if items.len() > limit {
        out.push_str(&format!(", ... ({} more)", items.len() - limit));
    }
    out
}
