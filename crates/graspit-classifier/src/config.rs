//! Configuration for the Classifier

use serde::{Deserialize, Serialize};

/// Operating mode, selected once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Nearest-neighbor voting over all stored example rules
    Knn,
    /// Best match against generalized rules merged at training time
    Fusion,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Knn
    }
}

/// Configuration for the Classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Operating mode
    pub mode: Mode,

    /// Neighbor count for knn voting. Zero is degenerate and yields the
    /// "unknown" sentinel on every prediction.
    pub k: usize,

    /// Similarity threshold at or above which two same-type rules merge
    /// (fusion mode)
    pub fusion_threshold: f64,

    /// Maximum hyperonyms kept per signature, by descending associative
    /// weight
    pub max_hyperonyms: usize,

    /// Weight features by inverse document frequency over the training set
    /// instead of unit counts
    pub weighted: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Knn,
            k: 5,
            fusion_threshold: 0.5,
            max_hyperonyms: 20,
            weighted: false,
        }
    }
}

impl ClassifierConfig {
    /// Validate the configuration.
    ///
    /// Degenerate values (`k == 0`) are legal and handled by prediction;
    /// only values outside their domain are rejected.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.fusion_threshold) {
            return Err(format!(
                "fusion_threshold {} outside [0.0, 1.0]",
                self.fusion_threshold
            ));
        }
        Ok(())
    }
}
