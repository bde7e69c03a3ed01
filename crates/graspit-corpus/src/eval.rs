//! Offline evaluation of a trained classifier

use graspit_classifier::Classifier;
use graspit_domain::example::LabeledPair;
use graspit_domain::LexicalSource;
use std::collections::HashMap;
use tracing::{debug, info};

/// Precision/recall/F1 for one relation class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    /// Precision: tp / (tp + fp)
    pub precision: f64,
    /// Recall: tp / (tp + fn)
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// Number of test examples carrying this label
    pub support: usize,
}

/// One confusion cell: how often `expected` was predicted as `predicted`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confusion {
    /// The gold label
    pub expected: String,
    /// The (wrong) predicted label
    pub predicted: String,
    /// Occurrence count
    pub count: usize,
}

/// Full evaluation result over a test set
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Per-class metrics, sorted by class label
    pub per_class: Vec<(String, ClassMetrics)>,
    /// Unweighted mean precision over classes
    pub macro_precision: f64,
    /// Unweighted mean recall over classes
    pub macro_recall: f64,
    /// Unweighted mean F1 over classes
    pub macro_f1: f64,
    /// Share of exactly correct predictions
    pub accuracy: f64,
    /// Raw `(expected, predicted)` pairs, in test order
    pub predictions: Vec<(String, String)>,
}

impl Evaluation {
    /// The most frequent misclassifications, descending by count.
    ///
    /// Count ties are ordered by (expected, predicted) label so the listing
    /// is stable.
    pub fn confusions(&self, top: usize) -> Vec<Confusion> {
        let mut errors: HashMap<(&str, &str), usize> = HashMap::new();
        for (expected, predicted) in &self.predictions {
            if expected != predicted {
                *errors
                    .entry((expected.as_str(), predicted.as_str()))
                    .or_insert(0) += 1;
            }
        }

        let mut cells: Vec<Confusion> = errors
            .into_iter()
            .map(|((expected, predicted), count)| Confusion {
                expected: expected.to_string(),
                predicted: predicted.to_string(),
                count,
            })
            .collect();
        cells.sort_by(|x, y| {
            y.count
                .cmp(&x.count)
                .then_with(|| x.expected.cmp(&y.expected))
                .then_with(|| x.predicted.cmp(&y.predicted))
        });
        cells.truncate(top);
        cells
    }
}

/// Replay a test set through a trained classifier and compute metrics.
///
/// Total like everything in the core: unknown pairs come back as the
/// `"unknown"` prediction and simply count as errors for their gold class.
pub fn evaluate<L: LexicalSource>(
    classifier: &Classifier<L>,
    test_data: &[LabeledPair],
) -> Evaluation {
    let total = test_data.len();
    info!("evaluating on {} examples", total);

    let mut predictions = Vec::with_capacity(total);
    for (i, example) in test_data.iter().enumerate() {
        let prediction = classifier.predict(&example.head, &example.complement);
        predictions.push((example.relation.clone(), prediction.relation));

        if (i + 1) % 100 == 0 {
            let correct = predictions.iter().filter(|(e, p)| e == p).count();
            debug!(
                "[{}/{}] running accuracy {:.3}",
                i + 1,
                total,
                correct as f64 / predictions.len() as f64
            );
        }
    }

    // Per-class tallies over every label seen on either side
    let mut classes: Vec<&str> = predictions
        .iter()
        .flat_map(|(e, p)| [e.as_str(), p.as_str()])
        .collect();
    classes.sort_unstable();
    classes.dedup();

    let mut true_positives: HashMap<&str, usize> = HashMap::new();
    let mut false_positives: HashMap<&str, usize> = HashMap::new();
    let mut false_negatives: HashMap<&str, usize> = HashMap::new();

    for (expected, predicted) in &predictions {
        if expected == predicted {
            *true_positives.entry(expected.as_str()).or_insert(0) += 1;
        } else {
            *false_positives.entry(predicted.as_str()).or_insert(0) += 1;
            *false_negatives.entry(expected.as_str()).or_insert(0) += 1;
        }
    }

    let mut per_class = Vec::with_capacity(classes.len());
    for class in &classes {
        let tp = true_positives.get(class).copied().unwrap_or(0);
        let fp = false_positives.get(class).copied().unwrap_or(0);
        let fn_ = false_negatives.get(class).copied().unwrap_or(0);

        let precision = if tp + fp > 0 {
            tp as f64 / (tp + fp) as f64
        } else {
            0.0
        };
        let recall = if tp + fn_ > 0 {
            tp as f64 / (tp + fn_) as f64
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        per_class.push((
            class.to_string(),
            ClassMetrics {
                precision,
                recall,
                f1,
                support: tp + fn_,
            },
        ));
    }

    let class_count = per_class.len();
    let (macro_precision, macro_recall, macro_f1) = if class_count > 0 {
        (
            per_class.iter().map(|(_, m)| m.precision).sum::<f64>() / class_count as f64,
            per_class.iter().map(|(_, m)| m.recall).sum::<f64>() / class_count as f64,
            per_class.iter().map(|(_, m)| m.f1).sum::<f64>() / class_count as f64,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    let correct = predictions.iter().filter(|(e, p)| e == p).count();
    let accuracy = if total > 0 {
        correct as f64 / total as f64
    } else {
        0.0
    };

    info!("evaluation done: accuracy {:.3}", accuracy);

    Evaluation {
        per_class,
        macro_precision,
        macro_recall,
        macro_f1,
        accuracy,
        predictions,
    }
}
