//! Seeded stratified train/test splitting

use graspit_domain::example::LabeledPair;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

/// Default share of each relation type kept for training
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// Default shuffle seed
pub const DEFAULT_SEED: u64 = 42;

/// Split a corpus into train and test sets, stratified by relation label.
///
/// Each label's examples are shuffled and split at `train_ratio`, so both
/// sides keep the label distribution of the corpus; both sides are then
/// shuffled again so labels interleave. The same seed and corpus order
/// always produce the same split.
pub fn split_train_test(
    corpus: &[LabeledPair],
    train_ratio: f64,
    seed: u64,
) -> (Vec<LabeledPair>, Vec<LabeledPair>) {
    let mut rng = StdRng::seed_from_u64(seed);

    // Group by label in first-seen order so the split is deterministic
    let mut order: Vec<&str> = Vec::new();
    let mut by_label: HashMap<&str, Vec<LabeledPair>> = HashMap::new();
    for example in corpus {
        if !by_label.contains_key(example.relation.as_str()) {
            order.push(example.relation.as_str());
        }
        by_label
            .entry(example.relation.as_str())
            .or_default()
            .push(example.clone());
    }

    let mut train = Vec::new();
    let mut test = Vec::new();

    for label in order {
        let mut examples = by_label.remove(label).unwrap_or_default();
        examples.shuffle(&mut rng);
        let cut = (examples.len() as f64 * train_ratio) as usize;
        let rest = examples.split_off(cut);
        train.extend(examples);
        test.extend(rest);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<LabeledPair> {
        let mut corpus = Vec::new();
        for i in 0..10 {
            corpus.push(LabeledPair::new(
                format!("a{}", i),
                format!("b{}", i),
                "r_lieu",
            ));
        }
        for i in 0..5 {
            corpus.push(LabeledPair::new(
                format!("c{}", i),
                format!("d{}", i),
                "r_topic",
            ));
        }
        corpus
    }

    #[test]
    fn test_split_is_stratified() {
        let (train, test) = split_train_test(&corpus(), 0.8, DEFAULT_SEED);

        let train_lieu = train.iter().filter(|e| e.relation == "r_lieu").count();
        let train_topic = train.iter().filter(|e| e.relation == "r_topic").count();

        assert_eq!(train_lieu, 8);
        assert_eq!(train_topic, 4);
        assert_eq!(test.len(), 3);
    }

    #[test]
    fn test_split_is_exhaustive_and_disjoint() {
        let corpus = corpus();
        let (train, test) = split_train_test(&corpus, 0.8, DEFAULT_SEED);

        assert_eq!(train.len() + test.len(), corpus.len());

        let mut all: Vec<&str> = train
            .iter()
            .chain(test.iter())
            .map(|e| e.head.as_str())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), corpus.len());
    }

    #[test]
    fn test_split_is_deterministic() {
        let corpus = corpus();
        let first = split_train_test(&corpus, 0.8, DEFAULT_SEED);
        let second = split_train_test(&corpus, 0.8, DEFAULT_SEED);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seed_changes_the_split() {
        let corpus = corpus();
        let (train_a, _) = split_train_test(&corpus, 0.8, 1);
        let (train_b, _) = split_train_test(&corpus, 0.8, 2);
        // Same sizes, near-certainly different membership/order
        assert_eq!(train_a.len(), train_b.len());
        assert_ne!(train_a, train_b);
    }

    #[test]
    fn test_extreme_ratios() {
        let corpus = corpus();
        let (train, test) = split_train_test(&corpus, 1.0, DEFAULT_SEED);
        assert_eq!(train.len(), corpus.len());
        assert!(test.is_empty());

        let (train, test) = split_train_test(&corpus, 0.0, DEFAULT_SEED);
        assert!(train.is_empty());
        assert_eq!(test.len(), corpus.len());
    }

    #[test]
    fn test_empty_corpus() {
        let (train, test) = split_train_test(&[], 0.8, DEFAULT_SEED);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }
}
