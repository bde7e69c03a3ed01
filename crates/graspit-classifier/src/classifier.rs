//! The classifier: training ingestion and ranked prediction

use crate::config::{ClassifierConfig, Mode};
use crate::extractor::SignatureExtractor;
use crate::store::{RuleGroups, RuleStore};
use graspit_domain::example::LabeledPair;
use graspit_domain::{cosine, weighted_cosine, FeatureWeights, LexicalSource, Rule, SymbolSet};
use std::collections::HashMap;
use tracing::{debug, info};

/// Sentinel relation label returned when no rule yields a nonzero score
pub const UNKNOWN_RELATION: &str = "unknown";

/// One ranked prediction
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Relation-type label, or `"unknown"`
    pub relation: String,

    /// Accumulated vote (knn mode, in `[0, +inf)`) or best-match similarity
    /// (fusion mode, in `[0, 1]`)
    pub score: f64,
}

impl Prediction {
    /// The "unknown" sentinel
    pub fn unknown() -> Self {
        Self {
            relation: UNKNOWN_RELATION.to_string(),
            score: 0.0,
        }
    }
}

/// One ranked prediction with its scoring diagnostics, for interactive and
/// debug surfaces.
///
/// Unlike [`Prediction`] voting, the knn `score` here is the *linear* sum of
/// neighbor scores; the two aggregations are intentionally distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    /// Relation-type label
    pub relation: String,

    /// Linear score sum over contributing neighbors (knn) or best-match
    /// similarity (fusion)
    pub score: f64,

    /// Left-side similarity of the best contributing rule
    pub best_sim_left: f64,

    /// Right-side similarity of the best contributing rule
    pub best_sim_right: f64,

    /// Number of rules that contributed a nonzero score
    pub votes: usize,

    /// Merge weight of the best contributing rule (1.0 outside fusion mode)
    pub weight: f64,
}

struct ScoredRule<'a> {
    rule: &'a Rule,
    score: f64,
    sim_left: f64,
    sim_right: f64,
}

/// Genitive-relation classifier over a frozen rule store.
///
/// Two operating modes, chosen once at construction: `knn` votes over the k
/// most similar stored examples, `fusion` takes the best match among
/// generalized rules. All operations are total; see the crate docs.
///
/// # Determinism and tie-breaking
///
/// Rules are scored in store order and stable-sorted by descending score, so
/// equal-score rules keep store order. Votes accumulate per relation type in
/// the order types are first seen among the contributing rules, and the
/// final ranking is another stable sort by descending score - relation types
/// with tied scores therefore keep that first-seen order, which itself
/// derives from training insertion order. Repeated calls against an
/// unchanged store return identical rankings.
pub struct Classifier<L: LexicalSource> {
    extractor: SignatureExtractor<L>,
    config: ClassifierConfig,
    store: RuleStore,
    weights: FeatureWeights,
    skipped: usize,
}

impl<L: LexicalSource> Classifier<L> {
    /// Create an untrained classifier over a lexical source
    pub fn new(source: L, config: ClassifierConfig) -> Self {
        let extractor = SignatureExtractor::new(source, config.max_hyperonyms);
        Self {
            extractor,
            config,
            store: RuleStore::new(),
            weights: FeatureWeights::new(),
            skipped: 0,
        }
    }

    /// The configuration this classifier was built with
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// The signature extractor (shares this classifier's memo cache)
    pub fn extractor(&self) -> &SignatureExtractor<L> {
        &self.extractor
    }

    /// Number of rules in the frozen store
    pub fn rule_count(&self) -> usize {
        self.store.len()
    }

    /// Number of training examples skipped because both signatures were
    /// unknown to the lexical source
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Ingest labeled pairs and freeze the rule store.
    ///
    /// Pairs for which both symbol sets are empty are skipped and tallied -
    /// a data-quality signal, not an error. Re-training replaces the store.
    pub fn train(&mut self, examples: &[LabeledPair]) {
        let total = examples.len();
        info!("training ({:?} mode) on {} examples", self.config.mode, total);

        let mut groups = RuleGroups::new();
        let mut skipped = 0;
        let mut document_count = 0usize;
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for example in examples {
            let (set_a, set_b) = self
                .extractor
                .extract_pair(&example.head, &example.complement);

            if set_a.is_empty() && set_b.is_empty() {
                skipped += 1;
                continue;
            }

            if self.config.weighted {
                document_count += 1;
                for feature in set_a.union(&set_b) {
                    *document_frequency.entry(feature.clone()).or_insert(0) += 1;
                }
            }

            groups.push(Rule::new(set_a, set_b, example.relation.clone()));
        }

        if skipped > 0 {
            info!("skipped {} examples with unknown signatures", skipped);
        }
        self.skipped = skipped;

        let mut weights = FeatureWeights::new();
        if self.config.weighted && document_count > 0 {
            for (feature, df) in document_frequency {
                weights.set(feature, (1.0 + document_count as f64 / df as f64).ln());
            }
            debug!("derived {} feature weights", weights.len());
        }
        self.weights = weights;

        self.store = match self.config.mode {
            Mode::Knn => RuleStore::direct(groups),
            Mode::Fusion => RuleStore::fused(groups, self.config.fusion_threshold),
        };

        info!("rule store frozen: {} rules", self.store.len());
    }

    /// Predict the relation of a pair.
    ///
    /// Returns the `("unknown", 0.0)` sentinel when nothing scores: empty
    /// store, `k == 0`, or a pair sharing no feature with any rule.
    pub fn predict(&self, a: &str, b: &str) -> Prediction {
        self.predict_ranked(a, b, 1)
            .into_iter()
            .next()
            .unwrap_or_else(Prediction::unknown)
    }

    /// Ranked predictions, best first, at most `top_n` entries.
    ///
    /// Empty when nothing scores.
    pub fn predict_ranked(&self, a: &str, b: &str, top_n: usize) -> Vec<Prediction> {
        if self.store.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let (set_a, set_b) = self.extractor.extract_pair(a, b);
        match self.config.mode {
            Mode::Knn => self.rank_by_votes(&set_a, &set_b, top_n),
            Mode::Fusion => self.rank_by_best_match(&set_a, &set_b, top_n),
        }
    }

    /// Ranked predictions with scoring diagnostics, best first.
    ///
    /// knn aggregates the *linear* neighbor scores (not the squared votes of
    /// [`Self::predict_ranked`]); fusion reports the best match per type.
    pub fn explain(&self, a: &str, b: &str, top_n: usize) -> Vec<Explanation> {
        if self.store.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let (set_a, set_b) = self.extractor.extract_pair(a, b);
        let mut scored = self.scored_rules(&set_a, &set_b);
        scored.sort_by(|x, y| y.score.total_cmp(&x.score));

        let pool: &[ScoredRule] = match self.config.mode {
            Mode::Knn => &scored[..self.config.k.min(scored.len())],
            Mode::Fusion => &scored[..],
        };

        let mut order: Vec<String> = Vec::new();
        let mut by_relation: HashMap<String, Explanation> = HashMap::new();

        for s in pool {
            if s.score == 0.0 {
                continue;
            }
            let entry = by_relation
                .entry(s.rule.relation.clone())
                .or_insert_with(|| {
                    order.push(s.rule.relation.clone());
                    Explanation {
                        relation: s.rule.relation.clone(),
                        score: 0.0,
                        best_sim_left: s.sim_left,
                        best_sim_right: s.sim_right,
                        votes: 0,
                        weight: s.rule.weight,
                    }
                });

            match self.config.mode {
                Mode::Knn => entry.score += s.score,
                Mode::Fusion => entry.score = entry.score.max(s.score),
            }
            entry.votes += 1;
            // The pool is sorted descending, so the first rule of each type
            // is its best contributor; later rules only bump the counters.
        }

        let mut ranked: Vec<Explanation> = order
            .into_iter()
            .map(|relation| by_relation.remove(&relation).expect("tracked relation"))
            .collect();
        ranked.sort_by(|x, y| y.score.total_cmp(&x.score));
        ranked.truncate(top_n);
        ranked
    }

    /// Score every stored rule against the pair, in store order
    fn scored_rules<'a>(&'a self, set_a: &SymbolSet, set_b: &SymbolSet) -> Vec<ScoredRule<'a>> {
        self.store
            .rules()
            .iter()
            .map(|rule| {
                let sim_left = self.similarity(set_a, &rule.left);
                let sim_right = self.similarity(set_b, &rule.right);
                ScoredRule {
                    rule,
                    score: (sim_left + sim_right) / 2.0,
                    sim_left,
                    sim_right,
                }
            })
            .collect()
    }

    fn similarity(&self, a: &SymbolSet, b: &SymbolSet) -> f64 {
        if self.config.weighted {
            weighted_cosine(a, b, &self.weights)
        } else {
            cosine(a, b)
        }
    }

    /// knn ranking: squared-score votes over the k nearest rules
    fn rank_by_votes(&self, set_a: &SymbolSet, set_b: &SymbolSet, top_n: usize) -> Vec<Prediction> {
        let mut scored = self.scored_rules(set_a, set_b);
        // Stable sort: equal-score rules keep store order
        scored.sort_by(|x, y| y.score.total_cmp(&x.score));

        let mut order: Vec<String> = Vec::new();
        let mut votes: HashMap<String, f64> = HashMap::new();

        for s in scored.iter().take(self.config.k) {
            if s.score == 0.0 {
                continue;
            }
            if !votes.contains_key(&s.rule.relation) {
                order.push(s.rule.relation.clone());
            }
            *votes.entry(s.rule.relation.clone()).or_insert(0.0) += s.score * s.score;
        }

        Self::rank(order, votes, top_n)
    }

    /// fusion ranking: best single match per relation type
    fn rank_by_best_match(
        &self,
        set_a: &SymbolSet,
        set_b: &SymbolSet,
        top_n: usize,
    ) -> Vec<Prediction> {
        let scored = self.scored_rules(set_a, set_b);

        let mut order: Vec<String> = Vec::new();
        let mut best: HashMap<String, f64> = HashMap::new();

        for s in &scored {
            if s.score == 0.0 {
                continue;
            }
            if !best.contains_key(&s.rule.relation) {
                order.push(s.rule.relation.clone());
            }
            let entry = best.entry(s.rule.relation.clone()).or_insert(0.0);
            if s.score > *entry {
                *entry = s.score;
            }
        }

        Self::rank(order, best, top_n)
    }

    /// Stable-sort accumulated scores: tied relation types keep first-seen
    /// order
    fn rank(order: Vec<String>, scores: HashMap<String, f64>, top_n: usize) -> Vec<Prediction> {
        let mut ranked: Vec<Prediction> = order
            .into_iter()
            .map(|relation| {
                let score = scores[&relation];
                Prediction { relation, score }
            })
            .collect();
        ranked.sort_by(|x, y| y.score.total_cmp(&x.score));
        ranked.truncate(top_n);
        ranked
    }
}
