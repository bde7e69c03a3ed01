//! Rule store construction and rule fusion
//!
//! Training accumulates rules grouped by relation type; the groups are
//! flattened into one frozen pool for inference. In fusion mode each group
//! is first reduced by greedy pairwise merging: the result depends on the
//! input order of same-type rules and is not globally optimal - that is the
//! intended behavior, and determinism comes from the stable insertion order
//! of the groups, not from the algorithm itself.

use graspit_domain::Rule;
use std::collections::HashMap;
use tracing::debug;

/// Rules accumulated during training, grouped by relation type in first-seen
/// order
#[derive(Debug, Default)]
pub struct RuleGroups {
    order: Vec<String>,
    groups: HashMap<String, Vec<Rule>>,
}

impl RuleGroups {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to its relation-type group
    pub fn push(&mut self, rule: Rule) {
        if !self.groups.contains_key(&rule.relation) {
            self.order.push(rule.relation.clone());
        }
        self.groups
            .entry(rule.relation.clone())
            .or_default()
            .push(rule);
    }

    /// Total rule count across groups
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// True when no rule has been accumulated
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consume into `(relation type, rules)` pairs in first-seen order
    pub fn into_groups(mut self) -> Vec<(String, Vec<Rule>)> {
        self.order
            .into_iter()
            .map(|relation| {
                let rules = self.groups.remove(&relation).unwrap_or_default();
                (relation, rules)
            })
            .collect()
    }
}

/// The frozen pool of classification rules held by a classifier.
///
/// Built once by training, read-only afterwards.
#[derive(Debug, Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
}

impl RuleStore {
    /// Create an empty store (every prediction is "unknown")
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store keeping every raw rule (nearest-neighbor mode)
    pub fn direct(groups: RuleGroups) -> Self {
        let mut rules = Vec::with_capacity(groups.len());
        for (_, group) in groups.into_groups() {
            rules.extend(group);
        }
        Self { rules }
    }

    /// Build a store by fusing each relation-type group to its fixed point
    /// (fusion mode)
    pub fn fused(groups: RuleGroups, threshold: f64) -> Self {
        let mut rules = Vec::new();
        for (relation, group) in groups.into_groups() {
            let before = group.len();
            let fused = fuse_rules(group, threshold);
            debug!("{}: {} -> {} rules", relation, before, fused.len());
            rules.extend(fused);
        }
        Self { rules }
    }

    /// The stored rules, in store order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of stored rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the store holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Greedily merge similar rules of one relation type until a full pass
/// performs no merge.
///
/// Each pass scans the list; every not-yet-consumed rule absorbs all later
/// not-yet-consumed rules whose similarity to its *current* (already grown)
/// form reaches the threshold. Passes repeat until the list is stable. The
/// outcome depends on input order; re-running on an already fused list is a
/// no-op.
pub fn fuse_rules(mut rules: Vec<Rule>, threshold: f64) -> Vec<Rule> {
    if rules.len() <= 1 {
        return rules;
    }

    let mut changed = true;
    while changed {
        changed = false;
        let mut merged = Vec::with_capacity(rules.len());
        let mut consumed = vec![false; rules.len()];

        for i in 0..rules.len() {
            if consumed[i] {
                continue;
            }
            let mut current = rules[i].clone();
            for j in (i + 1)..rules.len() {
                if consumed[j] {
                    continue;
                }
                if current.similarity(&rules[j]) >= threshold {
                    current = current.fuse(&rules[j]);
                    consumed[j] = true;
                    changed = true;
                }
            }
            merged.push(current);
        }

        rules = merged;
    }

    rules
}
