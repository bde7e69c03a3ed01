//! Integration tests for the classifier

#[cfg(test)]
mod tests {
    use crate::{Classifier, ClassifierConfig, Mode, UNKNOWN_RELATION};
    use graspit_domain::example::LabeledPair;
    use graspit_jdm::MockLexicon;

    /// A small lexical world where "fer" overlaps "bois" (both materials)
    /// and shares almost nothing with "Algérie"
    fn lexicon() -> MockLexicon {
        let mut lexicon = MockLexicon::new();
        lexicon.add_term(
            "tabouret",
            &[("siège", 60.0), ("meuble", 40.0)],
            &["_INFO-SEM:artefact"],
            &[6, 50],
        );
        lexicon.add_term(
            "cuillère",
            &[("couvert", 55.0), ("ustensile", 45.0)],
            &["_INFO-SEM:artefact"],
            &[6, 50],
        );
        lexicon.add_term("bois", &[("matériau", 80.0)], &["_INFO-SEM:substance"], &[6, 50]);
        lexicon.add_term("désert", &[("étendue", 30.0)], &[], &[6, 15]);
        lexicon.add_term("Algérie", &[("pays", 90.0)], &["_INFO-SEM:lieu"], &[6, 15]);
        lexicon.add_term(
            "chaise",
            &[("siège", 70.0), ("meuble", 30.0)],
            &["_INFO-SEM:artefact"],
            &[6, 50],
        );
        lexicon.add_term(
            "fer",
            &[("matériau", 75.0), ("métal", 60.0)],
            &["_INFO-SEM:substance"],
            &[6, 50],
        );
        lexicon
    }

    fn corpus() -> Vec<LabeledPair> {
        vec![
            LabeledPair::new("tabouret", "bois", "r_objetmatiere"),
            LabeledPair::new("cuillère", "bois", "r_objetmatiere"),
            LabeledPair::new("désert", "Algérie", "r_lieu"),
        ]
    }

    fn knn_classifier(k: usize) -> Classifier<MockLexicon> {
        let config = ClassifierConfig {
            k,
            ..ClassifierConfig::default()
        };
        let mut classifier = Classifier::new(lexicon(), config);
        classifier.train(&corpus());
        classifier
    }

    #[test]
    fn test_knn_material_over_location() {
        let classifier = knn_classifier(2);
        assert_eq!(classifier.rule_count(), 3);

        let prediction = classifier.predict("chaise", "fer");
        assert_eq!(prediction.relation, "r_objetmatiere");
        assert!(prediction.score > 0.0);
    }

    #[test]
    fn test_knn_ranking_orders_by_vote() {
        // With k = 3 the location rule also votes, but far behind
        let classifier = knn_classifier(3);
        let ranked = classifier.predict_ranked("chaise", "fer", 5);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].relation, "r_objetmatiere");
        assert_eq!(ranked[1].relation, "r_lieu");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_empty_store_returns_unknown() {
        let classifier = Classifier::new(lexicon(), ClassifierConfig::default());

        let prediction = classifier.predict("chaise", "fer");
        assert_eq!(prediction.relation, UNKNOWN_RELATION);
        assert_eq!(prediction.score, 0.0);

        assert!(classifier.predict_ranked("chaise", "fer", 3).is_empty());
        assert!(classifier.explain("chaise", "fer", 3).is_empty());
    }

    #[test]
    fn test_zero_k_returns_unknown() {
        let classifier = knn_classifier(0);
        let prediction = classifier.predict("chaise", "fer");
        assert_eq!(prediction.relation, UNKNOWN_RELATION);
        assert!(classifier.predict_ranked("chaise", "fer", 3).is_empty());
    }

    #[test]
    fn test_unknown_pair_excluded_from_training() {
        let mut examples = corpus();
        examples.push(LabeledPair::new("mystère", "énigme", "r_topic"));

        let mut classifier = Classifier::new(lexicon(), ClassifierConfig::default());
        classifier.train(&examples);

        // The unknown-unknown pair creates no rule
        assert_eq!(classifier.rule_count(), 3);
        assert_eq!(classifier.skipped(), 1);

        // And predicting it yields the sentinel
        let prediction = classifier.predict("mystère", "énigme");
        assert_eq!(prediction.relation, UNKNOWN_RELATION);
        assert_eq!(prediction.score, 0.0);
    }

    #[test]
    fn test_partially_known_pair_still_scores() {
        let classifier = knn_classifier(5);
        // Unknown complement: only the left side carries features
        let prediction = classifier.predict("chaise", "inconnu");
        assert_eq!(prediction.relation, "r_objetmatiere");
        assert!(prediction.score > 0.0);
    }

    #[test]
    fn test_predicted_label_comes_from_training_data() {
        let classifier = knn_classifier(5);
        let trained = ["r_objetmatiere", "r_lieu"];

        for (a, b) in [
            ("chaise", "fer"),
            ("désert", "bois"),
            ("tabouret", "Algérie"),
            ("mystère", "énigme"),
        ] {
            let prediction = classifier.predict(a, b);
            assert!(
                trained.contains(&prediction.relation.as_str())
                    || prediction.relation == UNKNOWN_RELATION,
                "unexpected label {}",
                prediction.relation
            );
        }
    }

    #[test]
    fn test_repeated_predictions_are_identical() {
        let classifier = knn_classifier(3);

        let first = classifier.predict_ranked("chaise", "fer", 5);
        for _ in 0..5 {
            assert_eq!(classifier.predict_ranked("chaise", "fer", 5), first);
        }
    }

    #[test]
    fn test_fusion_mode_end_to_end() {
        let config = ClassifierConfig {
            mode: Mode::Fusion,
            ..ClassifierConfig::default()
        };
        let mut classifier = Classifier::new(lexicon(), config);
        classifier.train(&corpus());

        // The two material examples merge into one generalized rule
        assert_eq!(classifier.rule_count(), 2);

        let ranked = classifier.predict_ranked("chaise", "fer", 5);
        assert_eq!(ranked[0].relation, "r_objetmatiere");
        // Best-match scores are similarities, bounded by 1
        for prediction in &ranked {
            assert!(prediction.score <= 1.0);
        }
    }

    #[test]
    fn test_tied_votes_keep_first_seen_order() {
        let mut lexicon = MockLexicon::new();
        lexicon.add_term("roue", &[("pièce", 20.0)], &[], &[6]);
        lexicon.add_term("voiture", &[("véhicule", 88.0)], &[], &[6]);

        // The same pair trained under two labels yields two rules with
        // identical signatures, so both labels tie exactly on any query.
        // "r_own-1" is inserted first and sorts after "r_holo"
        // alphabetically, so order can only come from insertion.
        let examples = vec![
            LabeledPair::new("roue", "voiture", "r_own-1"),
            LabeledPair::new("roue", "voiture", "r_holo"),
        ];

        let mut classifier = Classifier::new(lexicon, ClassifierConfig::default());
        classifier.train(&examples);

        let ranked = classifier.predict_ranked("roue", "voiture", 5);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].score, ranked[1].score);
        // Tie broken by training insertion order, not alphabetically
        assert_eq!(ranked[0].relation, "r_own-1");
        assert_eq!(ranked[1].relation, "r_holo");
    }

    #[test]
    fn test_explain_reports_diagnostics() {
        let classifier = knn_classifier(3);
        let explanations = classifier.explain("chaise", "fer", 5);

        assert_eq!(explanations[0].relation, "r_objetmatiere");
        assert_eq!(explanations[0].votes, 2);
        assert!(explanations[0].best_sim_left > 0.0 && explanations[0].best_sim_left <= 1.0);
        assert!(explanations[0].best_sim_right > 0.0 && explanations[0].best_sim_right <= 1.0);

        // The linear explain aggregation differs from the squared voting:
        // squared votes shrink sub-1 scores, linear sums do not
        let votes = classifier.predict_ranked("chaise", "fer", 1);
        assert!(explanations[0].score > votes[0].score);
    }

    #[test]
    fn test_retraining_replaces_the_store() {
        let mut classifier = Classifier::new(lexicon(), ClassifierConfig::default());
        classifier.train(&corpus());
        assert_eq!(classifier.rule_count(), 3);

        classifier.train(&corpus()[..1].to_vec());
        assert_eq!(classifier.rule_count(), 1);
        assert_eq!(classifier.skipped(), 0);
    }

    #[test]
    fn test_weighted_training_still_ranks_material_first() {
        let config = ClassifierConfig {
            k: 2,
            weighted: true,
            ..ClassifierConfig::default()
        };
        let mut classifier = Classifier::new(lexicon(), config);
        classifier.train(&corpus());

        let prediction = classifier.predict("chaise", "fer");
        assert_eq!(prediction.relation, "r_objetmatiere");
    }
}
