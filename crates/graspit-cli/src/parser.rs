//! Genitive expression parsing.
//!
//! Splits a raw French expression ("dégâts de la tempête") on its genitive
//! marker into the (A, B) term pair. Several markers can occur in one
//! expression ("chef de gare de Lyon"); every cut point is produced and the
//! lexical source is consulted to prefer a cut whose both sides are known.

use graspit_domain::LexicalSource;

/// All candidate (A, B) cuts of an expression, left to right.
///
/// Markers: "de la", "de l'", "d'un", "d'une", "d'", "du", "des", "au",
/// "aux", "de". Articles consumed by the marker ("la", elided "l'") are not
/// part of B. Matching is case-insensitive; the sides keep their original
/// text.
pub fn genitive_cuts(expression: &str) -> Vec<(String, String)> {
    let tokens: Vec<&str> = expression.split_whitespace().collect();
    let mut cuts = Vec::new();

    for i in 1..tokens.len() {
        let marker = tokens[i].to_lowercase();
        let head = tokens[..i].join(" ");

        let complement = match marker.as_str() {
            "de" => {
                if i + 1 >= tokens.len() {
                    continue;
                }
                let next = tokens[i + 1].to_lowercase();
                if next == "la" {
                    // "de la" consumes the article
                    tokens.get(i + 2..).map(|rest| rest.join(" "))
                } else if let Some(elided) = strip_elision(tokens[i + 1], "l") {
                    // "de l'ouvrier" - B starts inside the token
                    Some(join_with_rest(elided, &tokens[i + 2..]))
                } else {
                    Some(tokens[i + 1..].join(" "))
                }
            }
            "du" | "des" | "au" | "aux" => tokens.get(i + 1..).map(|rest| rest.join(" ")),
            "d'un" | "d'une" | "d\u{2019}un" | "d\u{2019}une" => {
                tokens.get(i + 1..).map(|rest| rest.join(" "))
            }
            _ => {
                // "d'Algérie" - marker and B share one token
                strip_elision(tokens[i], "d")
                    .map(|elided| join_with_rest(elided, &tokens[i + 1..]))
            }
        };

        if let Some(complement) = complement {
            if !head.is_empty() && !complement.is_empty() {
                cuts.push((head, complement));
            }
        }
    }

    cuts
}

/// Strip an elided article prefix (`l'` / `d'`) from a token, keeping the
/// remainder's original case.
fn strip_elision<'a>(token: &'a str, article: &str) -> Option<&'a str> {
    let lower = token.to_lowercase();
    for apostrophe in ['\'', '\u{2019}'] {
        let prefix = format!("{}{}", article, apostrophe);
        if lower.starts_with(&prefix) {
            let rest = &token[prefix.len()..];
            if !rest.is_empty() {
                return Some(rest);
            }
        }
    }
    None
}

fn join_with_rest(first: &str, rest: &[&str]) -> String {
    if rest.is_empty() {
        first.to_string()
    } else {
        format!("{} {}", first, rest.join(" "))
    }
}

/// Resolve an expression to one (A, B) pair.
///
/// With a single cut, that cut is returned. With several, the first cut
/// whose both sides are known to the lexical source wins; when none
/// qualifies, the first cut is the fallback. `None` when the expression has
/// no genitive marker.
pub fn resolve_pair<L: LexicalSource>(
    expression: &str,
    source: &L,
) -> Option<(String, String)> {
    let cuts = genitive_cuts(expression);

    if cuts.len() > 1 {
        for (head, complement) in &cuts {
            if source.knows(head) && source.knows(complement) {
                return Some((head.clone(), complement.clone()));
            }
        }
    }

    cuts.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use graspit_jdm::MockLexicon;

    fn cut(expression: &str) -> (String, String) {
        let cuts = genitive_cuts(expression);
        assert_eq!(cuts.len(), 1, "expected a single cut for '{}'", expression);
        cuts.into_iter().next().unwrap()
    }

    #[test]
    fn test_plain_de() {
        assert_eq!(cut("tour de Pise"), ("tour".into(), "Pise".into()));
    }

    #[test]
    fn test_de_la_consumes_article() {
        assert_eq!(
            cut("dégâts de la tempête"),
            ("dégâts".into(), "tempête".into())
        );
    }

    #[test]
    fn test_elided_articles() {
        assert_eq!(cut("désert d'Algérie"), ("désert".into(), "Algérie".into()));
        assert_eq!(cut("peur de l'orage"), ("peur".into(), "orage".into()));
        assert_eq!(
            cut("grève de l'usine Renault"),
            ("grève".into(), "usine Renault".into())
        );
    }

    #[test]
    fn test_contracted_articles() {
        assert_eq!(cut("vin du Portugal"), ("vin".into(), "Portugal".into()));
        assert_eq!(cut("champ des possibles"), ("champ".into(), "possibles".into()));
        assert_eq!(cut("tarte aux pommes"), ("tarte".into(), "pommes".into()));
    }

    #[test]
    fn test_d_un_d_une() {
        assert_eq!(cut("maison d'un homme"), ("maison".into(), "homme".into()));
        assert_eq!(cut("robe d'une femme"), ("robe".into(), "femme".into()));
    }

    #[test]
    fn test_typographic_apostrophe() {
        assert_eq!(
            cut("désert d\u{2019}Algérie"),
            ("désert".into(), "Algérie".into())
        );
    }

    #[test]
    fn test_no_marker_yields_nothing() {
        assert!(genitive_cuts("bonjour tout le monde").is_empty());
        assert!(genitive_cuts("tempête").is_empty());
        assert!(genitive_cuts("").is_empty());
    }

    #[test]
    fn test_marker_needs_both_sides() {
        assert!(genitive_cuts("de Pise").is_empty());
        assert!(genitive_cuts("tour de").is_empty());
    }

    #[test]
    fn test_multiple_cuts_in_order() {
        let cuts = genitive_cuts("chef de gare de Lyon");
        assert_eq!(
            cuts,
            vec![
                ("chef".to_string(), "gare de Lyon".to_string()),
                ("chef de gare".to_string(), "Lyon".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolve_prefers_known_cut() {
        let mut lexicon = MockLexicon::new();
        lexicon.add_term("chef de gare", &[("métier", 10.0)], &[], &[6]);
        lexicon.add_term("Lyon", &[("ville", 70.0)], &[], &[6]);

        let resolved = resolve_pair("chef de gare de Lyon", &lexicon);
        assert_eq!(resolved, Some(("chef de gare".into(), "Lyon".into())));
    }

    #[test]
    fn test_resolve_falls_back_to_first_cut() {
        let lexicon = MockLexicon::new();
        let resolved = resolve_pair("chef de gare de Lyon", &lexicon);
        assert_eq!(resolved, Some(("chef".into(), "gare de Lyon".into())));
    }

    #[test]
    fn test_resolve_single_cut_skips_lookup() {
        let lexicon = MockLexicon::new();
        let resolved = resolve_pair("tour de Pise", &lexicon);
        assert_eq!(resolved, Some(("tour".into(), "Pise".into())));
        // Single cuts are accepted without consulting the source
        assert_eq!(lexicon.read_count(), 0);
    }
}
