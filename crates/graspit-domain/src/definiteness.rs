//! Surface-level definiteness detection on the complement term
//!
//! The determiner opening the B side of "A de B" carries signal for several
//! relation types (named entities tend to appear bare, materials bare,
//! possessions with a definite article). Detection is purely surface-level:
//! no lexicon access, just the leading determiner of the raw text.

/// Definiteness of a complement term, derived from its leading determiner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definiteness {
    /// Definite determiner (le, la, les, l', du, des, au, aux)
    Definite,
    /// Indefinite determiner (un, une)
    Indefinite,
    /// No determiner
    None,
}

impl Definiteness {
    /// The symbol-set token injected into a pair's right-hand set
    pub fn token(self) -> &'static str {
        match self {
            Definiteness::Definite => "DEF:DEF",
            Definiteness::Indefinite => "DEF:INDEF",
            Definiteness::None => "DEF:NONE",
        }
    }
}

// Longest-first so "les"/"des" win over "le"/"de"-like prefixes, and the
// bare elided "l" is tried last.
const DETERMINERS: [&str; 10] = [
    "les", "des", "aux", "une", "le", "la", "du", "au", "un", "l",
];

const DEFINITE: [&str; 8] = ["le", "la", "les", "l", "du", "des", "au", "aux"];

/// Detect the definiteness of a complement term from its raw surface text.
///
/// A determiner only counts when followed by a space or an apostrophe
/// ("la France" is definite, "lave" is not). "des" is treated as definite.
///
/// # Examples
///
/// ```
/// use graspit_domain::{detect_definiteness, Definiteness};
///
/// assert_eq!(detect_definiteness("la France"), Definiteness::Definite);
/// assert_eq!(detect_definiteness("l'ouvrier"), Definiteness::Definite);
/// assert_eq!(detect_definiteness("une femme"), Definiteness::Indefinite);
/// assert_eq!(detect_definiteness("bois"), Definiteness::None);
/// ```
pub fn detect_definiteness(text: &str) -> Definiteness {
    let lower = text.trim().to_lowercase();

    for det in DETERMINERS {
        if let Some(rest) = lower.strip_prefix(det) {
            let followed = matches!(rest.chars().next(), Some(' ') | Some('\'') | Some('\u{2019}'));
            if followed {
                return if DEFINITE.contains(&det) {
                    Definiteness::Definite
                } else {
                    Definiteness::Indefinite
                };
            }
        }
    }

    Definiteness::None
}
