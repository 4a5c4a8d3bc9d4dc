use crate::matcher::{catalog::Catalog, distance::levenshtein, normalize::normalize};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Highest fuzzy score still accepted as a match. Absolute, so it does not
/// scale with name length.
pub const MAX_FUZZY_SCORE: f64 = 2.5;

/// Applied to the edit distance when one key contains the other, before the
/// threshold check
pub const SUBSTRING_BIAS: f64 = 0.5;

/// Outcome of resolving a whole query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    /// Canonical ingredient names, first occurrence order, no duplicates
    pub mapped: Vec<String>,
    /// Raw terms exactly as the user typed them
    pub unknown: Vec<String>,
}

/// How a single raw term was (or was not) matched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TermResolution {
    /// Normalized to nothing; ignored
    Dropped,
    Exact { name: String },
    Fuzzy { name: String, score: f64 },
    /// `best` is the closest candidate that missed the threshold, if any
    Unknown { best: Option<(String, f64)> },
}

impl TermResolution {
    /// The canonical name this term resolved to
    pub fn name(&self) -> Option<&str> {
        match self {
            TermResolution::Exact { name } | TermResolution::Fuzzy { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }
}

fn fuzzy_score(query: &str, candidate: &str) -> f64 {
    let distance = levenshtein(query, candidate) as f64;
    if candidate.contains(query) || query.contains(candidate) {
        distance * SUBSTRING_BIAS
    } else {
        distance
    }
}

/// Resolve one raw term against the catalog.
///
/// Exact normalized hits win outright. Otherwise every ingredient is scored
/// (linear scan, in sorted order, first lowest score wins) and the best one
/// is accepted when it scores at most [`MAX_FUZZY_SCORE`].
pub fn resolve_term(catalog: &Catalog, raw: &str) -> TermResolution {
    let key = normalize(raw);
    if key.is_empty() {
        return TermResolution::Dropped;
    }

    if let Some(name) = catalog.canonical(&key) {
        return TermResolution::Exact {
            name: name.to_string(),
        };
    }

    let mut best: Option<(&str, f64)> = None;
    for candidate in catalog.candidates() {
        let score = fuzzy_score(&key, &candidate.key);
        if best.map_or(true, |(_, best_score)| score < best_score) {
            best = Some((candidate.name.as_str(), score));
        }
    }

    match best {
        Some((name, score)) if score <= MAX_FUZZY_SCORE => TermResolution::Fuzzy {
            name: name.to_string(),
            score,
        },
        best => TermResolution::Unknown {
            best: best.map(|(name, score)| (name.to_string(), score)),
        },
    }
}

/// Resolve a list of raw terms into canonical ingredient names.
///
/// Never fails: each term is mapped, reported unknown, or dropped when it
/// normalizes to an empty key.
pub fn resolve<S: AsRef<str>>(catalog: &Catalog, raw_terms: &[S]) -> Resolution {
    let mut resolution = Resolution::default();
    let mut seen = HashSet::new();

    for raw in raw_terms {
        let raw = raw.as_ref();
        let outcome = resolve_term(catalog, raw);
        debug!("Resolved term {:?}: {:?}", raw, outcome);

        match outcome {
            TermResolution::Dropped => {}
            TermResolution::Exact { name } | TermResolution::Fuzzy { name, .. } => {
                if seen.insert(name.clone()) {
                    resolution.mapped.push(name);
                }
            }
            TermResolution::Unknown { .. } => resolution.unknown.push(raw.to_string()),
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(rows: &str) -> Catalog {
        let data = format!("input1_name,input2_name,input3_name,output_name,output_qty\n{rows}");
        Catalog::from_reader(data.as_bytes()).unwrap()
    }

    fn brine() -> Catalog {
        catalog("Salt,Water,,Brine,2\n")
    }

    #[test]
    fn test_exact_match() {
        let resolution = resolve(&brine(), &["salt", "water"]);

        assert_eq!(resolution.mapped, vec!["Salt", "Water"]);
        assert!(resolution.unknown.is_empty());
    }

    #[test]
    fn test_typo_resolves_fuzzily() {
        let outcome = resolve_term(&brine(), "saltt");

        // "salt" is a substring of "saltt": distance 1, halved
        assert_eq!(
            outcome,
            TermResolution::Fuzzy {
                name: "Salt".to_string(),
                score: 0.5
            }
        );
    }

    #[test]
    fn test_unrelated_term_is_unknown() {
        let resolution = resolve(&brine(), &["xyz123unrelated"]);

        assert!(resolution.mapped.is_empty());
        assert_eq!(resolution.unknown, vec!["xyz123unrelated"]);
    }

    #[test]
    fn test_empty_input() {
        let resolution = resolve::<&str>(&brine(), &[]);
        assert_eq!(resolution, Resolution::default());
    }

    #[test]
    fn test_blank_terms_are_dropped() {
        let resolution = resolve(&brine(), &["   ", "★", "salt"]);

        assert_eq!(resolution.mapped, vec!["Salt"]);
        assert!(resolution.unknown.is_empty());
        assert_eq!(resolve_term(&brine(), "  "), TermResolution::Dropped);
    }

    #[test]
    fn test_accents_and_case_resolve_exactly() {
        let catalog = catalog("Crème Fraîche,,,Sauce,1\n");
        assert_eq!(
            resolve_term(&catalog, "CREME FRAICHE"),
            TermResolution::Exact {
                name: "Crème Fraîche".to_string()
            }
        );
    }

    #[test]
    fn test_exact_match_beats_closer_fuzzy_candidate() {
        // "Sal" normalizes exactly onto the "Sal" ingredient even though it
        // is also a substring of "Salt"
        let catalog = catalog("Sal,,,A,1\nSalt,,,B,1\n");
        assert_eq!(
            resolve_term(&catalog, "sal"),
            TermResolution::Exact {
                name: "Sal".to_string()
            }
        );
    }

    #[test]
    fn test_mapped_is_deduplicated_in_first_seen_order() {
        let resolution = resolve(&brine(), &["water", "Salt", "WATER", "saltt", "salt"]);

        assert_eq!(resolution.mapped, vec!["Water", "Salt"]);
    }

    #[test]
    fn test_unknown_keeps_raw_text_and_order() {
        let resolution = resolve(&brine(), &["  Dragon Egg ", "salt", "Unobtainium"]);

        assert_eq!(resolution.unknown, vec!["  Dragon Egg ", "Unobtainium"]);
    }

    #[test]
    fn test_fuzzy_threshold() {
        // distance("abcdefgh", "abcdefxy") = 2, no substring relation
        let catalog = catalog("abcdefxy,,,A,1\n");
        assert_eq!(
            resolve_term(&catalog, "abcdefgh").name(),
            Some("abcdefxy")
        );

        // distance 3 misses
        let outcome = resolve_term(&catalog, "abcdewgh");
        assert_eq!(
            outcome,
            TermResolution::Unknown {
                best: Some(("abcdefxy".to_string(), 3.0))
            }
        );
    }

    #[test]
    fn test_substring_bias_applies_before_threshold() {
        // "sugar" inside "sugar cane": distance 5 halved to 2.5, accepted
        let cane = catalog("Sugar Cane,,,A,1\n");
        assert_eq!(
            resolve_term(&cane, "sugar"),
            TermResolution::Fuzzy {
                name: "Sugar Cane".to_string(),
                score: 2.5
            }
        );

        // one more character: 6 halved to 3.0, rejected
        let canes = catalog("Sugar Canes,,,A,1\n");
        assert_eq!(resolve_term(&canes, "sugar").name(), None);
    }

    #[test]
    fn test_ties_go_to_first_sorted_candidate() {
        // "bat" is one substitution from both; "Cat" sorts first
        let catalog = catalog("Rat,,,A,1\nCat,,,B,1\n");
        assert_eq!(resolve_term(&catalog, "bat").name(), Some("Cat"));
    }

    #[test]
    fn test_empty_catalog_candidates_yield_unknown() {
        // Every row skipped: no candidates at all
        let catalog = catalog(",,,A,1\n");
        assert_eq!(
            resolve_term(&catalog, "salt"),
            TermResolution::Unknown { best: None }
        );
    }
}
