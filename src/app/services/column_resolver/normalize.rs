//! Column name normalisation
//!
//! Names are compared after case-folding and removing every character that is
//! not alphanumeric, so `"Coord. X"`, `"coord_x"` and `"COORDX"` all compare equal.

use std::collections::HashSet;

/// Case-fold a name and strip everything but alphanumerics
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Synonym list in normalised form, keeping the original order
///
/// Synonyms that normalise to an empty string are discarded since they would
/// match every blank-ish header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSynonyms {
    ordered: Vec<String>,
    lookup: HashSet<String>,
}

impl NormalizedSynonyms {
    pub fn new<S: AsRef<str>>(synonyms: &[S]) -> Self {
        let mut ordered = Vec::with_capacity(synonyms.len());
        let mut lookup = HashSet::with_capacity(synonyms.len());

        for synonym in synonyms {
            let normalized = normalize_name(synonym.as_ref());
            if !normalized.is_empty() && lookup.insert(normalized.clone()) {
                ordered.push(normalized);
            }
        }

        Self { ordered, lookup }
    }

    /// Add an extra candidate at the end of the list
    pub fn with_extra(mut self, name: &str) -> Self {
        let normalized = normalize_name(name);
        if !normalized.is_empty() && self.lookup.insert(normalized.clone()) {
            self.ordered.push(normalized);
        }
        self
    }

    /// Whether an already-normalised name is one of the synonyms
    pub fn contains(&self, normalized: &str) -> bool {
        self.lookup.contains(normalized)
    }

    /// Synonyms in priority order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    /// The first-listed synonym, used as the prefix fallback anchor
    pub fn anchor(&self) -> Option<&str> {
        self.ordered.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Coord. X"), "coordx");
        assert_eq!(normalize_name(" CRTM05_Y "), "crtm05y");
        assert_eq!(normalize_name("Coordenada-Este (m)"), "coordenadaestem");
        assert_eq!(normalize_name("Año"), "año");
        assert_eq!(normalize_name("--"), "");
    }

    #[test]
    fn test_synonyms_drop_empty_and_duplicates() {
        let synonyms = NormalizedSynonyms::new(&["X", "--", "x", "Este"]);

        assert_eq!(synonyms.iter().collect::<Vec<_>>(), vec!["x", "este"]);
        assert_eq!(synonyms.anchor(), Some("x"));
        assert!(synonyms.contains("este"));
        assert!(!synonyms.contains("Este"));
    }

    #[test]
    fn test_with_extra_appends_once() {
        let synonyms = NormalizedSynonyms::new(&["este"])
            .with_extra("Este")
            .with_extra("X_Local");

        assert_eq!(synonyms.iter().collect::<Vec<_>>(), vec!["este", "xlocal"]);
    }
}
