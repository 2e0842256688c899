//! X/Y column resolution from a header
//!
//! Each role is resolved independently with three rules, first hit wins:
//! 1. exact match on the trimmed name (case and symbols preserved)
//! 2. normalised match against the role's synonyms, in synonym order
//! 3. normalised prefix match against the role's first synonym
//!
//! The Y role never selects the column already taken by the X role.

use super::normalize::{NormalizedSynonyms, normalize_name};
use crate::app::models::{CoordinateRole, Header, ResolvedColumns};
use crate::{Error, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Rule that produced a column match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchRule {
    Exact,
    Synonym,
    Prefix,
}

/// Resolver for the X and Y coordinate columns
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    x_synonyms: NormalizedSynonyms,
    y_synonyms: NormalizedSynonyms,
    exact_x: String,
    exact_y: String,
}

impl ColumnResolver {
    /// Create a resolver from synonym lists and exact preferred names
    pub fn new<S: AsRef<str>>(
        x_synonyms: &[S],
        y_synonyms: &[S],
        exact_x: impl Into<String>,
        exact_y: impl Into<String>,
    ) -> Self {
        Self {
            x_synonyms: NormalizedSynonyms::new(x_synonyms),
            y_synonyms: NormalizedSynonyms::new(y_synonyms),
            exact_x: exact_x.into().trim().to_string(),
            exact_y: exact_y.into().trim().to_string(),
        }
    }

    pub fn x_synonyms(&self) -> &NormalizedSynonyms {
        &self.x_synonyms
    }

    pub fn y_synonyms(&self) -> &NormalizedSynonyms {
        &self.y_synonyms
    }

    /// Resolve both coordinate columns
    ///
    /// Fails with [`Error::ColumnNotFound`] naming every unresolved role and
    /// listing the full header.
    pub fn resolve(&self, header: &Header) -> Result<ResolvedColumns> {
        let x_match = self.find_column(header, CoordinateRole::X, None);
        let y_match = self.find_column(header, CoordinateRole::Y, x_match.map(|(index, _)| index));

        match (x_match, y_match) {
            (Some((x_index, x_rule)), Some((y_index, y_rule))) => {
                let resolved = ResolvedColumns::new(header, x_index, y_index)?;
                info!(
                    "Resolved coordinate columns: X = '{}' ({:?}), Y = '{}' ({:?})",
                    resolved.x_name(),
                    x_rule,
                    resolved.y_name(),
                    y_rule
                );
                Ok(resolved)
            }
            (x_match, y_match) => {
                let missing = [
                    (x_match.is_none(), CoordinateRole::X),
                    (y_match.is_none(), CoordinateRole::Y),
                ]
                .into_iter()
                .filter_map(|(missing, role)| missing.then_some(role))
                .collect();
                Err(Error::column_not_found(missing, header))
            }
        }
    }

    /// Find the column for one role, skipping `exclude`
    ///
    /// Returns `None` when no rule matches; the caller decides whether that is fatal.
    pub fn find_column(
        &self,
        header: &Header,
        role: CoordinateRole,
        exclude: Option<usize>,
    ) -> Option<(usize, MatchRule)> {
        let (exact, synonyms) = match role {
            CoordinateRole::X => (&self.exact_x, &self.x_synonyms),
            CoordinateRole::Y => (&self.exact_y, &self.y_synonyms),
        };

        let candidates: Vec<(usize, &str, String)> = header
            .names()
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != exclude)
            .map(|(index, name)| (index, name.as_str(), normalize_name(name)))
            .collect();

        if let Some((index, _, _)) = candidates
            .iter()
            .find(|(_, name, _)| !exact.is_empty() && name.trim() == exact)
        {
            return Some((*index, MatchRule::Exact));
        }

        for synonym in synonyms.iter() {
            if let Some((index, _, _)) = candidates
                .iter()
                .find(|(_, _, normalized)| normalized == synonym)
            {
                return Some((*index, MatchRule::Synonym));
            }
        }

        let anchor = synonyms.anchor()?;
        let found = candidates
            .iter()
            .find(|(_, _, normalized)| normalized.starts_with(anchor))
            .map(|(index, _, _)| (*index, MatchRule::Prefix));

        if let Some((index, _)) = found {
            debug!(
                "{} column resolved by prefix '{}' to '{}'",
                role,
                anchor,
                header.name(index).unwrap_or_default()
            );
        }

        found
    }
}
