//! Product alias table
//!
//! Maps surface forms - synonyms, abbreviations, regional Tamil
//! transliterations - to canonical product keys. Targets are
//! [`ProductKey`] values, so alias chains cannot exist. Surfaces are
//! checked longest-first so specific phrases ("3 oil combo") win over
//! generic substrings of themselves ("combo").

use serde::{Deserialize, Serialize};
use std::path::Path;

use isvaryam_core::ProductKey;

use crate::ConfigError;

/// One alias mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Surface form as it may appear in user text (lowercase)
    pub surface: String,
    /// Canonical target
    pub target: ProductKey,
}

/// Immutable alias table, longest surface first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasTable {
    pub entries: Vec<AliasEntry>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let entries = [
            // Combo pack synonyms
            ("combo pack", ProductKey::SuperPack),
            ("oil combo", ProductKey::SuperPack),
            ("3 oil combo", ProductKey::SuperPack),
            ("combo", ProductKey::SuperPack),
            // English synonyms
            ("sugar", ProductKey::JaggeryPowder),
            ("jaggery", ProductKey::JaggeryPowder),
            ("peanut oil", ProductKey::GroundnutOil),
            ("gingelly oil", ProductKey::SesameOil),
            ("til oil", ProductKey::SesameOil),
            ("clarified butter", ProductKey::Ghee),
            // Tamil transliterations
            ("kadalai ennai", ProductKey::GroundnutOil),
            ("thengai ennai", ProductKey::CoconutOil),
            ("ellu ennai", ProductKey::SesameOil),
            ("nallennai", ProductKey::SesameOil),
            ("nei", ProductKey::Ghee),
            ("vellam", ProductKey::JaggeryPowder),
            ("sakkarai", ProductKey::JaggeryPowder),
            ("naattu sakkarai", ProductKey::JaggeryPowder),
        ];
        let mut table = Self {
            entries: entries
                .into_iter()
                .map(|(surface, target)| AliasEntry {
                    surface: surface.to_string(),
                    target,
                })
                .collect(),
        };
        table.sort_longest_first();
        table
    }
}

impl AliasTable {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound {
                path: path.as_ref().display().to_string(),
                source: e,
            }
        })?;
        let mut table: Self = serde_yaml::from_str(&content)?;
        table.sort_longest_first();
        Ok(table)
    }

    fn sort_longest_first(&mut self) {
        self.entries
            .sort_by(|a, b| b.surface.len().cmp(&a.surface.len()).then(a.surface.cmp(&b.surface)));
    }

    /// Resolve by containment: first (longest) surface contained in text
    pub fn resolve(&self, text: &str) -> Option<&AliasEntry> {
        self.entries
            .iter()
            .find(|e| text.contains(e.surface.as_str()))
    }

    /// Surface form and target pairs, for the fuzzy candidate set
    pub fn candidates(&self) -> impl Iterator<Item = (&str, ProductKey)> {
        self.entries.iter().map(|e| (e.surface.as_str(), e.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_resolves_to_its_target() {
        let table = AliasTable::default();
        for entry in table.entries.clone() {
            let text = format!("tell me about {}", entry.surface);
            let hit = table.resolve(&text).unwrap();
            assert_eq!(hit.target, entry.target, "alias {}", entry.surface);
        }
    }

    #[test]
    fn test_longer_surface_wins_over_substring() {
        let table = AliasTable::default();
        // "3 oil combo" contains "combo"; both target super pack, but the
        // specific phrase must be the one checked first.
        let hit = table.resolve("price of 3 oil combo").unwrap();
        assert_eq!(hit.surface, "3 oil combo");
    }

    #[test]
    fn test_no_match() {
        let table = AliasTable::default();
        assert!(table.resolve("do you sell mustard oil").is_none());
    }

    #[test]
    fn test_candidates_cover_every_surface() {
        let table = AliasTable::default();
        let candidates: Vec<(&str, ProductKey)> = table.candidates().collect();
        assert_eq!(candidates.len(), table.entries.len());
        assert!(candidates.iter().any(|(s, t)| *s == "vellam" && *t == ProductKey::JaggeryPowder));
    }
}
