//! Product entity resolution
//!
//! Three tiers, first success wins:
//! 1. canonical display-name containment
//! 2. alias/transliteration containment (longest surface first)
//! 3. approximate match against canonical names ∪ alias surfaces:
//!    whole phrase at ratio >= 0.6, then per token at >= 0.8 - short
//!    single words need the tighter bar to avoid spurious matches.
//!
//! Resolution is deterministic for a given input and table set and
//! never mutates shared state. Unresolvable input yields `None`.

use std::sync::Arc;

use isvaryam_config::AliasTable;
use isvaryam_core::ProductKey;

use crate::normalize::Normalized;

/// Similarity threshold for the whole normalized phrase
const PHRASE_THRESHOLD: f32 = 0.6;
/// Stricter threshold for the per-token retry
const TOKEN_THRESHOLD: f32 = 0.8;

/// Which tier produced the resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    /// Canonical display name contained in the text
    Exact,
    /// Alias surface form contained in the text
    Alias,
    /// Closest-match fallback
    Fuzzy,
}

/// A resolved product with the surface that matched
#[derive(Debug, Clone)]
pub struct ResolvedProduct {
    pub key: ProductKey,
    pub tier: ResolutionTier,
    /// The canonical name or alias surface that matched
    pub matched: String,
}

impl ResolvedProduct {
    /// Whether this came from a containment tier (exact or alias)
    pub fn is_containment(&self) -> bool {
        self.tier != ResolutionTier::Fuzzy
    }
}

/// Three-tier product resolver
#[derive(Clone)]
pub struct EntityResolver {
    aliases: Arc<AliasTable>,
    /// Fuzzy candidate set: lowercased canonical names ∪ alias surfaces
    candidates: Vec<(String, ProductKey)>,
}

impl EntityResolver {
    pub fn new(aliases: Arc<AliasTable>) -> Self {
        let mut candidates: Vec<(String, ProductKey)> = ProductKey::ALL
            .iter()
            .map(|k| (k.display_name().to_lowercase(), *k))
            .collect();
        candidates.extend(
            aliases
                .candidates()
                .map(|(surface, target)| (surface.to_string(), target)),
        );
        Self { aliases, candidates }
    }

    /// Resolve the product a message refers to, if any
    pub fn resolve(&self, message: &Normalized) -> Option<ResolvedProduct> {
        let text = message.text.as_str();

        // Tier 1: canonical display name containment
        for key in ProductKey::ALL {
            let name = key.display_name().to_lowercase();
            if text.contains(name.as_str()) {
                return Some(ResolvedProduct {
                    key,
                    tier: ResolutionTier::Exact,
                    matched: name,
                });
            }
        }

        // Tier 2: alias containment, longest surface first
        if let Some(entry) = self.aliases.resolve(text) {
            return Some(ResolvedProduct {
                key: entry.target,
                tier: ResolutionTier::Alias,
                matched: entry.surface.clone(),
            });
        }

        // Tier 3a: whole phrase against the candidate set
        if let Some((surface, key)) = self.best_match(text, PHRASE_THRESHOLD) {
            return Some(ResolvedProduct {
                key,
                tier: ResolutionTier::Fuzzy,
                matched: surface,
            });
        }

        // Tier 3b: per-token retry with the stricter bar
        for token in &message.tokens {
            if let Some((surface, key)) = self.best_match(token, TOKEN_THRESHOLD) {
                return Some(ResolvedProduct {
                    key,
                    tier: ResolutionTier::Fuzzy,
                    matched: surface,
                });
            }
        }

        None
    }

    /// First best candidate at or above `threshold`
    fn best_match(&self, query: &str, threshold: f32) -> Option<(String, ProductKey)> {
        let mut best: Option<(f32, &(String, ProductKey))> = None;
        for candidate in &self.candidates {
            let score = similarity(query, &candidate.0);
            if score >= threshold && best.map_or(true, |(s, _)| score > s) {
                best = Some((score, candidate));
            }
        }
        best.map(|(_, (surface, key))| (surface.clone(), *key))
    }
}

/// Similarity ratio in [0, 1], approximating difflib's
/// `SequenceMatcher.ratio` from Levenshtein distance
fn similarity(a: &str, b: &str) -> f32 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 && len_b == 0 {
        return 1.0;
    }
    let max_len = len_a.max(len_b);
    let dist = levenshtein(a, b).min(max_len);
    2.0 * (max_len - dist) as f32 / (len_a + len_b) as f32
}

/// Levenshtein edit distance, two-row rolling matrix
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}
