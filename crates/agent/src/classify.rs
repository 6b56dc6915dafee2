//! Multi-label intent classification
//!
//! Scans the normalized text against the ordered rule table and returns
//! every intent whose trigger phrases matched. Ties are not resolved
//! here; terminal precedence belongs to the composer.

use std::sync::Arc;

use isvaryam_config::IntentRules;
use isvaryam_core::Intent;

/// Rule-table classifier
#[derive(Clone)]
pub struct IntentClassifier {
    rules: Arc<IntentRules>,
}

impl IntentClassifier {
    pub fn new(rules: Arc<IntentRules>) -> Self {
        Self { rules }
    }

    /// All matched intents, in rule priority order
    pub fn classify(&self, text: &str) -> Vec<Intent> {
        let mut matched: Vec<Intent> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(text))
            .map(|rule| rule.intent)
            .collect();
        matched.dedup();
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(Arc::new(IntentRules::default()))
    }

    #[test]
    fn test_multi_label() {
        let intents = classifier().classify(&normalize("price and benefits of ghee").text);
        assert!(intents.contains(&Intent::Price));
        assert!(intents.contains(&Intent::Benefits));
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(classifier().classify("xyzzy plugh").is_empty());
    }

    #[test]
    fn test_substring_false_positive_documented() {
        // "buy" matches inside "buying" by containment; rule-design
        // behavior, resolved by composer precedence.
        let intents = classifier().classify(&normalize("thinking of buying later").text);
        assert!(intents.contains(&Intent::Order));
    }

    #[test]
    fn test_transliterated_trigger() {
        let intents = classifier().classify(&normalize("sukkar vilai").text);
        assert!(intents.contains(&Intent::Price));
    }
}
