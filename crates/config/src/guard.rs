//! Content guard vocabulary
//!
//! Two token sets: disallowed (abusive) vocabulary and off-topic
//! vocabulary for domains the assistant should not wander into, plus
//! the pool of redirect messages returned when input is blocked.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::ConfigError;

/// Guard vocabulary and redirect pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardLists {
    /// Abusive/offensive tokens
    pub disallowed: HashSet<String>,
    /// Off-topic tokens (unrelated domains)
    pub off_topic: HashSet<String>,
    /// Redirect messages, one picked at random when blocked
    pub redirects: Vec<String>,
}

impl Default for GuardLists {
    fn default() -> Self {
        let disallowed = [
            "stupid", "idiot", "nonsense", "shut", "dumb", "useless",
            "hate", "scam", "fraud", "cheat",
        ];
        let off_topic = [
            "politics", "election", "cricket", "football", "movie",
            "stock", "bitcoin", "crypto", "loan", "visa", "weather",
        ];
        let redirects = [
            "Let's keep things friendly! I can help you with our oils, ghee and jaggery.",
            "I'd rather talk about our products - ask me about prices, ingredients or delivery.",
            "That's outside what I can help with. Try asking about our oils or how to order!",
        ];
        Self {
            disallowed: disallowed.iter().map(|s| s.to_string()).collect(),
            off_topic: off_topic.iter().map(|s| s.to_string()).collect(),
            redirects: redirects.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GuardLists {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound {
                path: path.as_ref().display().to_string(),
                source: e,
            }
        })?;
        let lists: Self = serde_yaml::from_str(&content)?;
        lists.validate()?;
        Ok(lists)
    }

    /// Validate: a blocked verdict needs at least one redirect to return
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.redirects.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "guard.redirects".to_string(),
                message: "redirect pool must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Whether a token is in either vocabulary
    pub fn is_flagged(&self, token: &str) -> bool {
        self.disallowed.contains(token) || self.off_topic.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let lists = GuardLists::default();
        assert!(lists.validate().is_ok());
        assert!(lists.is_flagged("cricket"));
        assert!(lists.is_flagged("scam"));
        assert!(!lists.is_flagged("ghee"));
    }
}
