//! Intent rule tables
//!
//! One rule per intent: a set of trigger phrases tested by whole
//! substring containment against the normalized message. The classifier
//! is multi-label; priority only fixes evaluation (and hence reporting)
//! order, terminal precedence belongs to the composer.
//!
//! Known edge case, inherited from the rule design: single-token
//! triggers match inside longer words ("rate" fires within "rating",
//! "buy" within "buying"). Tested explicitly rather than silently
//! changed.

use serde::{Deserialize, Serialize};
use std::path::Path;

use isvaryam_core::Intent;

use crate::ConfigError;

/// One intent with its trigger phrases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRule {
    /// Intent fired when any phrase matches
    pub intent: Intent,
    /// Whole substrings tested against the normalized text
    pub trigger_phrases: Vec<String>,
    /// Evaluation order; lower evaluates first
    #[serde(default)]
    pub priority: u8,
}

impl IntentRule {
    fn new(intent: Intent, priority: u8, phrases: &[&str]) -> Self {
        Self {
            intent,
            trigger_phrases: phrases.iter().map(|p| p.to_string()).collect(),
            priority,
        }
    }

    /// Whether any trigger phrase is contained in the text
    pub fn matches(&self, text: &str) -> bool {
        self.trigger_phrases.iter().any(|p| text.contains(p.as_str()))
    }
}

/// Ordered intent rule table, immutable after startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRules {
    pub rules: Vec<IntentRule>,
}

impl Default for IntentRules {
    fn default() -> Self {
        let mut rules = vec![
            IntentRule::new(Intent::Greeting, 0, &[
                "hi", "hello", "good morning", "good evening", "good afternoon",
                "hey", "yo", "hola", "what's up", "vanakkam", "namaste",
            ]),
            IntentRule::new(Intent::SmallTalk, 1, &[
                "are you real", "can i marry you", "what's your name", "do you love me",
                "you single", "can you cook", "sing a song", "tell a joke",
                "you look nice", "you cute", "what is 0/0", "do you sleep",
                "are you ai", "how are you", "how do you know this", "what are you",
            ]),
            // Catalog-wide aggregates
            IntentRule::new(Intent::AllPrices, 2, &[
                "product price", "all prices", "prices of products", "cost of all",
                "price list",
            ]),
            IntentRule::new(Intent::AllImages, 2, &[
                "all images", "show all images", "product images", "pictures of products",
                "show products visually", "display items",
            ]),
            IntentRule::new(Intent::ProductList, 2, &[
                "products", "what do you have", "show all", "available items",
                "list items", "what can i buy", "items available",
            ]),
            IntentRule::new(Intent::ProductTypes, 2, &[
                "types of oil", "oil types", "types of products", "products offered",
                "what do you sell", "offered by isvaryam", "range of oils",
            ]),
            IntentRule::new(Intent::AllReviews, 2, &[
                "reviews", "product reviews", "show reviews", "customer feedback",
                "testimonials",
            ]),
            IntentRule::new(Intent::AllRatings, 2, &[
                "ratings", "rate all", "average rating", "all ratings",
            ]),
            // Generic catalog queries
            IntentRule::new(Intent::Contact, 3, &[
                "location", "where is isvaryam", "where is your store", "store address",
                "address", "location of company", "contact", "phone", "email",
                "reach you",
            ]),
            IntentRule::new(Intent::Delivery, 3, &[
                "delivery", "shipping", "how many days", "when will it reach",
                "delivery time", "how fast",
            ]),
            IntentRule::new(Intent::Order, 3, &[
                "how to order", "place an order", "order now", "buy", "want to buy",
                "book", "purchase", "make a purchase",
            ]),
            IntentRule::new(Intent::Tracking, 3, &[
                "track", "tracking", "track my order", "where is my order",
                "order status", "check order", "tracking details", "how do i track",
            ]),
            IntentRule::new(Intent::Payment, 3, &[
                "payment", "pay online", "upi", "cash on delivery", "cod",
                "card accepted", "net banking",
            ]),
            IntentRule::new(Intent::Returns, 3, &[
                "return", "refund", "replace", "damaged", "exchange",
            ]),
            IntentRule::new(Intent::Quality, 3, &[
                "quality", "pure", "purity", "organic", "cold pressed", "wood pressed",
                "chemical", "preservative", "adulterat",
            ]),
            IntentRule::new(Intent::Discount, 3, &[
                "discount", "offer", "coupon", "deal", "sale",
            ]),
            IntentRule::new(Intent::GeneralUsage, 3, &[
                "how to use your products", "usage instructions", "how should i use",
            ]),
            // Product facets
            IntentRule::new(Intent::Price, 4, &[
                "price", "cost", "rate", "how much", "vilai", "kitna",
            ]),
            IntentRule::new(Intent::Ingredients, 4, &[
                "ingredient", "contains", "what is in", "made of",
            ]),
            IntentRule::new(Intent::Images, 4, &[
                "image", "photo", "pic", "picture", "show me",
            ]),
            IntentRule::new(Intent::Benefits, 4, &[
                "benefit", "good for", "advantage", "why use", "health", "nalladhu",
            ]),
            IntentRule::new(Intent::Usage, 4, &[
                "how to use", "usage", "uses of", "how do i use",
            ]),
            IntentRule::new(Intent::Reviews, 4, &["review"]),
            IntentRule::new(Intent::Rating, 4, &["rating"]),
        ];
        rules.sort_by_key(|r| r.priority);
        Self { rules }
    }
}

impl IntentRules {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound {
                path: path.as_ref().display().to_string(),
                source: e,
            }
        })?;
        let mut table: Self = serde_yaml::from_str(&content)?;
        table.rules.sort_by_key(|r| r.priority);
        table.validate()?;
        Ok(table)
    }

    /// Validate the table: every rule needs at least one phrase
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.rules {
            if rule.trigger_phrases.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("rules.{:?}", rule.intent),
                    message: "rule has no trigger phrases".to_string(),
                });
            }
        }
        Ok(())
    }

    /// All rules in priority order
    pub fn iter(&self) -> impl Iterator<Item = &IntentRule> {
        self.rules.iter()
    }

    /// Rule for a specific intent, if present
    pub fn rule_for(&self, intent: Intent) -> Option<&IntentRule> {
        self.rules.iter().find(|r| r.intent == intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_valid() {
        let rules = IntentRules::default();
        assert!(rules.validate().is_ok());
        assert!(rules.rule_for(Intent::Price).is_some());
    }

    #[test]
    fn test_containment_matching() {
        let rules = IntentRules::default();
        let price = rules.rule_for(Intent::Price).unwrap();
        assert!(price.matches("what is the price of ghee"));
        assert!(!price.matches("show me pictures"));
    }

    #[test]
    fn test_single_token_substring_false_positive() {
        // "rate" fires inside "rating" and "buy" inside "buying";
        // inherited rule-design behavior the composer must tolerate.
        let rules = IntentRules::default();
        assert!(rules.rule_for(Intent::Price).unwrap().matches("rating of ghee"));
        assert!(rules.rule_for(Intent::Order).unwrap().matches("i am buying soon"));
    }

    #[test]
    fn test_priority_ordering() {
        let rules = IntentRules::default();
        let priorities: Vec<u8> = rules.iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
    }
}
