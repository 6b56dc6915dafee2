//! Response pools
//!
//! Every generic intent answers from a small curated pool; which member
//! is returned is presentational variety only, so tests assert pool
//! membership rather than exact strings. Templates may carry a
//! `{phone}` placeholder filled from the contact record.

use serde::{Deserialize, Serialize};
use std::path::Path;

use isvaryam_core::Intent;

use crate::ConfigError;

/// Time-of-day greeting templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingTemplates {
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
}

impl Default for GreetingTemplates {
    fn default() -> Self {
        Self {
            morning: "Good morning! I'm Isvaryam's assistant. How can I help you today?".to_string(),
            afternoon: "Good afternoon! I'm Isvaryam's assistant. How can I help you today?".to_string(),
            evening: "Good evening! I'm Isvaryam's assistant. How can I help you today?".to_string(),
        }
    }
}

impl GreetingTemplates {
    /// Greeting for the hour of day (0-23)
    pub fn for_time(&self, hour: u32) -> &str {
        match hour {
            0..=11 => &self.morning,
            12..=16 => &self.afternoon,
            _ => &self.evening,
        }
    }
}

/// Curated reply pools per generic intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsePools {
    pub greetings: GreetingTemplates,
    pub small_talk: Vec<String>,
    pub delivery: Vec<String>,
    pub order: Vec<String>,
    pub tracking: Vec<String>,
    pub payment: Vec<String>,
    pub returns: Vec<String>,
    pub quality: Vec<String>,
    pub discount: Vec<String>,
    pub general_usage: Vec<String>,
    /// Fallback when nothing matched
    pub default: Vec<String>,
}

impl Default for ResponsePools {
    fn default() -> Self {
        Self {
            greetings: GreetingTemplates::default(),
            small_talk: vec![
                "I'm just a helpful chatbot. Let's talk about oils and orders!".to_string(),
                "I only know oils, ghee and jaggery - but I know them well. What can I get you?".to_string(),
            ],
            delivery: vec![
                "We deliver to Coimbatore in 2 days and to other cities in 3-4 days.".to_string(),
                "Orders reach Coimbatore within 2 days; everywhere else takes 3-4 days.".to_string(),
            ],
            order: vec![
                "To place an order, call us at {phone}.".to_string(),
                "You can order by calling {phone} - we'll take it from there.".to_string(),
            ],
            tracking: vec![
                "For tracking, please call {phone}.".to_string(),
                "Our team can check your order status - give us a call at {phone}.".to_string(),
            ],
            payment: vec![
                "We accept UPI, cards and cash on delivery.".to_string(),
                "You can pay by UPI, card, or cash on delivery - whichever suits you.".to_string(),
            ],
            returns: vec![
                "If anything arrives damaged, call {phone} within 3 days and we'll replace it.".to_string(),
                "Damaged or wrong item? Call {phone} within 3 days for a replacement.".to_string(),
            ],
            quality: vec![
                "All our oils are cold pressed in small batches, with no chemicals or preservatives.".to_string(),
                "Everything we sell is cold pressed and additive-free - the traditional way.".to_string(),
            ],
            discount: vec![
                "The Super Pack is our best value - 1L each of all 3 oils. Seasonal offers go out on our store page.".to_string(),
                "Keep an eye on the store page for seasonal offers; the Super Pack is always the best deal.".to_string(),
            ],
            general_usage: vec![
                "Our oils suit everyday cooking and deep frying; ghee is best for tempering and sweets. Ask about a specific product for details.".to_string(),
                "Each product has its own usage notes - ask me about groundnut oil, coconut oil, sesame oil, ghee or jaggery.".to_string(),
            ],
            default: vec![
                "I didn't get that. Try asking about products, prices, oils, ordering, or delivery info.".to_string(),
                "Not sure I follow - ask me about our oils, ghee, jaggery, prices or delivery.".to_string(),
                "I can help with products, prices, ingredients, ordering and delivery. What would you like to know?".to_string(),
            ],
        }
    }
}

impl ResponsePools {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound {
                path: path.as_ref().display().to_string(),
                source: e,
            }
        })?;
        let pools: Self = serde_yaml::from_str(&content)?;
        pools.validate()?;
        Ok(pools)
    }

    /// Validate: no pool may be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named: [(&str, &Vec<String>); 10] = [
            ("small_talk", &self.small_talk),
            ("delivery", &self.delivery),
            ("order", &self.order),
            ("tracking", &self.tracking),
            ("payment", &self.payment),
            ("returns", &self.returns),
            ("quality", &self.quality),
            ("discount", &self.discount),
            ("general_usage", &self.general_usage),
            ("default", &self.default),
        ];
        for (name, pool) in named {
            if pool.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("responses.{}", name),
                    message: "response pool must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Pool for a generic intent, if one exists
    pub fn pool_for(&self, intent: Intent) -> Option<&[String]> {
        let pool = match intent {
            Intent::SmallTalk => &self.small_talk,
            Intent::Delivery => &self.delivery,
            Intent::Order => &self.order,
            Intent::Tracking => &self.tracking,
            Intent::Payment => &self.payment,
            Intent::Returns => &self.returns,
            Intent::Quality => &self.quality,
            Intent::Discount => &self.discount,
            Intent::GeneralUsage => &self.general_usage,
            _ => return None,
        };
        Some(pool.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let pools = ResponsePools::default();
        assert!(pools.validate().is_ok());
    }

    #[test]
    fn test_greeting_for_time() {
        let greetings = GreetingTemplates::default();
        assert!(greetings.for_time(9).contains("morning"));
        assert!(greetings.for_time(14).contains("afternoon"));
        assert!(greetings.for_time(19).contains("evening"));
    }

    #[test]
    fn test_pool_lookup() {
        let pools = ResponsePools::default();
        assert!(pools.pool_for(Intent::Delivery).is_some());
        assert!(pools.pool_for(Intent::Price).is_none());
    }
}
