//! Per-user conversation context
//!
//! The only mutable state in the pipeline. A missing or expired context
//! is treated as a fresh conversation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::product::ProductKey;

/// Ephemeral per-user state, written after every turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Last terminal intent of the previous turn
    pub last_intent: Option<Intent>,
    /// Last product the conversation was about
    pub last_product: Option<ProductKey>,
    /// When this record was last written
    pub updated_at: DateTime<Utc>,
}

impl ConversationContext {
    /// Fresh context for a first message
    pub fn fresh() -> Self {
        Self {
            last_intent: None,
            last_product: None,
            updated_at: Utc::now(),
        }
    }

    /// New record for the outcome of a turn
    pub fn turn(last_intent: Option<Intent>, last_product: Option<ProductKey>) -> Self {
        Self {
            last_intent,
            last_product,
            updated_at: Utc::now(),
        }
    }

    /// Whether the record is older than `ttl`
    pub fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now() - self.updated_at > ttl
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::fresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_is_empty() {
        let ctx = ConversationContext::fresh();
        assert!(ctx.last_intent.is_none());
        assert!(ctx.last_product.is_none());
    }

    #[test]
    fn test_expiry() {
        let mut ctx = ConversationContext::turn(Some(Intent::Price), Some(ProductKey::Ghee));
        assert!(!ctx.is_expired(Duration::minutes(30)));
        ctx.updated_at = Utc::now() - Duration::hours(2);
        assert!(ctx.is_expired(Duration::minutes(30)));
    }
}
