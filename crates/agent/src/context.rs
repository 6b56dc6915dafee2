//! Per-user context store
//!
//! The only shared mutable resource in the pipeline. Bounded by
//! capacity and TTL so arbitrary user ids cannot grow it without limit.
//! Updates replace the whole record under one map entry, so a
//! concurrent read never observes a torn `{last_intent, last_product}`
//! pair; races between turns of the same user are last-write-wins.

use chrono::Duration;
use dashmap::DashMap;

use isvaryam_config::ContextStoreConfig;
use isvaryam_core::ConversationContext;

/// Bounded per-user conversation context store
pub struct ContextStore {
    map: DashMap<String, ConversationContext>,
    capacity: usize,
    ttl: Duration,
}

impl ContextStore {
    pub fn new(config: &ContextStoreConfig) -> Self {
        Self {
            map: DashMap::new(),
            capacity: config.capacity.max(1),
            ttl: Duration::seconds(config.ttl_secs as i64),
        }
    }

    /// Context for a user; missing or expired reads as fresh
    pub fn get(&self, user_id: &str) -> ConversationContext {
        match self.map.get(user_id) {
            Some(ctx) if !ctx.is_expired(self.ttl) => ctx.clone(),
            _ => ConversationContext::fresh(),
        }
    }

    /// Replace a user's context, evicting the stalest entry when full
    pub fn update(&self, user_id: &str, ctx: ConversationContext) {
        if !self.map.contains_key(user_id) && self.map.len() >= self.capacity {
            self.evict_oldest();
        }
        self.map.insert(user_id.to_string(), ctx);
    }

    fn evict_oldest(&self) {
        let oldest = self
            .map
            .iter()
            .min_by_key(|entry| entry.value().updated_at)
            .map(|entry| entry.key().clone());
        if let Some(key) = oldest {
            self.map.remove(&key);
            tracing::debug!(user_id = %key, "evicted stale conversation context");
        }
    }

    /// Number of tracked users
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isvaryam_core::{Intent, ProductKey};

    fn store(capacity: usize) -> ContextStore {
        ContextStore::new(&ContextStoreConfig {
            capacity,
            ttl_secs: 1800,
        })
    }

    #[test]
    fn test_missing_context_reads_fresh() {
        let store = store(10);
        let ctx = store.get("new-user");
        assert!(ctx.last_product.is_none());
    }

    #[test]
    fn test_update_and_get() {
        let store = store(10);
        store.update(
            "u1",
            ConversationContext::turn(Some(Intent::Price), Some(ProductKey::Ghee)),
        );
        let ctx = store.get("u1");
        assert_eq!(ctx.last_product, Some(ProductKey::Ghee));
        assert_eq!(ctx.last_intent, Some(Intent::Price));
    }

    #[test]
    fn test_users_do_not_interfere() {
        let store = store(10);
        store.update("u1", ConversationContext::turn(None, Some(ProductKey::Ghee)));
        store.update("u2", ConversationContext::turn(None, Some(ProductKey::CoconutOil)));
        assert_eq!(store.get("u1").last_product, Some(ProductKey::Ghee));
        assert_eq!(store.get("u2").last_product, Some(ProductKey::CoconutOil));
    }

    #[test]
    fn test_capacity_eviction() {
        let store = store(2);
        let mut old = ConversationContext::turn(None, Some(ProductKey::Ghee));
        old.updated_at = old.updated_at - Duration::minutes(10);
        store.update("old", old);
        store.update("u2", ConversationContext::fresh());
        store.update("u3", ConversationContext::fresh());
        assert_eq!(store.len(), 2);
        assert!(store.get("old").last_product.is_none());
    }

    #[test]
    fn test_expired_context_reads_fresh() {
        let store = ContextStore::new(&ContextStoreConfig {
            capacity: 10,
            ttl_secs: 60,
        });
        let mut ctx = ConversationContext::turn(None, Some(ProductKey::Ghee));
        ctx.updated_at = ctx.updated_at - Duration::minutes(5);
        store.update("u1", ctx);
        assert!(store.get("u1").last_product.is_none());
    }
}
