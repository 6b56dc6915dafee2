//! Content guard
//!
//! Rejects abusive or off-topic input before any matching cost is
//! spent. Pure: the verdict depends only on the message and the
//! configured vocabulary.

use std::sync::Arc;

use isvaryam_config::GuardLists;

use crate::normalize::{stem, Normalized};

/// Vocabulary-based input filter
#[derive(Clone)]
pub struct ContentGuard {
    lists: Arc<GuardLists>,
}

impl ContentGuard {
    pub fn new(lists: Arc<GuardLists>) -> Self {
        Self { lists }
    }

    /// Whether the message must be blocked
    pub fn is_blocked(&self, message: &Normalized) -> bool {
        message
            .tokens
            .iter()
            .any(|t| self.lists.is_flagged(t) || self.lists.is_flagged(stem(t)))
    }

    /// Redirect message pool for blocked input
    pub fn redirects(&self) -> &[String] {
        &self.lists.redirects
    }
}
