//! Review records and aggregates

use serde::{Deserialize, Serialize};

use crate::product::ProductKey;

/// One customer review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Product being reviewed
    pub product_key: ProductKey,
    /// Review text
    pub text: String,
    /// Rating, 1..=5
    pub rating: u8,
}

impl ReviewRecord {
    pub fn new(product_key: ProductKey, text: impl Into<String>, rating: u8) -> Self {
        Self { product_key, text: text.into(), rating }
    }
}

/// Aggregate over a set of reviews
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Number of reviews
    pub count: usize,
    /// Mean rating, rounded to one decimal
    pub average: f32,
}

impl ReviewSummary {
    /// Aggregate count and mean rating; `None` when there are no reviews
    pub fn from_reviews(reviews: &[ReviewRecord]) -> Option<Self> {
        if reviews.is_empty() {
            return None;
        }
        let sum: u32 = reviews.iter().map(|r| r.rating as u32).sum();
        let average = sum as f32 / reviews.len() as f32;
        Some(Self {
            count: reviews.len(),
            average: (average * 10.0).round() / 10.0,
        })
    }
}
