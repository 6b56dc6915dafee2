//! Catalog store gateway
//!
//! The engine's read-only window onto product and review records. The
//! store behind the trait is external; this crate ships an in-memory
//! implementation seeded with the six-product catalog, loadable from
//! JSON files.

pub mod memory;

pub use memory::InMemoryCatalog;

use async_trait::async_trait;
use thiserror::Error;

use isvaryam_core::{ProductFact, ProductKey, ReviewRecord};

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog data file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog data parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid rating {rating} for {product}: expected 1..=5")]
    InvalidRating { product: String, rating: u8 },

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Read-only catalog operations required by the engine
///
/// All calls are short and side-effect free; retries, if any, belong to
/// implementations behind this trait.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Product record by canonical key, `None` when the store has no
    /// record for it (data inconsistency is a normal not-found outcome)
    async fn find_product(&self, key: ProductKey) -> Result<Option<ProductFact>>;

    /// All products in stable catalog order
    async fn list_products(&self) -> Result<Vec<ProductFact>>;

    /// Reviews for one product
    async fn reviews_for(&self, key: ProductKey) -> Result<Vec<ReviewRecord>>;

    /// Every review in the store, for aggregate rating queries
    async fn all_reviews(&self) -> Result<Vec<ReviewRecord>>;
}
