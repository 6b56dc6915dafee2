//! Core types for the Isvaryam catalog assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Canonical product keys and product facts
//! - Review records and aggregates
//! - Intent and facet definitions
//! - Per-user conversation context
//! - Error types

pub mod context;
pub mod error;
pub mod intent;
pub mod product;
pub mod review;

pub use context::ConversationContext;
pub use error::{Error, Result};
pub use intent::{Facet, Intent};
pub use product::{PriceTier, ProductFact, ProductKey};
pub use review::{ReviewRecord, ReviewSummary};
