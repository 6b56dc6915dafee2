//! Intent and entity resolution engine
//!
//! The layered pipeline that turns raw text into a matched intent set
//! and a canonical product identity, and the composer that assembles
//! the reply:
//!
//! normalize → content guard → classify → resolve entity → fetch facts
//! → compose → context update

pub mod agent;
pub mod classify;
pub mod compose;
pub mod context;
pub mod guard;
pub mod normalize;
pub mod resolve;
pub mod select;

pub use agent::CatalogAgent;
pub use classify::IntentClassifier;
pub use compose::{ComposeInput, Outcome, Reply, ResponseComposer};
pub use context::ContextStore;
pub use guard::ContentGuard;
pub use normalize::{normalize, Normalized};
pub use resolve::{EntityResolver, ResolutionTier, ResolvedProduct};
pub use select::{FirstSelector, RandomSelector, ResponseSelector};

use thiserror::Error;

/// Engine errors
///
/// Classification and resolution never fail; only the catalog boundary
/// can produce an error, and it is surfaced to the transport layer as a
/// generic apology.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] isvaryam_catalog::CatalogError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
