//! Isvaryam assistant server
//!
//! HTTP transport for the catalog assistant: chat and feedback
//! endpoints plus health/readiness checks. All classifier-side
//! outcomes (blocked input, unresolved products, unmatched intents)
//! surface as normal 200 conversational replies; only unexpected
//! internal failures reach the 500 handler.

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
