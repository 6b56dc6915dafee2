//! Configuration management for the catalog assistant
//!
//! Supports loading configuration from:
//! - YAML files (settings, rule tables, vocabulary)
//! - JSON files (ingredients, contact, FAQ reference data)
//! - Environment variables (ISVARYAM_ prefix)
//!
//! Every table ships with complete in-code defaults so the assistant
//! runs with no config files present. All tables are immutable after
//! startup and shared by reference into the pipeline components.

pub mod aliases;
pub mod guard;
pub mod recommendations;
pub mod reference;
pub mod responses;
pub mod rules;
pub mod settings;

pub use aliases::AliasTable;
pub use guard::GuardLists;
pub use recommendations::RecommendationGraph;
pub use reference::{ContactInfo, FaqEntry, ReferenceData};
pub use responses::{GreetingTemplates, ResponsePools};
pub use rules::{IntentRule, IntentRules};
pub use settings::{ContextStoreConfig, ServerConfig, Settings, load_settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}: {source}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
