//! Cross-sell recommendation graph
//!
//! Directed mapping from a product to the ordered list shown in the
//! "customers also buy" line. No self-loops; targets are canonical by
//! type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use isvaryam_core::ProductKey;

use crate::ConfigError;

/// Immutable cross-sell graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationGraph {
    pub edges: BTreeMap<ProductKey, Vec<ProductKey>>,
}

impl Default for RecommendationGraph {
    fn default() -> Self {
        use ProductKey::*;
        let edges = BTreeMap::from([
            (GroundnutOil, vec![CoconutOil, SesameOil, SuperPack]),
            (CoconutOil, vec![SesameOil, GroundnutOil, SuperPack]),
            (SesameOil, vec![GroundnutOil, CoconutOil, SuperPack]),
            (Ghee, vec![JaggeryPowder]),
            (JaggeryPowder, vec![Ghee]),
            (SuperPack, vec![GroundnutOil, CoconutOil, SesameOil]),
        ]);
        Self { edges }
    }
}

impl RecommendationGraph {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound {
                path: path.as_ref().display().to_string(),
                source: e,
            }
        })?;
        let graph: Self = serde_yaml::from_str(&content)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Validate: no self-loops, no duplicate targets per product
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, targets) in &self.edges {
            if targets.contains(key) {
                return Err(ConfigError::InvalidValue {
                    field: format!("recommendations.{}", key.as_str()),
                    message: "self-loop in recommendation graph".to_string(),
                });
            }
            let mut seen = targets.clone();
            seen.sort_unstable();
            seen.dedup();
            if seen.len() != targets.len() {
                return Err(ConfigError::InvalidValue {
                    field: format!("recommendations.{}", key.as_str()),
                    message: "duplicate recommendation target".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Ordered cross-sell targets for a product
    pub fn related(&self, key: ProductKey) -> &[ProductKey] {
        self.edges.get(&key).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_graph_valid() {
        let graph = RecommendationGraph::default();
        assert!(graph.validate().is_ok());
        assert_eq!(
            graph.related(ProductKey::Ghee),
            &[ProductKey::JaggeryPowder]
        );
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = RecommendationGraph::default();
        graph
            .edges
            .insert(ProductKey::Ghee, vec![ProductKey::Ghee]);
        assert!(graph.validate().is_err());
    }

    #[test]
    fn test_every_product_has_recommendations() {
        let graph = RecommendationGraph::default();
        for key in ProductKey::ALL {
            assert!(!graph.related(key).is_empty(), "no cross-sell for {}", key);
        }
    }
}
