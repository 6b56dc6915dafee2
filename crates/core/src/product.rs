//! Product identity and catalog facts
//!
//! The catalog is a small closed set, so canonical product identity is
//! an enum rather than a free-form string. Aliases, recommendations and
//! reviews all reference products through [`ProductKey`], which makes
//! dangling references unrepresentable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Canonical product key
///
/// Serialized as the snake_case key (e.g. `groundnut_oil`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKey {
    GroundnutOil,
    CoconutOil,
    SesameOil,
    Ghee,
    JaggeryPowder,
    SuperPack,
}

impl ProductKey {
    /// All canonical keys in catalog iteration order
    pub const ALL: [ProductKey; 6] = [
        ProductKey::GroundnutOil,
        ProductKey::CoconutOil,
        ProductKey::SesameOil,
        ProductKey::Ghee,
        ProductKey::JaggeryPowder,
        ProductKey::SuperPack,
    ];

    /// Snake_case key string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKey::GroundnutOil => "groundnut_oil",
            ProductKey::CoconutOil => "coconut_oil",
            ProductKey::SesameOil => "sesame_oil",
            ProductKey::Ghee => "ghee",
            ProductKey::JaggeryPowder => "jaggery_powder",
            ProductKey::SuperPack => "super_pack",
        }
    }

    /// Customer-facing display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductKey::GroundnutOil => "Groundnut Oil",
            ProductKey::CoconutOil => "Coconut Oil",
            ProductKey::SesameOil => "Sesame Oil",
            ProductKey::Ghee => "Ghee",
            ProductKey::JaggeryPowder => "Jaggery Powder",
            ProductKey::SuperPack => "Super Pack",
        }
    }
}

impl FromStr for ProductKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "groundnut_oil" => Ok(ProductKey::GroundnutOil),
            "coconut_oil" => Ok(ProductKey::CoconutOil),
            "sesame_oil" => Ok(ProductKey::SesameOil),
            "ghee" => Ok(ProductKey::Ghee),
            "jaggery_powder" => Ok(ProductKey::JaggeryPowder),
            "super_pack" => Ok(ProductKey::SuperPack),
            other => Err(Error::UnknownProductKey(other.to_string())),
        }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One price point for a pack size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    /// Pack size label (e.g. "500ml", "1L")
    pub size: String,
    /// Price in rupees
    pub price: u32,
}

impl PriceTier {
    pub fn new(size: impl Into<String>, price: u32) -> Self {
        Self { size: size.into(), price }
    }

    /// Render as "500ml - ₹150"
    pub fn label(&self) -> String {
        format!("{} - ₹{}", self.size, self.price)
    }
}

/// Catalog record for one product
///
/// Owned by the catalog store; the engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFact {
    /// Canonical key
    pub key: ProductKey,
    /// Display name
    pub display_name: String,
    /// Free-text description, used when no facet intent matched
    pub description: String,
    /// Benefit lines, in presentation order
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Usage suggestions, in presentation order
    #[serde(default)]
    pub usage: Vec<String>,
    /// Price tiers, ascending by size label
    #[serde(default)]
    pub price_tiers: Vec<PriceTier>,
    /// Image URLs, in presentation order
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Audiences/uses this product suits best
    #[serde(default)]
    pub best_for: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for key in ProductKey::ALL {
            assert_eq!(key.as_str().parse::<ProductKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!("mustard_oil".parse::<ProductKey>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ProductKey::JaggeryPowder).unwrap();
        assert_eq!(json, "\"jaggery_powder\"");
    }

    #[test]
    fn test_price_tier_label() {
        let tier = PriceTier::new("500ml", 150);
        assert_eq!(tier.label(), "500ml - ₹150");
    }
}
