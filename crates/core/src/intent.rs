//! Intent and facet definitions
//!
//! Intents are a closed set: the classifier is multi-label, so a single
//! message can match several. Facets are the subset of intents that map
//! to one block of a product-specific reply; their canonical order is
//! fixed regardless of phrasing.

use serde::{Deserialize, Serialize};

/// Recognized user intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    // Conversational
    Greeting,
    SmallTalk,

    // Catalog-wide aggregates
    ProductList,
    ProductTypes,
    AllImages,
    AllPrices,
    AllReviews,
    AllRatings,

    // Generic catalog queries
    Contact,
    Delivery,
    Order,
    Tracking,
    Payment,
    Returns,
    Quality,
    Discount,
    GeneralUsage,

    // Product facets
    Price,
    Ingredients,
    Images,
    Benefits,
    Usage,
    Reviews,
    Rating,
}

impl Intent {
    /// The facet this intent maps to in a product-specific reply
    pub fn facet(&self) -> Option<Facet> {
        match self {
            Intent::Price => Some(Facet::Price),
            Intent::Ingredients => Some(Facet::Ingredients),
            Intent::Images => Some(Facet::Images),
            Intent::Benefits => Some(Facet::Benefits),
            Intent::Usage => Some(Facet::Usage),
            Intent::Reviews => Some(Facet::Reviews),
            Intent::Rating => Some(Facet::Rating),
            _ => None,
        }
    }
}

/// One self-contained block of a product-specific reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Price,
    Ingredients,
    Images,
    Benefits,
    Usage,
    Reviews,
    Rating,
}

impl Facet {
    /// Canonical presentation order for facet blocks
    pub const ORDER: [Facet; 7] = [
        Facet::Price,
        Facet::Ingredients,
        Facet::Images,
        Facet::Benefits,
        Facet::Usage,
        Facet::Reviews,
        Facet::Rating,
    ];

    /// Facets requested by a matched intent set, in canonical order
    pub fn from_intents(intents: &[Intent]) -> Vec<Facet> {
        Facet::ORDER
            .iter()
            .copied()
            .filter(|facet| intents.iter().any(|i| i.facet() == Some(*facet)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_order_is_canonical() {
        // Order of matched intents must not affect facet order
        let intents = vec![Intent::Benefits, Intent::Price, Intent::Images];
        let facets = Facet::from_intents(&intents);
        assert_eq!(facets, vec![Facet::Price, Facet::Images, Facet::Benefits]);
    }

    #[test]
    fn test_non_facet_intents_ignored() {
        let intents = vec![Intent::Delivery, Intent::Order];
        assert!(Facet::from_intents(&intents).is_empty());
    }
}
