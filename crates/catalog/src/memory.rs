//! In-memory catalog store

use async_trait::async_trait;
use std::path::Path;

use isvaryam_core::{PriceTier, ProductFact, ProductKey, ReviewRecord};

use crate::{CatalogError, CatalogStore, Result};

/// Catalog held in memory, immutable after construction
#[derive(Debug)]
pub struct InMemoryCatalog {
    products: Vec<ProductFact>,
    reviews: Vec<ReviewRecord>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<ProductFact>, reviews: Vec<ReviewRecord>) -> Self {
        Self { products, reviews }
    }

    /// Load products and reviews from JSON files
    pub fn from_json_files<P: AsRef<Path>>(products_path: P, reviews_path: P) -> Result<Self> {
        let products: Vec<ProductFact> =
            serde_json::from_str(&std::fs::read_to_string(products_path)?)?;
        let reviews: Vec<ReviewRecord> =
            serde_json::from_str(&std::fs::read_to_string(reviews_path)?)?;
        for review in &reviews {
            if !(1..=5).contains(&review.rating) {
                return Err(CatalogError::InvalidRating {
                    product: review.product_key.as_str().to_string(),
                    rating: review.rating,
                });
            }
        }
        tracing::info!(
            products = products.len(),
            reviews = reviews.len(),
            "Loaded catalog from JSON"
        );
        Ok(Self::new(products, reviews))
    }

    /// The six-product Isvaryam catalog with a handful of reviews
    pub fn seed() -> Self {
        use ProductKey::*;

        let products = vec![
            ProductFact {
                key: GroundnutOil,
                display_name: GroundnutOil.display_name().to_string(),
                description: "Cold pressed groundnut oil with a rich, nutty flavour - an everyday cooking oil.".to_string(),
                benefits: vec![
                    "High smoke point, good for deep frying".to_string(),
                    "Rich in vitamin E and healthy fats".to_string(),
                ],
                usage: vec![
                    "Everyday cooking and deep frying".to_string(),
                    "Tadka and stir fries".to_string(),
                ],
                price_tiers: vec![PriceTier::new("500ml", 180), PriceTier::new("1L", 340)],
                image_urls: vec!["/static/img/groundnut_oil.jpg".to_string()],
                best_for: vec!["frying".to_string(), "daily cooking".to_string()],
            },
            ProductFact {
                key: CoconutOil,
                display_name: CoconutOil.display_name().to_string(),
                description: "Cold pressed coconut oil from sun-dried copra - cooking and hair care in one bottle.".to_string(),
                benefits: vec![
                    "Natural source of MCTs".to_string(),
                    "Doubles as hair and skin care".to_string(),
                ],
                usage: vec![
                    "South Indian curries and seasoning".to_string(),
                    "Hair oiling before wash".to_string(),
                ],
                price_tiers: vec![PriceTier::new("500ml", 150), PriceTier::new("1L", 280)],
                image_urls: vec!["/static/img/coconut_oil.jpg".to_string()],
                best_for: vec!["curries".to_string(), "hair care".to_string()],
            },
            ProductFact {
                key: SesameOil,
                display_name: SesameOil.display_name().to_string(),
                description: "Traditional wood pressed sesame (gingelly) oil with deep aroma.".to_string(),
                benefits: vec![
                    "Rich in antioxidants like sesamol".to_string(),
                    "Traditional choice for oil pulling".to_string(),
                ],
                usage: vec![
                    "Dressing, pickles and drizzling".to_string(),
                    "Oil pulling and massage".to_string(),
                ],
                price_tiers: vec![PriceTier::new("500ml", 220), PriceTier::new("1L", 420)],
                image_urls: vec!["/static/img/sesame_oil.jpg".to_string()],
                best_for: vec!["pickles".to_string(), "oil pulling".to_string()],
            },
            ProductFact {
                key: Ghee,
                display_name: Ghee.display_name().to_string(),
                description: "Slow-cooked ghee from grass-fed cow's milk butter, granular and aromatic.".to_string(),
                benefits: vec![
                    "Lactose-free cooking fat".to_string(),
                    "Aids digestion in moderate amounts".to_string(),
                ],
                usage: vec![
                    "Tempering dals and sweets".to_string(),
                    "A spoon over hot rice".to_string(),
                ],
                price_tiers: vec![PriceTier::new("250ml", 300), PriceTier::new("500ml", 575)],
                image_urls: vec!["/static/img/ghee.jpg".to_string()],
                best_for: vec!["sweets".to_string(), "tempering".to_string()],
            },
            ProductFact {
                key: JaggeryPowder,
                display_name: JaggeryPowder.display_name().to_string(),
                description: "Unrefined jaggery powder from fresh sugarcane juice - a natural sugar substitute.".to_string(),
                benefits: vec![
                    "Unrefined, keeps natural minerals".to_string(),
                    "Drop-in replacement for white sugar".to_string(),
                ],
                usage: vec![
                    "Sweetening coffee, tea and payasam".to_string(),
                    "Baking and traditional sweets".to_string(),
                ],
                price_tiers: vec![PriceTier::new("500g", 120), PriceTier::new("1kg", 220)],
                image_urls: vec!["/static/img/jaggery_powder.jpg".to_string()],
                best_for: vec!["sweetening".to_string(), "baking".to_string()],
            },
            ProductFact {
                key: SuperPack,
                display_name: SuperPack.display_name().to_string(),
                description: "The Super Pack: 1L each of groundnut, coconut and sesame oil at a bundled price.".to_string(),
                benefits: vec![
                    "All three oils at the best value".to_string(),
                    "Covers every kitchen use".to_string(),
                ],
                usage: vec!["One pack for frying, curries and dressing".to_string()],
                price_tiers: vec![PriceTier::new("3x1L", 980)],
                image_urls: vec!["/static/img/super_pack.jpg".to_string()],
                best_for: vec!["gifting".to_string(), "families".to_string()],
            },
        ];

        let reviews = vec![
            ReviewRecord::new(GroundnutOil, "Tastes like my grandmother's kitchen.", 5),
            ReviewRecord::new(GroundnutOil, "Good oil, delivery took a bit long.", 4),
            ReviewRecord::new(CoconutOil, "Lovely aroma, great for hair too.", 5),
            ReviewRecord::new(SesameOil, "Strong flavour, exactly as promised.", 5),
            ReviewRecord::new(SesameOil, "A little pricey but worth it.", 4),
            ReviewRecord::new(Ghee, "Granular and fragrant. Will reorder.", 5),
            ReviewRecord::new(JaggeryPowder, "Dissolves well in coffee.", 4),
        ];

        Self::new(products, reviews)
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn find_product(&self, key: ProductKey) -> Result<Option<ProductFact>> {
        Ok(self.products.iter().find(|p| p.key == key).cloned())
    }

    async fn list_products(&self) -> Result<Vec<ProductFact>> {
        Ok(self.products.clone())
    }

    async fn reviews_for(&self, key: ProductKey) -> Result<Vec<ReviewRecord>> {
        Ok(self
            .reviews
            .iter()
            .filter(|r| r.product_key == key)
            .cloned()
            .collect())
    }

    async fn all_reviews(&self) -> Result<Vec<ReviewRecord>> {
        Ok(self.reviews.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_covers_all_keys() {
        let catalog = InMemoryCatalog::seed();
        for key in ProductKey::ALL {
            assert!(catalog.find_product(key).await.unwrap().is_some(), "missing {}", key);
        }
    }

    #[tokio::test]
    async fn test_seed_coconut_oil_tiers() {
        let catalog = InMemoryCatalog::seed();
        let coconut = catalog.find_product(ProductKey::CoconutOil).await.unwrap().unwrap();
        assert_eq!(coconut.price_tiers[0].label(), "500ml - ₹150");
        assert_eq!(coconut.price_tiers[1].label(), "1L - ₹280");
    }

    #[tokio::test]
    async fn test_reviews_filtered_by_product() {
        let catalog = InMemoryCatalog::seed();
        let reviews = catalog.reviews_for(ProductKey::SesameOil).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.product_key == ProductKey::SesameOil));
    }

    #[tokio::test]
    async fn test_from_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let products = dir.path().join("products.json");
        let reviews = dir.path().join("reviews.json");
        std::fs::write(
            &products,
            r#"[{"key": "ghee", "display_name": "Ghee", "description": "test"}]"#,
        )
        .unwrap();
        std::fs::write(
            &reviews,
            r#"[{"product_key": "ghee", "text": "nice", "rating": 5}]"#,
        )
        .unwrap();
        let catalog = InMemoryCatalog::from_json_files(&products, &reviews).unwrap();
        assert!(catalog.find_product(ProductKey::Ghee).await.unwrap().is_some());
        assert_eq!(catalog.all_reviews().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_rating_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let products = dir.path().join("products.json");
        let reviews = dir.path().join("reviews.json");
        std::fs::write(
            &products,
            r#"[{"key": "ghee", "display_name": "Ghee", "description": "test"}]"#,
        )
        .unwrap();
        std::fs::write(
            &reviews,
            r#"[{"product_key": "ghee", "text": "impossible", "rating": 9}]"#,
        )
        .unwrap();
        let err = InMemoryCatalog::from_json_files(&products, &reviews).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRating { rating: 9, .. }));
    }
}
