//! Response composition
//!
//! Combines the blocked verdict, matched intent set, resolved product
//! and fetched catalog facts into one reply. Precedence is fixed and
//! total - every input reaches exactly one terminal branch:
//!
//! 1. blocked input → redirect pool
//! 2. greeting → time-of-day greeting
//! 3. small talk → deflection pool
//! 4. bare micro-commands ("price", "benefits") → catalog aggregates
//! 5. catalog-wide aggregates (all prices/images, product list, types)
//! 6. product resolved by containment with at least one facet
//! 7. generic catalog intents → per-intent pool
//! 8. FAQ question containment
//! 9. review/rating aggregates
//! 10. any resolved product (fuzzy included) or a facet follow-up
//!     against the previous turn's product
//! 11. default fallback pool (input logged for rule curation)

use std::sync::Arc;

use chrono::Timelike;

use isvaryam_catalog::CatalogStore;
use isvaryam_config::{GuardLists, RecommendationGraph, ReferenceData, ResponsePools};
use isvaryam_core::{
    ConversationContext, Facet, Intent, ProductFact, ProductKey, ReviewSummary,
};

use crate::normalize::Normalized;
use crate::resolve::ResolvedProduct;
use crate::select::ResponseSelector;
use crate::Result;

/// Separator between facet blocks
const BLOCK_SEPARATOR: &str = "\n\n";
/// Images shown per product in a facet reply
const MAX_PRODUCT_IMAGES: usize = 3;

/// Composed reply: text plus any image URLs it references
#[derive(Debug, Clone, Default)]
pub struct Reply {
    pub text: String,
    pub images: Vec<String>,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            images: Vec::new(),
        }
    }
}

/// Everything the composer needs for one turn
pub struct ComposeInput<'a> {
    pub message: &'a Normalized,
    pub blocked: bool,
    pub intents: &'a [Intent],
    pub product: Option<ResolvedProduct>,
    pub context: &'a ConversationContext,
}

/// Composition result plus the context fields to persist
pub struct Outcome {
    pub reply: Reply,
    pub last_intent: Option<Intent>,
    pub last_product: Option<ProductKey>,
}

impl Outcome {
    fn new(reply: Reply, last_intent: Option<Intent>, last_product: Option<ProductKey>) -> Self {
        Self {
            reply,
            last_intent,
            last_product,
        }
    }
}

/// Assembles replies from matched intents and catalog facts
pub struct ResponseComposer {
    pools: Arc<ResponsePools>,
    guard: Arc<GuardLists>,
    reference: Arc<ReferenceData>,
    recommendations: Arc<RecommendationGraph>,
    catalog: Arc<dyn CatalogStore>,
    selector: Arc<dyn ResponseSelector>,
}

impl ResponseComposer {
    pub fn new(
        pools: Arc<ResponsePools>,
        guard: Arc<GuardLists>,
        reference: Arc<ReferenceData>,
        recommendations: Arc<RecommendationGraph>,
        catalog: Arc<dyn CatalogStore>,
        selector: Arc<dyn ResponseSelector>,
    ) -> Self {
        Self {
            pools,
            guard,
            reference,
            recommendations,
            catalog,
            selector,
        }
    }

    /// Compose the reply for one turn
    pub async fn compose(&self, input: ComposeInput<'_>) -> Result<Outcome> {
        let has = |intent: Intent| input.intents.contains(&intent);
        let text = input.message.text.as_str();

        // 1. Blocked input: redirect, leave context untouched
        if input.blocked {
            let reply = Reply::text(self.selector.pick(&self.guard.redirects));
            return Ok(Outcome::new(reply, None, None));
        }

        // 2. Greeting
        if has(Intent::Greeting) {
            let hour = chrono::Local::now().hour();
            let reply = Reply::text(self.pools.greetings.for_time(hour));
            return Ok(Outcome::new(reply, Some(Intent::Greeting), None));
        }

        // 3. Small talk deflection
        if has(Intent::SmallTalk) {
            let reply = Reply::text(self.selector.pick(&self.pools.small_talk));
            return Ok(Outcome::new(reply, Some(Intent::SmallTalk), None));
        }

        // 4. Exact micro-commands on the bare normalized text
        if matches!(text, "price" | "prices") {
            let reply = self.all_prices().await?;
            return Ok(Outcome::new(reply, Some(Intent::AllPrices), None));
        }
        if matches!(text, "benefit" | "benefits") {
            let reply = self.all_benefits().await?;
            return Ok(Outcome::new(reply, Some(Intent::Benefits), None));
        }

        // 5. Catalog-wide aggregates
        if has(Intent::AllPrices) {
            return Ok(Outcome::new(self.all_prices().await?, Some(Intent::AllPrices), None));
        }
        if has(Intent::AllImages) {
            return Ok(Outcome::new(self.gallery().await?, Some(Intent::AllImages), None));
        }
        if has(Intent::ProductList) {
            return Ok(Outcome::new(self.product_list().await?, Some(Intent::ProductList), None));
        }
        if has(Intent::ProductTypes) {
            return Ok(Outcome::new(self.product_types(), Some(Intent::ProductTypes), None));
        }

        // 6. Product resolved by containment with facet intents:
        // product-specific queries beat generic catalog intents.
        let facets = Facet::from_intents(input.intents);
        if let Some(product) = input.product.as_ref().filter(|p| p.is_containment()) {
            if !facets.is_empty() {
                return self.product_reply(product.key, &facets).await;
            }
        }

        // 7. Generic catalog intents, fixed order
        if has(Intent::Contact) {
            let reply = Reply::text(self.contact_block());
            return Ok(Outcome::new(reply, Some(Intent::Contact), None));
        }
        for intent in [
            Intent::Delivery,
            Intent::Order,
            Intent::Tracking,
            Intent::Payment,
            Intent::Returns,
            Intent::Quality,
            Intent::Discount,
            Intent::GeneralUsage,
        ] {
            if has(intent) {
                if let Some(pool) = self.pools.pool_for(intent) {
                    let reply = Reply::text(self.fill_contact(self.selector.pick(pool)));
                    return Ok(Outcome::new(reply, Some(intent), None));
                }
            }
        }

        // 8. FAQ question containment
        if let Some(entry) = self.reference.faq_match(text) {
            return Ok(Outcome::new(Reply::text(entry.answer.clone()), None, None));
        }

        // 9. Review/rating aggregates (also the fallback for a
        // review/rating facet with no product in sight)
        if has(Intent::AllReviews) || (has(Intent::Reviews) && input.product.is_none()) {
            return Ok(Outcome::new(self.all_reviews().await?, Some(Intent::AllReviews), None));
        }
        if has(Intent::AllRatings) || (has(Intent::Rating) && input.product.is_none()) {
            return Ok(Outcome::new(self.all_ratings().await?, Some(Intent::AllRatings), None));
        }

        // 10. Any resolved product (fuzzy tier included), else a facet
        // follow-up against the previous turn's product
        if let Some(product) = input.product.as_ref() {
            return self.product_reply(product.key, &facets).await;
        }
        if !facets.is_empty() {
            if let Some(last) = input.context.last_product {
                return self.product_reply(last, &facets).await;
            }
        }

        // 11. Default fallback; log the input once for rule curation
        tracing::info!(input = %input.message.text, "unmatched query");
        let reply = Reply::text(self.selector.pick(&self.pools.default));
        Ok(Outcome::new(reply, None, None))
    }

    /// Facet blocks for one product, in canonical facet order, with the
    /// cross-sell line appended when recommendations exist
    async fn product_reply(&self, key: ProductKey, facets: &[Facet]) -> Result<Outcome> {
        let Some(fact) = self.catalog.find_product(key).await? else {
            // Alias table and store disagree: normal not-found outcome
            tracing::warn!(product = %key.as_str(), "product missing from catalog store");
            let reply = Reply::text(format!(
                "Sorry, I couldn't find information for {}.",
                key.display_name()
            ));
            return Ok(Outcome::new(reply, None, None));
        };

        let mut blocks: Vec<String> = Vec::new();
        let mut images: Vec<String> = Vec::new();

        for facet in facets {
            match facet {
                Facet::Price => blocks.push(self.price_block(&fact)),
                Facet::Ingredients => blocks.push(self.ingredients_block(&fact)),
                Facet::Images => {
                    let urls: Vec<String> =
                        fact.image_urls.iter().take(MAX_PRODUCT_IMAGES).cloned().collect();
                    blocks.push(format!("📸 Images of {}", fact.display_name));
                    images.extend(urls);
                }
                Facet::Benefits => blocks.push(list_block(
                    &format!("✨ Benefits of {}", fact.display_name),
                    &fact.benefits,
                )),
                Facet::Usage => blocks.push(list_block(
                    &format!("🥄 How to use {}", fact.display_name),
                    &fact.usage,
                )),
                Facet::Reviews => blocks.push(self.reviews_block(&fact).await?),
                Facet::Rating => blocks.push(self.rating_block(&fact).await?),
            }
        }

        // No facet requested: the description is the sole facet
        if blocks.is_empty() {
            blocks.push(format!("📝 {}: {}", fact.display_name, fact.description));
        }

        let related = self.recommendations.related(key);
        if !related.is_empty() {
            let names: Vec<&str> = related.iter().map(|k| k.display_name()).collect();
            blocks.push(format!("🤝 Customers also buy: {}", names.join(", ")));
        }

        let last_intent = facets.first().map(facet_intent);
        Ok(Outcome::new(
            Reply {
                text: blocks.join(BLOCK_SEPARATOR),
                images,
            },
            last_intent,
            Some(key),
        ))
    }

    fn price_block(&self, fact: &ProductFact) -> String {
        if fact.price_tiers.is_empty() {
            return format!("🛒 {} prices are not listed right now.", fact.display_name);
        }
        let tiers: Vec<String> = fact.price_tiers.iter().map(|t| t.label()).collect();
        format!("🛒 {} Prices: {}", fact.display_name, tiers.join(", "))
    }

    fn ingredients_block(&self, fact: &ProductFact) -> String {
        match self.reference.ingredients_for(fact.key) {
            Some(items) if !items.is_empty() => format!(
                "🧾 Ingredients of {}: {}",
                fact.display_name,
                items.join(", ")
            ),
            _ => format!("ℹ️ {} is a natural product.", fact.display_name),
        }
    }

    async fn reviews_block(&self, fact: &ProductFact) -> Result<String> {
        let reviews = self.catalog.reviews_for(fact.key).await?;
        if reviews.is_empty() {
            return Ok(format!("No reviews yet for {}.", fact.display_name));
        }
        let lines: Vec<String> = reviews
            .iter()
            .map(|r| format!("🗣️ {} ({}/5)", r.text, r.rating))
            .collect();
        Ok(format!(
            "Reviews for {}:\n{}",
            fact.display_name,
            lines.join("\n")
        ))
    }

    async fn rating_block(&self, fact: &ProductFact) -> Result<String> {
        let reviews = self.catalog.reviews_for(fact.key).await?;
        Ok(match ReviewSummary::from_reviews(&reviews) {
            Some(summary) => format!(
                "⭐ Average rating for {}: {}/5 based on {} reviews.",
                fact.display_name, summary.average, summary.count
            ),
            None => format!("⚠️ No ratings available for {}.", fact.display_name),
        })
    }

    /// Price lines for every product, in catalog order
    async fn all_prices(&self) -> Result<Reply> {
        let products = self.catalog.list_products().await?;
        let lines: Vec<String> = products.iter().map(|p| self.price_block(p)).collect();
        Ok(Reply::text(lines.join(BLOCK_SEPARATOR)))
    }

    /// Benefit blocks for every product, in catalog order
    async fn all_benefits(&self) -> Result<Reply> {
        let products = self.catalog.list_products().await?;
        let blocks: Vec<String> = products
            .iter()
            .map(|p| list_block(&format!("✨ {}", p.display_name), &p.benefits))
            .collect();
        Ok(Reply::text(blocks.join(BLOCK_SEPARATOR)))
    }

    /// Product gallery: name plus first image per product
    async fn gallery(&self) -> Result<Reply> {
        let products = self.catalog.list_products().await?;
        let mut lines = vec!["🖼️ Our product gallery:".to_string()];
        let mut images = Vec::new();
        for product in &products {
            if let Some(url) = product.image_urls.first() {
                lines.push(product.display_name.clone());
                images.push(url.clone());
            }
        }
        Ok(Reply {
            text: lines.join("\n"),
            images,
        })
    }

    async fn product_list(&self) -> Result<Reply> {
        let products = self.catalog.list_products().await?;
        let names: Vec<&str> = products.iter().map(|p| p.display_name.as_str()).collect();
        Ok(Reply::text(format!("📦 We offer: {}.", names.join(", "))))
    }

    fn product_types(&self) -> Reply {
        let names: Vec<&str> = self
            .reference
            .ingredients
            .keys()
            .map(|k| k.display_name())
            .collect();
        Reply::text(format!("🛍️ We offer the following: {}", names.join(", ")))
    }

    /// Every review in the store, grouped by product in catalog order
    async fn all_reviews(&self) -> Result<Reply> {
        let reviews = self.catalog.all_reviews().await?;
        if reviews.is_empty() {
            return Ok(Reply::text("No customer reviews yet - be the first!"));
        }
        let mut blocks = Vec::new();
        for key in ProductKey::ALL {
            let lines: Vec<String> = reviews
                .iter()
                .filter(|r| r.product_key == key)
                .map(|r| format!("🗣️ {} ({}/5)", r.text, r.rating))
                .collect();
            if !lines.is_empty() {
                blocks.push(format!("{}:\n{}", key.display_name(), lines.join("\n")));
            }
        }
        Ok(Reply::text(blocks.join(BLOCK_SEPARATOR)))
    }

    /// Rating summary per product, in catalog order
    async fn all_ratings(&self) -> Result<Reply> {
        let reviews = self.catalog.all_reviews().await?;
        let lines: Vec<String> = ProductKey::ALL
            .iter()
            .map(|key| {
                let product_reviews: Vec<_> = reviews
                    .iter()
                    .filter(|r| r.product_key == *key)
                    .cloned()
                    .collect();
                match ReviewSummary::from_reviews(&product_reviews) {
                    Some(summary) => format!(
                        "⭐ {}: {}/5 ({} reviews)",
                        key.display_name(),
                        summary.average,
                        summary.count
                    ),
                    None => format!("⭐ {}: No reviews yet", key.display_name()),
                }
            })
            .collect();
        Ok(Reply::text(lines.join(BLOCK_SEPARATOR)))
    }

    fn contact_block(&self) -> String {
        let contact = &self.reference.contact;
        format!(
            "📞 Phone: {}\n✉️ Email: {}\n📍 Address: {}",
            contact.phone, contact.email, contact.address
        )
    }

    fn fill_contact(&self, template: &str) -> String {
        template.replace("{phone}", &self.reference.contact.phone)
    }
}

/// Titled bullet list block
fn list_block(title: &str, items: &[String]) -> String {
    if items.is_empty() {
        return title.to_string();
    }
    let bullets: Vec<String> = items.iter().map(|i| format!("• {}", i)).collect();
    format!("{}:\n{}", title, bullets.join("\n"))
}

/// The intent a facet corresponds to, recorded as `last_intent`
fn facet_intent(facet: &Facet) -> Intent {
    match facet {
        Facet::Price => Intent::Price,
        Facet::Ingredients => Intent::Ingredients,
        Facet::Images => Intent::Images,
        Facet::Benefits => Intent::Benefits,
        Facet::Usage => Intent::Usage,
        Facet::Reviews => Intent::Reviews,
        Facet::Rating => Intent::Rating,
    }
}
