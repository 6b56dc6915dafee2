//! End-to-end conversation flows against the seeded in-memory catalog.
//!
//! Replies from randomized pools are asserted by pool membership, never
//! by exact string; the deterministic FirstSelector pins the rest.

use std::sync::{Arc, Mutex};

use isvaryam_agent::{CatalogAgent, FirstSelector};
use isvaryam_catalog::InMemoryCatalog;
use isvaryam_config::{GreetingTemplates, GuardLists, ReferenceData, ResponsePools, Settings};

fn agent() -> CatalogAgent {
    CatalogAgent::new(
        &Settings::default(),
        Arc::new(InMemoryCatalog::seed()),
        Arc::new(FirstSelector),
    )
}

fn fill_phone(template: &str) -> String {
    template.replace("{phone}", &ReferenceData::default().contact.phone)
}

#[tokio::test]
async fn test_greeting_uses_time_of_day_template() {
    let agent = agent();
    let reply = agent.handle("u1", "hello").await.unwrap();
    let greetings = GreetingTemplates::default();
    let pool = [greetings.morning, greetings.afternoon, greetings.evening];
    assert!(pool.contains(&reply.text), "got: {}", reply.text);
}

#[tokio::test]
async fn test_product_price_facet_lists_all_tiers() {
    let agent = agent();
    let reply = agent.handle("u1", "price of coconut oil").await.unwrap();
    assert!(reply.text.contains("500ml - ₹150"), "got: {}", reply.text);
    assert!(reply.text.contains("1L - ₹280"), "got: {}", reply.text);
    // Only the requested facet appears
    assert!(!reply.text.contains("Ingredients"), "got: {}", reply.text);
}

#[tokio::test]
async fn test_bare_benefits_aggregates_whole_catalog() {
    let agent = agent();
    let reply = agent.handle("u1", "benefits").await.unwrap();
    assert!(reply.text.contains("Groundnut Oil"));
    assert!(reply.text.contains("Jaggery Powder"));
    assert!(reply.text.contains("Super Pack"));
}

#[tokio::test]
async fn test_blocked_input_beats_everything() {
    let agent = agent();
    // "this" contains the greeting trigger "hi"; the guard still wins
    let reply = agent.handle("u1", "this is nonsense").await.unwrap();
    let redirects = GuardLists::default().redirects;
    assert!(redirects.contains(&reply.text), "got: {}", reply.text);
}

#[tokio::test]
async fn test_gibberish_falls_back_to_default_pool() {
    let agent = agent();
    let reply = agent.handle("u1", "qwxzt plf").await.unwrap();
    let defaults = ResponsePools::default().default;
    assert!(defaults.contains(&reply.text), "got: {}", reply.text);
}

#[tokio::test]
async fn test_transliterated_fuzzy_product_and_facet() {
    let agent = agent();
    let reply = agent.handle("u1", "sukkar vilai").await.unwrap();
    assert!(reply.text.contains("Jaggery Powder"), "got: {}", reply.text);
    assert!(reply.text.contains("Prices"), "got: {}", reply.text);
}

#[tokio::test]
async fn test_alias_resolves_to_super_pack() {
    let agent = agent();
    let reply = agent.handle("u1", "combo pack price").await.unwrap();
    assert!(reply.text.contains("Super Pack Prices"), "got: {}", reply.text);
    assert!(reply.text.contains("3x1L - ₹980"), "got: {}", reply.text);
}

#[tokio::test]
async fn test_generic_intent_beats_product_without_facet() {
    let agent = agent();
    let reply = agent.handle("u1", "buy groundnut oil").await.unwrap();
    let expected = fill_phone(&ResponsePools::default().order[0]);
    assert_eq!(reply.text, expected);
}

#[tokio::test]
async fn test_delivery_pool_reply() {
    let agent = agent();
    let reply = agent.handle("u1", "delivery time").await.unwrap();
    assert_eq!(reply.text, ResponsePools::default().delivery[0]);
}

#[tokio::test]
async fn test_context_follow_up_reuses_last_product() {
    let agent = agent();
    let first = agent.handle("u7", "tell me about groundnut oil").await.unwrap();
    assert!(first.text.contains("Groundnut Oil"), "got: {}", first.text);

    let second = agent.handle("u7", "how much does it cost").await.unwrap();
    assert!(second.text.contains("Groundnut Oil Prices"), "got: {}", second.text);
}

#[tokio::test]
async fn test_follow_up_is_per_user() {
    let agent = agent();
    agent.handle("u7", "tell me about groundnut oil").await.unwrap();

    // A different user with the same follow-up has no product context
    let reply = agent.handle("u8", "how much does it cost").await.unwrap();
    assert!(!reply.text.contains("Groundnut Oil"), "got: {}", reply.text);
}

#[tokio::test]
async fn test_typo_resolves_through_fuzzy_tier() {
    let agent = agent();
    let reply = agent.handle("u1", "cocnut oil").await.unwrap();
    assert!(reply.text.contains("Coconut Oil"), "got: {}", reply.text);
}

#[tokio::test]
async fn test_product_reviews_facet() {
    let agent = agent();
    let reply = agent.handle("u1", "reviews of ghee").await.unwrap();
    assert!(reply.text.contains("Reviews for Ghee"), "got: {}", reply.text);
    assert!(reply.text.contains("Granular and fragrant"), "got: {}", reply.text);
}

#[tokio::test]
async fn test_image_facet_populates_reply_images() {
    let agent = agent();
    let reply = agent.handle("u1", "show me pictures of ghee").await.unwrap();
    assert!(!reply.images.is_empty());
    assert!(reply.images[0].contains("ghee"), "got: {:?}", reply.images);
}

#[tokio::test]
async fn test_cross_sell_line_appended_for_related_products() {
    let agent = agent();
    let reply = agent.handle("u1", "price of coconut oil").await.unwrap();
    assert!(
        reply.text.contains("Customers also buy"),
        "got: {}",
        reply.text
    );
}

#[tokio::test]
async fn test_all_ratings_aggregate() {
    let agent = agent();
    let reply = agent.handle("u1", "show me all ratings").await.unwrap();
    assert!(reply.text.contains("Ghee"), "got: {}", reply.text);
    assert!(reply.text.contains("/5"), "got: {}", reply.text);
}

/// Collects log output so tests can assert on emitted lines.
#[derive(Clone)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_blocked_input_logged_at_warn() {
    let buffer = LogBuffer::new();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let agent = agent();
    agent.handle("u1", "who won the cricket match").await.unwrap();

    let logs = buffer.contents();
    assert!(logs.contains("who won the cricket match"), "logs: {}", logs);
    assert!(logs.contains("WARN"), "logs: {}", logs);
}

#[tokio::test]
async fn test_unmatched_input_logged_exactly_once() {
    let buffer = LogBuffer::new();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let agent = agent();
    agent.handle("u1", "qwxzt plf").await.unwrap();

    let logs = buffer.contents();
    assert_eq!(logs.matches("qwxzt plf").count(), 1, "logs: {}", logs);
}
