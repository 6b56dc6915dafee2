//! Agent facade
//!
//! Owns the full per-turn pipeline and the conversation context store.
//! The transport layer calls [`CatalogAgent::handle`] and gets back a
//! composed reply.

use std::sync::Arc;

use isvaryam_catalog::CatalogStore;
use isvaryam_config::Settings;
use isvaryam_core::ConversationContext;

use crate::classify::IntentClassifier;
use crate::compose::{ComposeInput, Reply, ResponseComposer};
use crate::context::ContextStore;
use crate::guard::ContentGuard;
use crate::normalize::normalize;
use crate::resolve::EntityResolver;
use crate::select::{RandomSelector, ResponseSelector};
use crate::Result;

/// One-stop conversation handler
pub struct CatalogAgent {
    guard: ContentGuard,
    classifier: IntentClassifier,
    resolver: EntityResolver,
    composer: ResponseComposer,
    contexts: ContextStore,
}

impl CatalogAgent {
    pub fn new(
        settings: &Settings,
        catalog: Arc<dyn CatalogStore>,
        selector: Arc<dyn ResponseSelector>,
    ) -> Self {
        let rules = Arc::new(isvaryam_config::IntentRules::default());
        let aliases = Arc::new(isvaryam_config::AliasTable::default());
        let guard_lists = Arc::new(isvaryam_config::GuardLists::default());
        let pools = Arc::new(isvaryam_config::ResponsePools::default());
        let reference = Arc::new(
            isvaryam_config::ReferenceData::load_dir(&settings.data_dir).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "falling back to built-in reference data");
                isvaryam_config::ReferenceData::default()
            }),
        );
        let recommendations = Arc::new(isvaryam_config::RecommendationGraph::default());

        Self::with_tables(
            settings,
            rules,
            aliases,
            guard_lists,
            pools,
            reference,
            recommendations,
            catalog,
            selector,
        )
    }

    /// Build with explicit rule tables, used when tables come from files
    #[allow(clippy::too_many_arguments)]
    pub fn with_tables(
        settings: &Settings,
        rules: Arc<isvaryam_config::IntentRules>,
        aliases: Arc<isvaryam_config::AliasTable>,
        guard_lists: Arc<isvaryam_config::GuardLists>,
        pools: Arc<isvaryam_config::ResponsePools>,
        reference: Arc<isvaryam_config::ReferenceData>,
        recommendations: Arc<isvaryam_config::RecommendationGraph>,
        catalog: Arc<dyn CatalogStore>,
        selector: Arc<dyn ResponseSelector>,
    ) -> Self {
        Self {
            guard: ContentGuard::new(guard_lists.clone()),
            classifier: IntentClassifier::new(rules),
            resolver: EntityResolver::new(aliases),
            composer: ResponseComposer::new(
                pools,
                guard_lists,
                reference,
                recommendations,
                catalog,
                selector,
            ),
            contexts: ContextStore::new(&settings.context),
        }
    }

    /// Convenience constructor with the production randomized selector
    pub fn with_random_selector(settings: &Settings, catalog: Arc<dyn CatalogStore>) -> Self {
        Self::new(settings, catalog, Arc::new(RandomSelector))
    }

    /// Handle one user turn
    pub async fn handle(&self, user_id: &str, message: &str) -> Result<Reply> {
        let normalized = normalize(message);
        let context = self.contexts.get(user_id);

        let blocked = self.guard.is_blocked(&normalized);
        if blocked {
            tracing::warn!(user_id, input = %message, "blocked input");
        }
        let intents = if blocked {
            Vec::new()
        } else {
            self.classifier.classify(&normalized.text)
        };
        let product = if blocked {
            None
        } else {
            self.resolver.resolve(&normalized)
        };

        tracing::debug!(
            user_id,
            blocked,
            intents = ?intents,
            product = ?product.as_ref().map(|p| p.key),
            "classified turn"
        );

        let outcome = self
            .composer
            .compose(ComposeInput {
                message: &normalized,
                blocked,
                intents: &intents,
                product,
                context: &context,
            })
            .await?;

        // Carry forward the previous turn's fields when this turn did
        // not establish new ones.
        let next = ConversationContext::turn(
            outcome.last_intent.or(context.last_intent),
            outcome.last_product.or(context.last_product),
        );
        self.contexts.update(user_id, next);

        Ok(outcome.reply)
    }

    /// Number of live conversation contexts
    pub fn active_contexts(&self) -> usize {
        self.contexts.len()
    }
}
