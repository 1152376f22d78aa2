//! Query pipeline: tokenize -> classify -> extract -> respond.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use mustock_inventory::CatalogSnapshot;

use crate::classifier::IntentModel;
use crate::config::AssistantConfig;
use crate::corpus::TrainingCorpus;
use crate::error::AssistantError;
use crate::extractor::{Entity, EntityExtractor, NumericHint};
use crate::intent::Intent;
use crate::response::{ResponseContext, respond};
use crate::similarity::{JaroWinkler, Similarity};
use crate::tokenizer::tokenize;

/// Everything the host needs to answer one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub query: String,
    pub intent: Intent,
    /// Classifier posterior for `intent`; `0.0` when no word was recognized.
    pub confidence: f64,
    pub entities: Vec<Entity>,
    pub hints: Vec<NumericHint>,
    pub response_text: String,
    pub response_data: Value,
}

/// Sole entry point for hosts.
///
/// Holds no per-query state, so one dispatcher can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct QueryDispatcher<S = JaroWinkler> {
    model: Arc<IntentModel>,
    extractor: EntityExtractor<S>,
    config: AssistantConfig,
}

impl QueryDispatcher<JaroWinkler> {
    pub fn new(model: Arc<IntentModel>, config: AssistantConfig) -> Self {
        Self::with_similarity(model, config, JaroWinkler)
    }

    /// Validate `config` and train on the shipped corpus.
    pub fn builtin(config: AssistantConfig) -> Result<Self, AssistantError> {
        config.validate()?;
        let model = IntentModel::train(&TrainingCorpus::builtin())?;
        Ok(Self::new(Arc::new(model), config))
    }
}

impl<S: Similarity> QueryDispatcher<S> {
    pub fn with_similarity(model: Arc<IntentModel>, config: AssistantConfig, similarity: S) -> Self {
        Self {
            extractor: EntityExtractor::with_similarity(similarity, &config),
            model,
            config,
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn model(&self) -> &IntentModel {
        &self.model
    }

    /// Answer `raw` against `catalog` using the configured low-stock threshold.
    pub fn handle(&self, raw: &str, catalog: &CatalogSnapshot) -> Result<QueryResult, AssistantError> {
        self.handle_with_threshold(raw, catalog, self.config.low_stock_threshold)
    }

    /// Answer `raw` against `catalog`.
    ///
    /// Only empty or whitespace-only input is an error. A query that matches
    /// nothing still produces a response.
    pub fn handle_with_threshold(
        &self,
        raw: &str,
        catalog: &CatalogSnapshot,
        low_stock_threshold: u32,
    ) -> Result<QueryResult, AssistantError> {
        let query = raw.trim();
        if query.is_empty() {
            tracing::warn!("rejected empty query");
            return Err(AssistantError::InvalidInput("query text is empty".to_string()));
        }

        let tokens = tokenize(query);
        let classification = self.model.classify_tokens(&tokens);
        // No recognized word: the prior alone is not an answer.
        let (intent, confidence) = if classification.evidence == 0 {
            (Intent::Unknown, 0.0)
        } else {
            (classification.intent, classification.confidence)
        };
        tracing::debug!(
            "classified query as {} (confidence {:.3}, {} known tokens)",
            intent,
            confidence,
            classification.evidence
        );

        let matches = self.extractor.extract_tokens(&tokens, catalog);
        tracing::debug!(
            "extracted {} entities and {} numeric hints",
            matches.entities.len(),
            matches.hints.len()
        );

        let response = respond(
            intent,
            &ResponseContext {
                query,
                matches: &matches,
                catalog,
                low_stock_threshold,
            },
        );

        tracing::info!(
            intent = %intent,
            entities = matches.entities.len(),
            confidence,
            catalog_version = catalog.version(),
            "answered query"
        );

        Ok(QueryResult {
            query: query.to_string(),
            intent,
            confidence,
            entities: matches.entities,
            hints: matches.hints,
            response_text: response.text,
            response_data: response.data,
        })
    }
}
