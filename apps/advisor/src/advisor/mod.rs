//! Career advisor: pluggable, trait-based source of suggestions and plan drafts.
//!
//! Default: `LocalAdvisor` (rule engine + static milestone tables, deterministic).
//! Remote: `RemoteAdvisor` calls the advisor service over HTTP and, unless
//! disabled, falls back to the local advisor when the call fails.
//!
//! `AppState` holds an `Arc<dyn CareerAdvisor>`, chosen at startup via config.

pub mod client;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::plan::{PlanDraft, PlanRequest};
use crate::models::questionnaire::QuestionnaireAnswers;
use crate::models::suggestion::SuggestionSet;
use crate::planning::generator;
use crate::recommendation::engine::{self, MAX_SUGGESTIONS};

use self::client::AdvisorClient;

/// Implement this to swap suggestion / plan sources without touching handlers.
#[async_trait]
pub trait CareerAdvisor: Send + Sync {
    async fn suggest(&self, answers: &QuestionnaireAnswers) -> Result<SuggestionSet, AppError>;

    async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanDraft, AppError>;

    /// "local" | "remote", for logs and transparency.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LocalAdvisor
// ────────────────────────────────────────────────────────────────────────────

/// In-process advisor. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAdvisor;

#[async_trait]
impl CareerAdvisor for LocalAdvisor {
    async fn suggest(&self, answers: &QuestionnaireAnswers) -> Result<SuggestionSet, AppError> {
        Ok(engine::suggest(answers))
    }

    async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanDraft, AppError> {
        Ok(generator::generate(request))
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RemoteAdvisor
// ────────────────────────────────────────────────────────────────────────────

pub struct RemoteAdvisor {
    client: AdvisorClient,
    fallback: Option<LocalAdvisor>,
}

impl RemoteAdvisor {
    pub fn new(client: AdvisorClient, fallback: Option<LocalAdvisor>) -> Self {
        Self { client, fallback }
    }
}

#[async_trait]
impl CareerAdvisor for RemoteAdvisor {
    async fn suggest(&self, answers: &QuestionnaireAnswers) -> Result<SuggestionSet, AppError> {
        match self.client.suggest(answers).await {
            Ok(set) => Ok(sanitize_suggestions(set)),
            Err(e) => match &self.fallback {
                Some(local) => {
                    warn!("Remote suggestion call failed, falling back to local advisor: {e}");
                    local.suggest(answers).await
                }
                None => Err(AppError::Remote(format!("Career suggestion failed: {e}"))),
            },
        }
    }

    async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanDraft, AppError> {
        let reason = match self.client.plan(request).await {
            Ok(draft) if draft.cost_estimate.is_ordered() => return Ok(draft),
            Ok(draft) => format!(
                "cost estimate out of order ({}/{}/{})",
                draft.cost_estimate.low, draft.cost_estimate.mid, draft.cost_estimate.high
            ),
            Err(e) => e.to_string(),
        };

        match &self.fallback {
            Some(local) => {
                warn!("Remote plan generation failed, falling back to local advisor: {reason}");
                local.generate_plan(request).await
            }
            None => Err(AppError::Remote(format!("Plan generation failed: {reason}"))),
        }
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

/// Holds remote output to the same bounds as the local engine.
fn sanitize_suggestions(mut set: SuggestionSet) -> SuggestionSet {
    set.top_paths.truncate(MAX_SUGGESTIONS);
    for suggestion in &mut set.top_paths {
        suggestion.score = suggestion.score.min(100);
    }
    set
}

/// Picks the advisor implementation from configuration.
pub fn build_advisor(config: &Config) -> anyhow::Result<Arc<dyn CareerAdvisor>> {
    match &config.advisor_api_base_url {
        Some(base_url) => {
            let client = AdvisorClient::new(base_url, config.advisor_max_attempts)?;
            let fallback = config.advisor_local_fallback.then_some(LocalAdvisor);
            info!(
                "Using remote advisor at {} (local fallback: {})",
                client.base_url(),
                fallback.is_some()
            );
            Ok(Arc::new(RemoteAdvisor::new(client, fallback)))
        }
        None => {
            info!("Using local advisor");
            Ok(Arc::new(LocalAdvisor))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
