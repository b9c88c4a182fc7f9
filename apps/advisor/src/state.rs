use std::sync::Arc;

use crate::advisor::CareerAdvisor;
use crate::export::sink::ExportSink;
use crate::store::persistence::PlanPersistence;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Local or remote advisor, chosen from `ADVISOR_API_BASE_URL` / `USE_MOCKS`.
    pub advisor: Arc<dyn CareerAdvisor>,
    /// Backing store for per-user plan collections.
    pub plans: Arc<dyn PlanPersistence>,
    pub export_sink: Arc<dyn ExportSink>,
}
