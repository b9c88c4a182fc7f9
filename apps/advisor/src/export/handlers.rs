use axum::{
    extract::{Path, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::document::render_document;
use crate::state::AppState;
use crate::store::PlanStore;

const EXPORT_LOCATION: HeaderName = HeaderName::from_static("x-export-location");

/// GET /api/v1/users/:user_id/plans/:plan_id/export
///
/// Renders the plan, hands it to the configured sink, and returns the same
/// document as a download.
pub async fn handle_export_plan(
    State(state): State<AppState>,
    Path((user_id, plan_id)): Path<(String, Uuid)>,
) -> Result<Response, AppError> {
    let store = PlanStore::for_user(state.plans.clone(), &user_id).await?;
    let plan = store
        .get_plan_by_id(plan_id)
        .ok_or_else(|| AppError::NotFound(format!("Plan {plan_id} not found")))?;

    let document = render_document(plan, Utc::now());
    let receipt = state.export_sink.deliver(&document).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        document.filename.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (EXPORT_LOCATION, receipt.location),
        ],
        document.body,
    )
        .into_response())
}
