use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::models::plan::{PlanDraft, PlanRequest};
use crate::planning::generator::has_dedicated_track;
use crate::state::AppState;

/// POST /api/v1/plans/generate
///
/// Generates a plan draft for the selected path. The draft is not saved;
/// clients POST it to the user's plan collection to keep it.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanDraft>, AppError> {
    if request.selected_path.trim().is_empty() {
        return Err(AppError::Validation("selectedPath cannot be empty".to_string()));
    }

    let draft = state.advisor.generate_plan(&request).await?;
    info!(
        "Generated {} milestones for {:?} via {} advisor (dedicated track: {})",
        draft.milestones.len(),
        request.selected_path,
        state.advisor.backend(),
        has_dedicated_track(&request.selected_path)
    );

    Ok(Json(draft))
}
