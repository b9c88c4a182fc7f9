//! Axum route handlers for a user's saved plans.
//!
//! Each request signs a fresh `PlanStore` in as the path's user, so the
//! collection is always read from persistence before it is mutated.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::{Plan, PlanDraft, PlanPatch};
use crate::state::AppState;
use crate::store::PlanStore;

#[derive(Debug, Deserialize)]
pub struct MilestoneUpdate {
    pub completed: bool,
}

async fn open_store(state: &AppState, user_id: &str) -> Result<PlanStore, AppError> {
    PlanStore::for_user(state.plans.clone(), user_id).await
}

/// GET /api/v1/users/:user_id/plans
pub async fn handle_list_plans(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Plan>>, AppError> {
    let store = open_store(&state, &user_id).await?;
    Ok(Json(store.plans().to_vec()))
}

/// POST /api/v1/users/:user_id/plans
///
/// Saves a generated draft; the response carries the assigned id and timestamps.
pub async fn handle_save_plan(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(draft): Json<PlanDraft>,
) -> Result<(StatusCode, Json<Plan>), AppError> {
    let mut store = open_store(&state, &user_id).await?;
    let plan = store.save_plan(draft).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/users/:user_id/plans/:plan_id
pub async fn handle_get_plan(
    State(state): State<AppState>,
    Path((user_id, plan_id)): Path<(String, Uuid)>,
) -> Result<Json<Plan>, AppError> {
    let store = open_store(&state, &user_id).await?;
    store
        .get_plan_by_id(plan_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Plan {plan_id} not found")))
}

/// PATCH /api/v1/users/:user_id/plans/:plan_id
///
/// Unknown plan ids are accepted and ignored.
pub async fn handle_update_plan(
    State(state): State<AppState>,
    Path((user_id, plan_id)): Path<(String, Uuid)>,
    Json(patch): Json<PlanPatch>,
) -> Result<StatusCode, AppError> {
    let mut store = open_store(&state, &user_id).await?;
    store.update_plan(plan_id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/users/:user_id/plans/:plan_id/milestones/:index
pub async fn handle_set_milestone(
    State(state): State<AppState>,
    Path((user_id, plan_id, index)): Path<(String, Uuid, usize)>,
    Json(update): Json<MilestoneUpdate>,
) -> Result<StatusCode, AppError> {
    let mut store = open_store(&state, &user_id).await?;
    store
        .set_milestone_completed(plan_id, index, update.completed)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/:user_id/plans/:plan_id
pub async fn handle_delete_plan(
    State(state): State<AppState>,
    Path((user_id, plan_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AppError> {
    let mut store = open_store(&state, &user_id).await?;
    store.delete_plan(plan_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
