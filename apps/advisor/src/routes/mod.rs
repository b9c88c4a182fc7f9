pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::planning::handlers as planning;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;
use crate::store::handlers as plans;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Advisor API
        .route("/api/v1/suggestions", post(recommendation::handle_suggest))
        .route(
            "/api/v1/plans/generate",
            post(planning::handle_generate_plan),
        )
        // Plan store API
        .route(
            "/api/v1/users/:user_id/plans",
            get(plans::handle_list_plans).post(plans::handle_save_plan),
        )
        .route(
            "/api/v1/users/:user_id/plans/:plan_id",
            get(plans::handle_get_plan)
                .patch(plans::handle_update_plan)
                .delete(plans::handle_delete_plan),
        )
        .route(
            "/api/v1/users/:user_id/plans/:plan_id/milestones/:index",
            put(plans::handle_set_milestone),
        )
        .route(
            "/api/v1/users/:user_id/plans/:plan_id/export",
            get(export::handle_export_plan),
        )
        .with_state(state)
}
