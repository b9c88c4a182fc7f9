use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::models::questionnaire::QuestionnaireAnswers;
use crate::models::suggestion::SuggestionSet;
use crate::recommendation::validation::validate_answers;
use crate::state::AppState;

/// POST /api/v1/suggestions
///
/// Validates a questionnaire submission and returns ranked career suggestions.
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(answers): Json<QuestionnaireAnswers>,
) -> Result<Json<SuggestionSet>, AppError> {
    validate_answers(&answers).into_result()?;

    let set = state.advisor.suggest(&answers).await?;
    info!(
        "Suggested {} paths via {} advisor (confidence {:?})",
        set.top_paths.len(),
        state.advisor.backend(),
        set.confidence
    );

    Ok(Json(set))
}
