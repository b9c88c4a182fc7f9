use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::questionnaire::QuestionnaireAnswers;
use crate::models::suggestion::CostRange;

/// Plans share the suggestion cost shape.
pub type CostEstimate = CostRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Course,
    Book,
    Article,
    Guide,
    Interactive,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Course => "course",
            ResourceType::Book => "book",
            ResourceType::Article => "article",
            ResourceType::Guide => "guide",
            ResourceType::Interactive => "interactive",
        }
    }
}

/// A learning resource attached to a milestone. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    /// Whole dollars; 0 means free.
    pub cost: u32,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Resource {
    pub fn is_free(&self) -> bool {
        self.cost == 0
    }
}

/// One unit of learning work. `month` and `week` are 1-based labels, not a sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub month: u32,
    pub week: u32,
    pub title: String,
    pub description: String,
    pub hours: u32,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Milestone {
    /// Flips completion. Completing stamps `completed_at`; undoing clears it.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.completed = completed;
        self.completed_at = if completed { Some(now) } else { None };
    }
}

/// A generated plan before the store assigns identity and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub selected_path: String,
    pub milestones: Vec<Milestone>,
    pub cost_estimate: CostEstimate,
    pub total_duration_months: u32,
    pub weekly_hours: u32,
}

/// A persisted, user-owned plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub user_id: String,
    pub selected_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub milestones: Vec<Milestone>,
    pub cost_estimate: CostEstimate,
    pub total_duration_months: u32,
    pub weekly_hours: u32,
}

impl Plan {
    pub fn from_draft(draft: PlanDraft, user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            selected_path: draft.selected_path,
            created_at: now,
            updated_at: now,
            milestones: draft.milestones,
            cost_estimate: draft.cost_estimate,
            total_duration_months: draft.total_duration_months,
            weekly_hours: draft.weekly_hours,
        }
    }

    /// Shallow merge: every field present in the patch replaces the stored one.
    pub fn apply(&mut self, patch: PlanPatch, now: DateTime<Utc>) {
        if let Some(selected_path) = patch.selected_path {
            self.selected_path = selected_path;
        }
        if let Some(milestones) = patch.milestones {
            self.milestones = milestones;
        }
        if let Some(cost_estimate) = patch.cost_estimate {
            self.cost_estimate = cost_estimate;
        }
        if let Some(months) = patch.total_duration_months {
            self.total_duration_months = months;
        }
        if let Some(hours) = patch.weekly_hours {
            self.weekly_hours = hours;
        }
        self.updated_at = now;
    }

    pub fn completed_count(&self) -> usize {
        self.milestones.iter().filter(|m| m.completed).count()
    }
}

/// Partial update for a stored plan. Identity fields are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanPatch {
    pub selected_path: Option<String>,
    pub milestones: Option<Vec<Milestone>>,
    pub cost_estimate: Option<CostEstimate>,
    pub total_duration_months: Option<u32>,
    pub weekly_hours: Option<u32>,
}

/// Plan-generation request: the chosen path plus the questionnaire it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub selected_path: String,
    #[serde(default)]
    pub context: QuestionnaireAnswers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,
}

impl PlanRequest {
    pub fn new(selected_path: impl Into<String>, context: QuestionnaireAnswers) -> Self {
        Self {
            user_id: context.user_id.clone(),
            selected_path: selected_path.into(),
            context,
            preferences: None,
        }
    }
}
