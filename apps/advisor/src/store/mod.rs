//! Plan Store: CRUD over the signed-in user's plan collection.
//!
//! The store holds one user's collection in memory at a time. Every mutation
//! rewrites the whole collection through `PlanPersistence`; misses on update /
//! delete / lookup are silent no-ops so callers can retry freely.

pub mod handlers;
pub mod persistence;

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::{Plan, PlanDraft, PlanPatch};

use self::persistence::PlanPersistence;

struct ActiveCollection {
    user_id: String,
    plans: Vec<Plan>,
}

pub struct PlanStore {
    persistence: Arc<dyn PlanPersistence>,
    active: Option<ActiveCollection>,
}

/// User ids end up in storage keys and export paths.
fn is_valid_user_id(user_id: &str) -> bool {
    !user_id.trim().is_empty()
        && user_id != "."
        && user_id != ".."
        && !user_id.chars().any(char::is_control)
}

impl PlanStore {
    pub fn new(persistence: Arc<dyn PlanPersistence>) -> Self {
        Self {
            persistence,
            active: None,
        }
    }

    /// A store already signed in as `user_id`. Rejects ids that are blank,
    /// `.` or `..`, or contain control characters.
    pub async fn for_user(
        persistence: Arc<dyn PlanPersistence>,
        user_id: &str,
    ) -> Result<Self, AppError> {
        if !is_valid_user_id(user_id) {
            return Err(AppError::Unauthorized);
        }
        let mut store = Self::new(persistence);
        store.sign_in(user_id).await?;
        Ok(store)
    }

    /// Loads `user_id`'s collection and makes it the active one, replacing
    /// whatever user was active before.
    pub async fn sign_in(&mut self, user_id: &str) -> Result<(), AppError> {
        let plans = self.persistence.load(user_id).await?;
        debug!(
            "Loaded {} plans for user {user_id} from {}",
            plans.len(),
            self.persistence.backend()
        );
        self.active = Some(ActiveCollection {
            user_id: user_id.to_string(),
            plans,
        });
        Ok(())
    }

    /// Drops the in-memory view. Persisted plans are left untouched.
    pub fn sign_out(&mut self) {
        self.active = None;
    }

    pub fn active_user(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.user_id.as_str())
    }

    /// The active user's plans in insertion order; empty when signed out.
    pub fn plans(&self) -> &[Plan] {
        self.active.as_ref().map(|a| a.plans.as_slice()).unwrap_or(&[])
    }

    /// Assigns id and timestamps, appends, and persists the collection.
    pub async fn save_plan(&mut self, draft: PlanDraft) -> Result<Plan, AppError> {
        let active = self.active.as_mut().ok_or(AppError::Unauthorized)?;
        let plan = Plan::from_draft(draft, &active.user_id, Utc::now());
        active.plans.push(plan.clone());
        self.persist().await?;

        info!(
            "Saved plan {} ({}) for user {}",
            plan.id, plan.selected_path, plan.user_id
        );
        Ok(plan)
    }

    /// Shallow-merges `patch` into the plan with `id`. Unknown ids are ignored.
    pub async fn update_plan(&mut self, id: Uuid, patch: PlanPatch) -> Result<(), AppError> {
        let active = self.active.as_mut().ok_or(AppError::Unauthorized)?;
        let Some(plan) = active.plans.iter_mut().find(|p| p.id == id) else {
            debug!("update_plan: no plan {id} for user {}", active.user_id);
            return Ok(());
        };
        plan.apply(patch, Utc::now());
        self.persist().await
    }

    /// Marks one milestone done or not done. Unknown plan or index is ignored.
    pub async fn set_milestone_completed(
        &mut self,
        id: Uuid,
        index: usize,
        completed: bool,
    ) -> Result<(), AppError> {
        let active = self.active.as_mut().ok_or(AppError::Unauthorized)?;
        let Some(plan) = active.plans.iter_mut().find(|p| p.id == id) else {
            return Ok(());
        };
        let now = Utc::now();
        let Some(milestone) = plan.milestones.get_mut(index) else {
            debug!("set_milestone_completed: plan {id} has no milestone {index}");
            return Ok(());
        };
        milestone.set_completed(completed, now);
        plan.updated_at = now;
        self.persist().await
    }

    /// Removes the plan with `id`. Unknown ids are ignored.
    pub async fn delete_plan(&mut self, id: Uuid) -> Result<(), AppError> {
        let active = self.active.as_mut().ok_or(AppError::Unauthorized)?;
        let before = active.plans.len();
        active.plans.retain(|p| p.id != id);
        if active.plans.len() == before {
            return Ok(());
        }
        info!("Deleted plan {id} for user {}", active.user_id);
        self.persist().await
    }

    pub fn get_plan_by_id(&self, id: Uuid) -> Option<&Plan> {
        self.plans().iter().find(|p| p.id == id)
    }

    async fn persist(&self) -> Result<(), AppError> {
        let active = self.active.as_ref().ok_or(AppError::Unauthorized)?;
        self.persistence
            .store(&active.user_id, &active.plans)
            .await
    }
}
