//! Key-value persistence for plan collections: `user_id -> [Plan]`.
//!
//! The whole collection is the unit of persistence. Every backend stores and
//! returns the array exactly as given, order included.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::AppError;
use crate::models::plan::Plan;

#[async_trait]
pub trait PlanPersistence: Send + Sync {
    /// Returns the user's collection, or an empty one if nothing was stored.
    async fn load(&self, user_id: &str) -> Result<Vec<Plan>, AppError>;

    /// Replaces the user's whole collection.
    async fn store(&self, user_id: &str, plans: &[Plan]) -> Result<(), AppError>;

    fn backend(&self) -> &'static str;
}

/// Storage key shared by the key-value backends.
pub fn collection_key(user_id: &str) -> String {
    format!("plans_{user_id}")
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryPersistence {
    collections: RwLock<HashMap<String, Vec<Plan>>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanPersistence for InMemoryPersistence {
    async fn load(&self, user_id: &str) -> Result<Vec<Plan>, AppError> {
        Ok(self
            .collections
            .read()
            .await
            .get(&collection_key(user_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn store(&self, user_id: &str, plans: &[Plan]) -> Result<(), AppError> {
        self.collections
            .write()
            .await
            .insert(collection_key(user_id), plans.to_vec());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

/// One row per user in `plan_collections`; the collection lives in a JSONB column.
pub struct PgPersistence {
    pool: PgPool,
}

impl PgPersistence {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanPersistence for PgPersistence {
    async fn load(&self, user_id: &str) -> Result<Vec<Plan>, AppError> {
        let row: Option<(Json<Vec<Plan>>,)> =
            sqlx::query_as("SELECT plans FROM plan_collections WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(Json(plans),)| plans).unwrap_or_default())
    }

    async fn store(&self, user_id: &str, plans: &[Plan]) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO plan_collections (user_id, plans, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (user_id)
            DO UPDATE SET plans = EXCLUDED.plans, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(Json(plans))
        .execute(&self.pool)
        .await?;

        debug!("Stored {} plans for user {user_id} in PostgreSQL", plans.len());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Redis
// ────────────────────────────────────────────────────────────────────────────

/// Stores each collection as a JSON string under `plans_<user_id>`.
pub struct RedisPersistence {
    client: redis::Client,
}

impl RedisPersistence {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlanPersistence for RedisPersistence {
    async fn load(&self, user_id: &str) -> Result<Vec<Plan>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(collection_key(user_id)).await?;

        match raw {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                AppError::Internal(anyhow::anyhow!(
                    "Corrupt plan collection for user {user_id}: {e}"
                ))
            }),
            None => Ok(vec![]),
        }
    }

    async fn store(&self, user_id: &str, plans: &[Plan]) -> Result<(), AppError> {
        let json = serde_json::to_string(plans)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize plans: {e}")))?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(collection_key(user_id), json).await?;

        debug!("Stored {} plans for user {user_id} in Redis", plans.len());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::PlanDraft;
    use crate::models::suggestion::CostRange;
    use chrono::Utc;

    fn plan(user: &str, path: &str) -> Plan {
        Plan::from_draft(
            PlanDraft {
                selected_path: path.to_string(),
                milestones: vec![],
                cost_estimate: CostRange::new(0, 0, 0),
                total_duration_months: 6,
                weekly_hours: 15,
            },
            user,
            Utc::now(),
        )
    }

    #[test]
    fn test_collection_key_format() {
        assert_eq!(collection_key("mock-uid-1"), "plans_mock-uid-1");
    }

    #[tokio::test]
    async fn test_in_memory_load_missing_is_empty() {
        let store = InMemoryPersistence::new();
        assert!(store.load("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_store_replaces_collection() {
        let store = InMemoryPersistence::new();
        store
            .store("u1", &[plan("u1", "A"), plan("u1", "B")])
            .await
            .unwrap();
        store.store("u1", &[plan("u1", "C")]).await.unwrap();

        let loaded = store.load("u1").await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].selected_path, "C");
    }

    #[tokio::test]
    async fn test_in_memory_users_are_disjoint() {
        let store = InMemoryPersistence::new();
        store.store("u1", &[plan("u1", "A")]).await.unwrap();
        assert!(store.load("u2").await.unwrap().is_empty());
    }
}
