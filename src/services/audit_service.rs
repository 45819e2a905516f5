use crate::error::Result;
use crate::models::audit_log::AuditLog;
use serde_json::Value as JsonValue;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub const ENTITY_PROFILE: &str = "profile";
pub const ENTITY_DOCUMENT: &str = "document";

#[derive(Clone)]
pub struct AuditService {
    pool: PgPool,
}

impl AuditService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends an entry on the caller's connection so it commits with the change it describes.
    pub async fn record(
        conn: &mut PgConnection,
        actor_id: Option<Uuid>,
        action: &str,
        entity_type: &str,
        entity_id: Uuid,
        changes: Option<JsonValue>,
    ) -> Result<AuditLog> {
        let row = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (actor_id, action, entity_type, entity_id, changes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, actor_id, action, entity_type, entity_id, changes, created_at
            "#,
        )
        .bind(actor_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(changes)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    /// Status transitions of a profile plus reviews of its documents, newest first.
    pub async fn history_for_profile(&self, profile_id: Uuid) -> Result<Vec<AuditLog>> {
        let rows = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT id, actor_id, action, entity_type, entity_id, changes, created_at
            FROM audit_logs
            WHERE (entity_type = $2 AND entity_id = $1)
               OR (entity_type = $3 AND changes->>'profile_id' = $1::text)
            ORDER BY created_at DESC
            "#,
        )
        .bind(profile_id)
        .bind(ENTITY_PROFILE)
        .bind(ENTITY_DOCUMENT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
