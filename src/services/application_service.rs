use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::document::DocumentStatus;
use crate::models::profile::{ApplicationStatus, Profile};
use crate::services::audit_service::{AuditService, ENTITY_PROFILE};
use crate::services::transition_rules::{plan_transition, StatusAction};

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies `action` to a candidate's application.
    ///
    /// The profile row and its documents are locked for the duration of the
    /// transaction, so a concurrent review cannot slip in between the guard
    /// check and the status write.
    pub async fn transition(
        &self,
        profile_id: Uuid,
        actor_id: Uuid,
        action: StatusAction,
        reason: Option<&str>,
    ) -> Result<Profile> {
        let mut tx = self.pool.begin().await?;

        let current: Option<Option<ApplicationStatus>> =
            sqlx::query_scalar("SELECT application_status FROM profiles WHERE id = $1 FOR UPDATE")
                .bind(profile_id)
                .fetch_optional(&mut *tx)
                .await?;
        let current = current.ok_or_else(|| Error::NotFound("Application not found".into()))?;

        let documents: Vec<Option<DocumentStatus>> = sqlx::query_scalar(
            "SELECT status FROM documents WHERE profile_id = $1 ORDER BY document_type FOR SHARE",
        )
        .bind(profile_id)
        .fetch_all(&mut *tx)
        .await?;

        let plan = plan_transition(current, action, &documents, reason)?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET application_status = $2, rejection_reason = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, full_name, role, application_status, rejection_reason, middleman_id, created_at, updated_at
            "#,
        )
        .bind(profile_id)
        .bind(plan.to)
        .bind(plan.rejection_reason.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        AuditService::record(
            &mut *tx,
            Some(actor_id),
            &format!("application.{}", action.as_str()),
            ENTITY_PROFILE,
            profile_id,
            Some(json!({
                "from": plan.from,
                "to": plan.to,
                "reason": plan.rejection_reason,
            })),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            profile_id = %profile_id,
            actor_id = %actor_id,
            from = plan.from.label(),
            to = plan.to.label(),
            "application status changed"
        );
        Ok(profile)
    }
}
