use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::document::{Document, DocumentType};
use crate::services::audit_service::{AuditService, ENTITY_DOCUMENT};
use crate::services::review_rules::ReviewDecision;
use crate::services::storage_service::{SignedUrl, StorageService};

const DOCUMENT_COLUMNS: &str = "id, profile_id, document_type, file_path, status, review_notes, reviewed_by, reviewed_at, created_at, updated_at";

#[derive(Clone)]
pub struct DocumentService {
    pool: PgPool,
    storage: StorageService,
}

impl DocumentService {
    pub fn new(pool: PgPool, storage: StorageService) -> Self {
        Self { pool, storage }
    }

    pub async fn list_for_profile(&self, profile_id: Uuid) -> Result<Vec<Document>> {
        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT {} FROM documents WHERE profile_id = $1 ORDER BY document_type",
            DOCUMENT_COLUMNS
        ))
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    pub async fn get(&self, id: Uuid) -> Result<Document> {
        let document = sqlx::query_as::<_, Document>(&format!(
            "SELECT {} FROM documents WHERE id = $1",
            DOCUMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Document not found".into()))?;
        Ok(document)
    }

    pub fn signed_url(&self, document: &Document) -> Result<SignedUrl> {
        self.storage.signed_url(&document.file_path, Utc::now())
    }

    pub async fn review(
        &self,
        id: Uuid,
        reviewer_id: Uuid,
        decision: ReviewDecision,
    ) -> Result<Document> {
        let mut tx = self.pool.begin().await?;

        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            UPDATE documents
            SET status = $2, review_notes = $3, reviewed_by = $4, reviewed_at = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(id)
        .bind(decision.status())
        .bind(decision.notes())
        .bind(reviewer_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Document not found".into()))?;

        AuditService::record(
            &mut *tx,
            Some(reviewer_id),
            "document.review",
            ENTITY_DOCUMENT,
            document.id,
            Some(json!({
                "profile_id": document.profile_id,
                "document_type": document.document_type,
                "status": document.status,
                "review_notes": document.review_notes,
            })),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            document_id = %document.id,
            reviewer_id = %reviewer_id,
            status = ?document.status,
            "document reviewed"
        );
        Ok(document)
    }

    /// Stores a file and records it as the profile's document of `document_type`.
    ///
    /// An existing document of the same type is replaced: its review state is
    /// reset to pending and the previous file is removed. If the database write
    /// fails the new file is removed again.
    pub async fn upload(
        &self,
        profile_id: Uuid,
        document_type: DocumentType,
        filename: &str,
        data: &[u8],
    ) -> Result<Document> {
        let ext = StorageService::validate_upload(filename, data)?;
        let file_path = self.storage.store(profile_id, &ext, data).await?;

        match self.record_upload(profile_id, document_type, &file_path).await {
            Ok((document, replaced)) => {
                if let Some(old_path) = replaced {
                    if old_path != file_path {
                        self.storage.remove(&old_path).await;
                    }
                }
                tracing::info!(
                    document_id = %document.id,
                    profile_id = %profile_id,
                    document_type = ?document_type,
                    "document uploaded"
                );
                Ok(document)
            }
            Err(e) => {
                tracing::warn!(profile_id = %profile_id, error = %e, "document write failed, removing upload");
                self.storage.remove(&file_path).await;
                Err(e)
            }
        }
    }

    async fn record_upload(
        &self,
        profile_id: Uuid,
        document_type: DocumentType,
        file_path: &str,
    ) -> Result<(Document, Option<String>)> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(Uuid, String)> = sqlx::query_as(
            "SELECT id, file_path FROM documents WHERE profile_id = $1 AND document_type = $2 FOR UPDATE",
        )
        .bind(profile_id)
        .bind(document_type)
        .fetch_optional(&mut *tx)
        .await?;

        let (document, replaced) = match existing {
            Some((id, old_path)) => {
                let document = sqlx::query_as::<_, Document>(&format!(
                    r#"
                    UPDATE documents
                    SET file_path = $2, status = NULL, review_notes = NULL,
                        reviewed_by = NULL, reviewed_at = NULL, updated_at = NOW()
                    WHERE id = $1
                    RETURNING {}
                    "#,
                    DOCUMENT_COLUMNS
                ))
                .bind(id)
                .bind(file_path)
                .fetch_one(&mut *tx)
                .await?;
                (document, Some(old_path))
            }
            None => {
                let document = sqlx::query_as::<_, Document>(&format!(
                    r#"
                    INSERT INTO documents (profile_id, document_type, file_path)
                    VALUES ($1, $2, $3)
                    RETURNING {}
                    "#,
                    DOCUMENT_COLUMNS
                ))
                .bind(profile_id)
                .bind(document_type)
                .bind(file_path)
                .fetch_one(&mut *tx)
                .await?;
                (document, None)
            }
        };

        tx.commit().await?;
        Ok((document, replaced))
    }
}
