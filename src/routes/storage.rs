use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    dto::document_dto::StorageDownloadQuery,
    error::{Error, Result},
    services::storage_service::StorageService,
    AppState,
};

/// Serves a stored document to whoever holds a valid, unexpired signed link.
#[utoipa::path(
    get,
    path = "/api/storage/documents/{path}",
    params(
        ("path" = String, Path, description = "Object path, {profile_id}/{timestamp}.{ext}"),
        StorageDownloadQuery
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 403, description = "Signature invalid or expired"),
        (status = 404, description = "File not found")
    )
)]
#[axum::debug_handler]
pub async fn download_document(
    State(state): State<AppState>,
    Path(object_path): Path<String>,
    Query(query): Query<StorageDownloadQuery>,
) -> Result<impl IntoResponse> {
    let now = Utc::now().timestamp();
    if !state
        .storage
        .verify(&object_path, query.expires, &query.signature, now)
    {
        tracing::debug!(path = %object_path, "refused storage download");
        return Err(Error::Forbidden("Invalid or expired link".into()));
    }

    let bytes = state.storage.read(&object_path).await?;
    Ok((
        [(header::CONTENT_TYPE, StorageService::content_type(&object_path))],
        bytes,
    ))
}
