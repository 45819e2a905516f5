use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::document_dto::RejectDocumentPayload,
    error::{Error, Result},
    middleware::auth::Claims,
    models::{document::DocumentType, profile::UserRole},
    services::review_rules::ReviewDecision,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/profiles/{id}/documents",
    params(("id" = Uuid, Path, description = "Candidate profile ID")),
    responses(
        (status = 200, description = "Uploaded documents", body = Vec<Document>),
        (status = 403, description = "Not visible to the caller")
    )
)]
#[axum::debug_handler]
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let actor = super::acting_profile(&state, &claims, &[]).await?;
    let profile = state.profile_service.get_required(profile_id).await?;
    if !actor.can_view(&profile) {
        return Err(Error::Forbidden("Documents are not visible to you".into()));
    }
    let documents = state.document_service.list_for_profile(profile_id).await?;
    Ok(Json(documents))
}

/// Multipart upload with a `document_type` text field and a `file` field.
/// Uploading a type that already exists replaces it and puts it back into review.
#[utoipa::path(
    post,
    path = "/api/profiles/{id}/documents",
    params(("id" = Uuid, Path, description = "Candidate profile ID")),
    responses(
        (status = 201, description = "Document stored", body = Document),
        (status = 400, description = "Missing field or unsupported file"),
        (status = 403, description = "Caller may not upload for this profile")
    )
)]
#[axum::debug_handler]
pub async fn upload_document(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(profile_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut document_type: Option<DocumentType> = None;
    let mut file: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "document_type" => {
                let raw = field.text().await?;
                document_type = Some(raw.parse().map_err(Error::BadRequest)?);
            }
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                file = Some((filename, data));
            }
            _ => {}
        }
    }

    let document_type =
        document_type.ok_or_else(|| Error::BadRequest("document_type is required".into()))?;
    let (filename, data) = file.ok_or_else(|| Error::BadRequest("file is required".into()))?;

    let actor = super::acting_profile(&state, &claims, &[]).await?;
    if actor.id != profile_id && !actor.role.is_staff() {
        return Err(Error::Forbidden(
            "You can only upload documents to your own profile".into(),
        ));
    }
    let target = state.profile_service.get_required(profile_id).await?;
    if target.role != UserRole::Candidate {
        return Err(Error::BadRequest(
            "Documents can only be attached to candidate profiles".into(),
        ));
    }

    let document = state
        .document_service
        .upload(profile_id, document_type, &filename, &data)
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

#[utoipa::path(
    post,
    path = "/api/documents/{id}/approve",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document approved", body = Document),
        (status = 404, description = "Document not found")
    )
)]
#[axum::debug_handler]
pub async fn approve_document(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let reviewer = super::acting_profile(&state, &claims, UserRole::REVIEWERS).await?;
    let document = state
        .document_service
        .review(id, reviewer.id, ReviewDecision::Approve)
        .await?;
    Ok(Json(document))
}

#[utoipa::path(
    post,
    path = "/api/documents/{id}/reject",
    params(("id" = Uuid, Path, description = "Document ID")),
    request_body = RejectDocumentPayload,
    responses(
        (status = 200, description = "Document rejected", body = Document),
        (status = 400, description = "Review notes too short"),
        (status = 404, description = "Document not found")
    )
)]
#[axum::debug_handler]
pub async fn reject_document(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectDocumentPayload>,
) -> Result<impl IntoResponse> {
    let decision = ReviewDecision::reject(&payload.review_notes)?;
    let reviewer = super::acting_profile(&state, &claims, UserRole::REVIEWERS).await?;
    let document = state.document_service.review(id, reviewer.id, decision).await?;
    Ok(Json(document))
}

#[utoipa::path(
    get,
    path = "/api/documents/{id}/url",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Time-limited download link", body = SignedUrl),
        (status = 403, description = "Not visible to the caller")
    )
)]
#[axum::debug_handler]
pub async fn document_url(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let actor = super::acting_profile(&state, &claims, &[]).await?;
    let document = state.document_service.get(id).await?;
    let owner = state.profile_service.get_required(document.profile_id).await?;
    if !actor.can_view(&owner) {
        return Err(Error::Forbidden("Document is not visible to you".into()));
    }
    let signed = state.document_service.signed_url(&document)?;
    Ok(Json(signed))
}
