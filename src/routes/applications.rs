use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::profile_dto::{
        ApplicationDetailResponse, ApplicationListQuery, ApplicationListResponse,
        HistoryResponse, StatusCountsResponse, TransitionPayload,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    models::profile::UserRole,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/applications",
    params(ApplicationListQuery),
    responses(
        (status = 200, description = "Candidate applications", body = ApplicationListResponse),
        (status = 403, description = "Caller is not a consultant or admin")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    super::acting_profile(&state, &claims, UserRole::REVIEWERS).await?;
    let result = state.profile_service.list_applications(query).await?;
    Ok(Json(ApplicationListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/applications/stats",
    responses((status = 200, description = "Applications per status", body = StatusCountsResponse))
)]
#[axum::debug_handler]
pub async fn application_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    super::acting_profile(&state, &claims, UserRole::REVIEWERS).await?;
    let counts = state.profile_service.status_counts().await?;
    Ok(Json(StatusCountsResponse::from(counts)))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Candidate profile ID")),
    responses(
        (status = 200, description = "Profile with its documents", body = ApplicationDetailResponse),
        (status = 403, description = "Not visible to the caller"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let actor = super::acting_profile(&state, &claims, &[]).await?;
    let profile = state.profile_service.get_required(id).await?;
    if !actor.can_view(&profile) {
        return Err(Error::Forbidden("Application is not visible to you".into()));
    }
    let documents = state.document_service.list_for_profile(id).await?;
    Ok(Json(ApplicationDetailResponse { profile, documents }))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Candidate profile ID")),
    responses(
        (status = 204, description = "Application and its documents deleted"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let admin = super::acting_profile(&state, &claims, &[UserRole::Admin]).await?;
    let file_paths = state.profile_service.delete_application(id).await?;
    for path in &file_paths {
        state.storage.remove(path).await;
    }
    tracing::info!(profile_id = %id, admin_id = %admin.id, "application removed by admin");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/transition",
    params(("id" = Uuid, Path, description = "Candidate profile ID")),
    request_body = TransitionPayload,
    responses(
        (status = 200, description = "Status changed", body = Profile),
        (status = 400, description = "Missing rejection reason"),
        (status = 409, description = "Transition not allowed from the current state")
    )
)]
#[axum::debug_handler]
pub async fn transition_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionPayload>,
) -> Result<impl IntoResponse> {
    let reviewer = super::acting_profile(&state, &claims, UserRole::REVIEWERS).await?;
    let profile = state
        .application_service
        .transition(id, reviewer.id, payload.action, payload.reason.as_deref())
        .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}/history",
    params(("id" = Uuid, Path, description = "Candidate profile ID")),
    responses((status = 200, description = "Status changes and document reviews", body = HistoryResponse))
)]
#[axum::debug_handler]
pub async fn application_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    super::acting_profile(&state, &claims, UserRole::REVIEWERS).await?;
    let items = state.audit_service.history_for_profile(id).await?;
    Ok(Json(HistoryResponse { items }))
}
