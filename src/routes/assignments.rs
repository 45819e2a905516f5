use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::job_posting_dto::RespondAssignmentPayload,
    error::Result,
    middleware::auth::Claims,
    models::profile::UserRole,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/assignments/me",
    responses(
        (status = 200, description = "Assignments offered to the caller", body = Vec<JobAssignment>),
        (status = 403, description = "Caller is not a candidate")
    )
)]
#[axum::debug_handler]
pub async fn my_assignments(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let candidate = super::acting_profile(&state, &claims, &[UserRole::Candidate]).await?;
    let assignments = state.assignment_service.list_for_candidate(candidate.id).await?;
    Ok(Json(assignments))
}

#[utoipa::path(
    post,
    path = "/api/assignments/{id}/respond",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    request_body = RespondAssignmentPayload,
    responses(
        (status = 200, description = "Assignment accepted or declined", body = JobAssignment),
        (status = 404, description = "No such assignment for the caller"),
        (status = 409, description = "Already answered")
    )
)]
#[axum::debug_handler]
pub async fn respond_assignment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondAssignmentPayload>,
) -> Result<impl IntoResponse> {
    let candidate = super::acting_profile(&state, &claims, &[UserRole::Candidate]).await?;
    let assignment = state
        .assignment_service
        .respond(id, candidate.id, payload.accept)
        .await?;
    Ok(Json(assignment))
}
