use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_posting_dto::{
        CreateAssignmentPayload, CreateJobPostingPayload, JobPostingListQuery,
        UpdateJobPostingStatusPayload,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    models::{
        job_posting::JobPosting,
        profile::{Profile, UserRole},
    },
    services::cost_service::{CostService, JobBudget},
    AppState,
};

/// Staff see every posting, customers only their own, candidates those they are assigned to.
async fn ensure_posting_visible(state: &AppState, actor: &Profile, posting: &JobPosting) -> Result<()> {
    let visible = match actor.role {
        UserRole::Admin | UserRole::Consultant => true,
        UserRole::Customer => posting.customer_id == actor.id,
        UserRole::Candidate => state
            .assignment_service
            .list_for_candidate(actor.id)
            .await?
            .iter()
            .any(|a| a.job_posting_id == posting.id),
        UserRole::Middleman => false,
    };
    if visible {
        Ok(())
    } else {
        Err(Error::Forbidden("Job posting is not visible to you".into()))
    }
}

/// Prices a job without saving it.
#[utoipa::path(
    post,
    path = "/api/job-postings/quote",
    request_body = JobBudget,
    responses(
        (status = 200, description = "Cost breakdown", body = CostBreakdown),
        (status = 400, description = "Budget inputs incomplete or invalid")
    )
)]
#[axum::debug_handler]
pub async fn quote_job_posting(Json(budget): Json<JobBudget>) -> Result<impl IntoResponse> {
    let breakdown = CostService::quote(&budget)?;
    Ok(Json(breakdown))
}

#[utoipa::path(
    post,
    path = "/api/job-postings",
    request_body = CreateJobPostingPayload,
    responses(
        (status = 201, description = "Job posting created", body = JobPosting),
        (status = 400, description = "Invalid budget"),
        (status = 403, description = "Caller is not a customer")
    )
)]
#[axum::debug_handler]
pub async fn create_job_posting(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateJobPostingPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let customer = super::acting_profile(&state, &claims, &[UserRole::Customer]).await?;
    let posting = state.job_posting_service.create(customer.id, payload).await?;
    Ok((StatusCode::CREATED, Json(posting)))
}

#[utoipa::path(
    get,
    path = "/api/job-postings",
    params(JobPostingListQuery),
    responses(
        (status = 200, description = "Job postings", body = Vec<JobPosting>),
        (status = 403, description = "Caller is neither staff nor a customer")
    )
)]
#[axum::debug_handler]
pub async fn list_job_postings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<JobPostingListQuery>,
) -> Result<impl IntoResponse> {
    let actor = super::acting_profile(&state, &claims, &[]).await?;
    let customer_filter = match actor.role {
        UserRole::Admin | UserRole::Consultant => None,
        UserRole::Customer => Some(actor.id),
        _ => return Err(Error::Forbidden("Job postings are not available to you".into())),
    };
    let postings = state.job_posting_service.list(customer_filter, query).await?;
    Ok(Json(postings))
}

#[utoipa::path(
    get,
    path = "/api/job-postings/{id}",
    params(("id" = Uuid, Path, description = "Job posting ID")),
    responses(
        (status = 200, description = "Job posting", body = JobPosting),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job_posting(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let actor = super::acting_profile(&state, &claims, &[]).await?;
    let posting = state.job_posting_service.get(id).await?;
    ensure_posting_visible(&state, &actor, &posting).await?;
    Ok(Json(posting))
}

#[utoipa::path(
    post,
    path = "/api/job-postings/{id}/status",
    params(("id" = Uuid, Path, description = "Job posting ID")),
    request_body = UpdateJobPostingStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = JobPosting),
        (status = 403, description = "Caller is not an admin")
    )
)]
#[axum::debug_handler]
pub async fn update_job_posting_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPostingStatusPayload>,
) -> Result<impl IntoResponse> {
    super::acting_profile(&state, &claims, &[UserRole::Admin]).await?;
    let posting = state
        .job_posting_service
        .update_status(id, payload.status)
        .await?;
    Ok(Json(posting))
}

#[utoipa::path(
    get,
    path = "/api/job-postings/{id}/assignments",
    params(("id" = Uuid, Path, description = "Job posting ID")),
    responses((status = 200, description = "Candidates assigned to the posting", body = Vec<JobAssignment>))
)]
#[axum::debug_handler]
pub async fn list_assignments(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let actor = super::acting_profile(&state, &claims, &[]).await?;
    let posting = state.job_posting_service.get(id).await?;
    if !actor.role.is_staff() && posting.customer_id != actor.id {
        return Err(Error::Forbidden("Assignments are not visible to you".into()));
    }
    let assignments = state.assignment_service.list_for_posting(id).await?;
    Ok(Json(assignments))
}

#[utoipa::path(
    post,
    path = "/api/job-postings/{id}/assignments",
    params(("id" = Uuid, Path, description = "Job posting ID")),
    request_body = CreateAssignmentPayload,
    responses(
        (status = 201, description = "Candidate assigned", body = JobAssignment),
        (status = 409, description = "Already assigned, posting closed or candidate not approved")
    )
)]
#[axum::debug_handler]
pub async fn create_assignment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateAssignmentPayload>,
) -> Result<impl IntoResponse> {
    let reviewer = super::acting_profile(&state, &claims, UserRole::REVIEWERS).await?;
    let assignment = state
        .assignment_service
        .assign(id, payload.candidate_id, reviewer.id)
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}
