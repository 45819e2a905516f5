use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::profile_dto::CreateProfilePayload,
    error::{Error, Result},
    middleware::auth::Claims,
    models::profile::UserRole,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = CreateProfilePayload,
    responses(
        (status = 201, description = "Profile created", body = Profile),
        (status = 403, description = "Role cannot be self-assigned"),
        (status = 409, description = "Profile already exists")
    )
)]
#[axum::debug_handler]
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    if !payload.role.is_self_assignable() {
        return Err(Error::Forbidden(
            "Staff profiles are created by an administrator".into(),
        ));
    }
    if payload.middleman_id.is_some() && payload.role != UserRole::Candidate {
        return Err(Error::BadRequest(
            "Only candidates can be linked to a middleman".into(),
        ));
    }

    let user_id = claims.user_id()?;
    let profile = state
        .profile_service
        .create(
            user_id,
            payload.full_name.trim(),
            payload.role,
            payload.middleman_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    get,
    path = "/api/profiles/me",
    responses(
        (status = 200, description = "Caller's profile", body = Profile),
        (status = 404, description = "No profile yet")
    )
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_required(claims.user_id()?).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/middleman/candidates",
    responses(
        (status = 200, description = "Candidates brought in by the caller", body = Vec<Profile>),
        (status = 403, description = "Caller is not a middleman")
    )
)]
#[axum::debug_handler]
pub async fn middleman_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let middleman = super::acting_profile(&state, &claims, &[UserRole::Middleman]).await?;
    let candidates = state.profile_service.list_for_middleman(middleman.id).await?;
    Ok(Json(candidates))
}
