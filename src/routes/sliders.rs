use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::slider_dto::{CreateSliderPayload, DeleteSliderQuery, SliderListResponse, UpdateSliderPayload},
    error::Result,
    middleware::auth::Claims,
    models::profile::UserRole,
    AppState,
};

const ADMIN: &[UserRole] = &[UserRole::Admin];

#[utoipa::path(
    get,
    path = "/api/public/sliders",
    responses((status = 200, description = "Active sliders in display order", body = SliderListResponse))
)]
#[axum::debug_handler]
pub async fn list_public_sliders(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.slider_service.list(true).await?;
    Ok(Json(SliderListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/admin/settings/sliders",
    responses(
        (status = 200, description = "All sliders", body = SliderListResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
#[axum::debug_handler]
pub async fn list_sliders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    super::acting_profile(&state, &claims, ADMIN).await?;
    let items = state.slider_service.list(false).await?;
    Ok(Json(SliderListResponse { items }))
}

#[utoipa::path(
    post,
    path = "/api/admin/settings/sliders",
    request_body = CreateSliderPayload,
    responses(
        (status = 201, description = "Slider created", body = Slider),
        (status = 403, description = "Caller is not an admin")
    )
)]
#[axum::debug_handler]
pub async fn create_slider(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateSliderPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let admin = super::acting_profile(&state, &claims, ADMIN).await?;
    let slider = state.slider_service.create(payload).await?;
    tracing::info!(slider_id = %slider.id, admin_id = %admin.id, "slider created");
    Ok((StatusCode::CREATED, Json(slider)))
}

#[utoipa::path(
    put,
    path = "/api/admin/settings/sliders",
    request_body = UpdateSliderPayload,
    responses(
        (status = 200, description = "Slider updated", body = Slider),
        (status = 404, description = "Slider not found")
    )
)]
#[axum::debug_handler]
pub async fn update_slider(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateSliderPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    super::acting_profile(&state, &claims, ADMIN).await?;
    let slider = state.slider_service.update(payload).await?;
    Ok(Json(slider))
}

#[utoipa::path(
    delete,
    path = "/api/admin/settings/sliders",
    params(DeleteSliderQuery),
    responses(
        (status = 204, description = "Slider deleted"),
        (status = 404, description = "Slider not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_slider(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<DeleteSliderQuery>,
) -> Result<impl IntoResponse> {
    let admin = super::acting_profile(&state, &claims, ADMIN).await?;
    state.slider_service.delete(query.id).await?;
    tracing::info!(slider_id = %query.id, admin_id = %admin.id, "slider deleted");
    Ok(StatusCode::NO_CONTENT)
}
