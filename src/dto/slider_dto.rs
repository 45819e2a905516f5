use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::IntoParams;
use validator::Validate;

use crate::models::slider::Slider;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSliderPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub subtitle: Option<String>,
    #[validate(length(min = 1))]
    pub image_url: String,
    pub link_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSliderPayload {
    pub id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[validate(length(min = 1))]
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteSliderQuery {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderListResponse {
    pub items: Vec<Slider>,
}
