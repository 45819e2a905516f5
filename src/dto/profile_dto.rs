use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::IntoParams;
use validator::Validate;

use crate::models::audit_log::AuditLog;
use crate::models::document::Document;
use crate::models::profile::{ApplicationStatus, Profile, UserRole};
use crate::services::profile_service::ApplicationList;
use crate::services::transition_rules::StatusAction;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfilePayload {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    pub role: UserRole,
    pub middleman_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    #[param(value_type = Option<String>)]
    pub status: Option<ApplicationStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub items: Vec<Profile>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<ApplicationList> for ApplicationListResponse {
    fn from(value: ApplicationList) -> Self {
        Self {
            items: value.items,
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDetailResponse {
    pub profile: Profile,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionPayload {
    pub action: StatusAction,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCountsResponse {
    pub counts: HashMap<ApplicationStatus, i64>,
    pub total: i64,
}

impl From<HashMap<ApplicationStatus, i64>> for StatusCountsResponse {
    fn from(counts: HashMap<ApplicationStatus, i64>) -> Self {
        let total = counts.values().sum();
        Self { counts, total }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub items: Vec<AuditLog>,
}
