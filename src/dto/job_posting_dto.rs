use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::IntoParams;
use validator::Validate;

use crate::models::job_posting::{JobPostingStatus, JobType};
use crate::services::cost_service::JobBudget;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPostingPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(flatten)]
    pub budget: JobBudget,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct JobPostingListQuery {
    #[param(value_type = Option<String>)]
    pub status: Option<JobPostingStatus>,
    #[param(value_type = Option<String>)]
    pub job_type: Option<JobType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateJobPostingStatusPayload {
    pub status: JobPostingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignmentPayload {
    pub candidate_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondAssignmentPayload {
    pub accept: bool,
}
