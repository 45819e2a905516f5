use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Candidate,
    Consultant,
    Admin,
    Middleman,
    Customer,
}

impl UserRole {
    /// Roles allowed to review documents and move applications.
    pub const REVIEWERS: &'static [UserRole] = &[UserRole::Consultant, UserRole::Admin];

    pub const fn is_staff(self) -> bool {
        matches!(self, UserRole::Consultant | UserRole::Admin)
    }

    /// Roles a user may pick for themselves when creating a profile after signup.
    pub const fn is_self_assignable(self) -> bool {
        matches!(
            self,
            UserRole::Candidate | UserRole::Middleman | UserRole::Customer
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    NewApplication,
    Evaluation,
    Approved,
    Rejected,
    UpdateRequired,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::NewApplication => "NEW_APPLICATION",
            ApplicationStatus::Evaluation => "EVALUATION",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::UpdateRequired => "UPDATE_REQUIRED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub role: UserRole,
    pub application_status: Option<ApplicationStatus>,
    pub rejection_reason: Option<String>,
    pub middleman_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Whether `self` may read `target`'s profile and documents.
    pub fn can_view(&self, target: &Profile) -> bool {
        if self.role.is_staff() || self.id == target.id {
            return true;
        }
        self.role == UserRole::Middleman && target.middleman_id == Some(self.id)
    }

    pub fn has_role(&self, allowed: &[UserRole]) -> bool {
        allowed.contains(&self.role)
    }
}
