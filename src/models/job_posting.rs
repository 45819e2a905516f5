use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Seasonal,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Seasonal => "SEASONAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_posting_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobPostingStatus {
    Active,
    Current,
    Past,
    Rejected,
}

impl JobPostingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobPostingStatus::Active => "ACTIVE",
            JobPostingStatus::Current => "CURRENT",
            JobPostingStatus::Past => "PAST",
            JobPostingStatus::Rejected => "REJECTED",
        }
    }

    pub const fn accepts_assignments(self) -> bool {
        matches!(self, JobPostingStatus::Active | JobPostingStatus::Current)
    }
}

/// One working day, `"HH:MM"` local times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub start: String,
    pub end: String,
}

/// Per-day shifts keyed by ISO date.
pub type WorkSchedule = BTreeMap<NaiveDate, ShiftWindow>;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub job_type: JobType,
    pub required_count: i32,
    pub monthly_budget: Option<Decimal>,
    pub hourly_budget: Option<Decimal>,
    pub season_months: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub working_hours: Option<Json<WorkSchedule>>,
    pub base_cost: Decimal,
    pub service_fee: Decimal,
    pub vat: Decimal,
    pub total_cost: Decimal,
    pub status: JobPostingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
