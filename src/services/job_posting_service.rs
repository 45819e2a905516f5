use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_posting_dto::{CreateJobPostingPayload, JobPostingListQuery};
use crate::error::{Error, Result};
use crate::models::job_posting::{JobPosting, JobPostingStatus};
use crate::services::cost_service::CostService;

const JOB_POSTING_COLUMNS: &str = "id, customer_id, title, description, location, job_type, required_count, monthly_budget, hourly_budget, season_months, start_date, end_date, working_hours, base_cost, service_fee, vat, total_cost, status, created_at, updated_at";

#[derive(Clone)]
pub struct JobPostingService {
    pool: PgPool,
}

impl JobPostingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Prices the posting from its budget inputs and stores both.
    pub async fn create(
        &self,
        customer_id: Uuid,
        payload: CreateJobPostingPayload,
    ) -> Result<JobPosting> {
        let cost = CostService::quote(&payload.budget)?;
        let budget = payload.budget;

        let posting = sqlx::query_as::<_, JobPosting>(&format!(
            r#"
            INSERT INTO job_postings (
                customer_id, title, description, location, job_type, required_count,
                monthly_budget, hourly_budget, season_months, start_date, end_date, working_hours,
                base_cost, service_fee, vat, total_cost
            ) VALUES (
                $1,$2,$3,$4,$5,$6,
                $7,$8,$9,$10,$11,$12,
                $13,$14,$15,$16
            )
            RETURNING {}
            "#,
            JOB_POSTING_COLUMNS
        ))
        .bind(customer_id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.location)
        .bind(budget.job_type)
        .bind(budget.required_count)
        .bind(budget.monthly_budget)
        .bind(budget.hourly_budget)
        .bind(budget.season_months)
        .bind(budget.start_date)
        .bind(budget.end_date)
        .bind(budget.working_hours.map(Json))
        .bind(cost.base)
        .bind(cost.service_fee)
        .bind(cost.vat)
        .bind(cost.total)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            job_posting_id = %posting.id,
            customer_id = %customer_id,
            total_cost = %posting.total_cost,
            "job posting created"
        );
        Ok(posting)
    }

    pub async fn get(&self, id: Uuid) -> Result<JobPosting> {
        let posting = sqlx::query_as::<_, JobPosting>(&format!(
            "SELECT {} FROM job_postings WHERE id = $1",
            JOB_POSTING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job posting not found".into()))?;
        Ok(posting)
    }

    /// Lists postings, restricted to one customer when `customer_id` is set.
    pub async fn list(
        &self,
        customer_id: Option<Uuid>,
        query: JobPostingListQuery,
    ) -> Result<Vec<JobPosting>> {
        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(customer_id) = customer_id {
            filters.push(format!("customer_id = ${}::uuid", args.len() + 1));
            args.push(customer_id.to_string());
        }
        if let Some(status) = query.status {
            filters.push(format!("status = ${}::job_posting_status", args.len() + 1));
            args.push(status.label().to_string());
        }
        if let Some(job_type) = query.job_type {
            filters.push(format!("job_type = ${}::job_type", args.len() + 1));
            args.push(job_type.label().to_string());
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM job_postings {} ORDER BY created_at DESC",
            JOB_POSTING_COLUMNS, where_clause
        );
        let mut statement = sqlx::query_as::<_, JobPosting>(&sql);
        for value in &args {
            statement = statement.bind(value);
        }
        Ok(statement.fetch_all(&self.pool).await?)
    }

    pub async fn update_status(&self, id: Uuid, status: JobPostingStatus) -> Result<JobPosting> {
        let posting = sqlx::query_as::<_, JobPosting>(&format!(
            r#"
            UPDATE job_postings
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_POSTING_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job posting not found".into()))?;

        tracing::info!(job_posting_id = %id, status = status.label(), "job posting status changed");
        Ok(posting)
    }
}
