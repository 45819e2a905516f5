use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::job_assignment::{AssignmentStatus, JobAssignment};
use crate::models::job_posting::JobPostingStatus;
use crate::models::profile::{ApplicationStatus, UserRole};

const ASSIGNMENT_COLUMNS: &str =
    "id, job_posting_id, candidate_id, status, assigned_by, responded_at, created_at";

#[derive(Clone)]
pub struct AssignmentService {
    pool: PgPool,
}

impl AssignmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Offers an open posting to an approved candidate.
    pub async fn assign(
        &self,
        job_posting_id: Uuid,
        candidate_id: Uuid,
        assigned_by: Uuid,
    ) -> Result<JobAssignment> {
        let mut tx = self.pool.begin().await?;

        let posting_status: Option<JobPostingStatus> =
            sqlx::query_scalar("SELECT status FROM job_postings WHERE id = $1 FOR SHARE")
                .bind(job_posting_id)
                .fetch_optional(&mut *tx)
                .await?;
        let posting_status =
            posting_status.ok_or_else(|| Error::NotFound("Job posting not found".into()))?;
        if !posting_status.accepts_assignments() {
            return Err(Error::Conflict(format!(
                "Job posting is {} and does not accept assignments",
                posting_status.label()
            )));
        }

        let candidate: Option<(UserRole, Option<ApplicationStatus>)> = sqlx::query_as(
            "SELECT role, application_status FROM profiles WHERE id = $1 FOR SHARE",
        )
        .bind(candidate_id)
        .fetch_optional(&mut *tx)
        .await?;
        match candidate {
            None => return Err(Error::NotFound("Candidate not found".into())),
            Some((UserRole::Candidate, Some(ApplicationStatus::Approved))) => {}
            Some((UserRole::Candidate, _)) => {
                return Err(Error::Conflict("Candidate application is not approved".into()))
            }
            Some(_) => return Err(Error::BadRequest("Profile is not a candidate".into())),
        }

        let assignment = sqlx::query_as::<_, JobAssignment>(&format!(
            r#"
            INSERT INTO job_assignments (job_posting_id, candidate_id, assigned_by)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            ASSIGNMENT_COLUMNS
        ))
        .bind(job_posting_id)
        .bind(candidate_id)
        .bind(assigned_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match Error::from(e) {
            Error::Conflict(_) => Error::Conflict("Candidate is already assigned to this posting".into()),
            other => other,
        })?;

        tx.commit().await?;

        tracing::info!(
            assignment_id = %assignment.id,
            job_posting_id = %job_posting_id,
            candidate_id = %candidate_id,
            "candidate assigned"
        );
        Ok(assignment)
    }

    /// Records the candidate's answer to a pending assignment.
    pub async fn respond(
        &self,
        assignment_id: Uuid,
        candidate_id: Uuid,
        accept: bool,
    ) -> Result<JobAssignment> {
        let status = if accept {
            AssignmentStatus::Accepted
        } else {
            AssignmentStatus::Declined
        };

        let updated = sqlx::query_as::<_, JobAssignment>(&format!(
            r#"
            UPDATE job_assignments
            SET status = $3, responded_at = NOW()
            WHERE id = $1 AND candidate_id = $2 AND status = 'PENDING'
            RETURNING {}
            "#,
            ASSIGNMENT_COLUMNS
        ))
        .bind(assignment_id)
        .bind(candidate_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(assignment) = updated {
            tracing::info!(assignment_id = %assignment_id, status = ?status, "assignment answered");
            return Ok(assignment);
        }

        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT candidate_id FROM job_assignments WHERE id = $1")
                .bind(assignment_id)
                .fetch_optional(&self.pool)
                .await?;
        match owner {
            Some(owner) if owner == candidate_id => {
                Err(Error::Conflict("Assignment has already been answered".into()))
            }
            _ => Err(Error::NotFound("Assignment not found".into())),
        }
    }

    pub async fn list_for_posting(&self, job_posting_id: Uuid) -> Result<Vec<JobAssignment>> {
        let rows = sqlx::query_as::<_, JobAssignment>(&format!(
            "SELECT {} FROM job_assignments WHERE job_posting_id = $1 ORDER BY created_at DESC",
            ASSIGNMENT_COLUMNS
        ))
        .bind(job_posting_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<JobAssignment>> {
        let rows = sqlx::query_as::<_, JobAssignment>(&format!(
            "SELECT {} FROM job_assignments WHERE candidate_id = $1 ORDER BY created_at DESC",
            ASSIGNMENT_COLUMNS
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
