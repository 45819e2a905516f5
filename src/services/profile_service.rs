use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::profile_dto::ApplicationListQuery;
use crate::error::{Error, Result};
use crate::models::profile::{ApplicationStatus, Profile, UserRole};

const PROFILE_COLUMNS: &str = "id, full_name, role, application_status, rejection_reason, middleman_id, created_at, updated_at";

#[derive(Clone)]
pub struct ProfileService {
    pool: PgPool,
}

pub struct ApplicationList {
    pub items: Vec<Profile>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the profile for a freshly signed-up user. Candidates start as new applications.
    pub async fn create(
        &self,
        id: Uuid,
        full_name: &str,
        role: UserRole,
        middleman_id: Option<Uuid>,
    ) -> Result<Profile> {
        let application_status =
            (role == UserRole::Candidate).then_some(ApplicationStatus::NewApplication);

        if let Some(middleman_id) = middleman_id {
            let owner = self.get(middleman_id).await?;
            if owner.map(|p| p.role) != Some(UserRole::Middleman) {
                return Err(Error::BadRequest("middleman_id does not reference a middleman".into()));
            }
        }

        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (id, full_name, role, application_status, middleman_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(id)
        .bind(full_name)
        .bind(role)
        .bind(application_status)
        .bind(middleman_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(profile_id = %profile.id, role = ?profile.role, "profile created");
        Ok(profile)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn get_required(&self, id: Uuid) -> Result<Profile> {
        self.get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Profile not found".into()))
    }

    /// Loads the caller's profile and checks its role against `allowed`.
    pub async fn require_role(&self, user_id: Uuid, allowed: &[UserRole]) -> Result<Profile> {
        let profile = self
            .get(user_id)
            .await?
            .ok_or_else(|| Error::Forbidden("No profile for this account".into()))?;
        if !allowed.is_empty() && !profile.has_role(allowed) {
            return Err(Error::Forbidden("Insufficient role".into()));
        }
        Ok(profile)
    }

    pub async fn list_applications(&self, query: ApplicationListQuery) -> Result<ApplicationList> {
        let (page, per_page, offset) = page_window(query.page, query.per_page)?;

        let mut filters = vec!["role = 'CANDIDATE'".to_string()];
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            filters.push(format!(
                "application_status = ${}::application_status",
                args.len() + 1
            ));
            args.push(status.label().to_string());
        }
        if let Some(search) = query.search {
            filters.push(format!("full_name ILIKE ${} ESCAPE '\\'", args.len() + 1));
            args.push(contains_pattern(&search));
        }

        let where_clause = format!("WHERE {}", filters.join(" AND "));

        let items_query = format!(
            "SELECT {} FROM profiles {} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            PROFILE_COLUMNS,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM profiles {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Profile>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(per_page).bind(offset);

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }

        let items = items_statement.fetch_all(&self.pool).await?;
        let total = total_statement.fetch_one(&self.pool).await?;
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(ApplicationList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub async fn list_for_middleman(&self, middleman_id: Uuid) -> Result<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE middleman_id = $1 ORDER BY created_at DESC",
            PROFILE_COLUMNS
        ))
        .bind(middleman_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    pub async fn status_counts(&self) -> Result<HashMap<ApplicationStatus, i64>> {
        let rows: Vec<(ApplicationStatus, i64)> = sqlx::query_as(
            r#"
            SELECT application_status, COUNT(*)
            FROM profiles
            WHERE application_status IS NOT NULL
            GROUP BY application_status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Removes a candidate's application, returning the stored file paths of its documents.
    pub async fn delete_application(&self, id: Uuid) -> Result<Vec<String>> {
        let mut tx = self.pool.begin().await?;

        let role: Option<UserRole> =
            sqlx::query_scalar("SELECT role FROM profiles WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        match role {
            None => return Err(Error::NotFound("Application not found".into())),
            Some(UserRole::Candidate) => {}
            Some(_) => {
                return Err(Error::BadRequest("Only candidate applications can be deleted".into()))
            }
        }

        let file_paths: Vec<String> =
            sqlx::query_scalar("DELETE FROM documents WHERE profile_id = $1 RETURNING file_path")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;
        sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(profile_id = %id, documents = file_paths.len(), "application deleted");
        Ok(file_paths)
    }
}

/// Resolves `(page, per_page, offset)`; pages start at 1 and hold at most 100 rows.
fn page_window(page: Option<i64>, per_page: Option<i64>) -> Result<(i64, i64, i64)> {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1)
        .checked_mul(per_page)
        .ok_or_else(|| Error::BadRequest("page is out of range".into()))?;
    Ok((page, per_page, offset))
}

/// `ILIKE` pattern matching `term` anywhere, with the term's own wildcards taken literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
