use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::slider_dto::{CreateSliderPayload, UpdateSliderPayload};
use crate::error::{Error, Result};
use crate::models::slider::Slider;

const SLIDER_COLUMNS: &str =
    "id, title, subtitle, image_url, link_url, display_order, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct SliderService {
    pool: PgPool,
}

impl SliderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, only_active: bool) -> Result<Vec<Slider>> {
        let sql = format!(
            "SELECT {} FROM sliders {} ORDER BY display_order ASC, created_at ASC",
            SLIDER_COLUMNS,
            if only_active { "WHERE is_active" } else { "" }
        );
        let sliders = sqlx::query_as::<_, Slider>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(sliders)
    }

    pub async fn create(&self, payload: CreateSliderPayload) -> Result<Slider> {
        let slider = sqlx::query_as::<_, Slider>(&format!(
            r#"
            INSERT INTO sliders (title, subtitle, image_url, link_url, display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SLIDER_COLUMNS
        ))
        .bind(&payload.title)
        .bind(&payload.subtitle)
        .bind(&payload.image_url)
        .bind(&payload.link_url)
        .bind(payload.display_order.unwrap_or(0))
        .bind(payload.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(slider)
    }

    pub async fn update(&self, payload: UpdateSliderPayload) -> Result<Slider> {
        let slider = sqlx::query_as::<_, Slider>(&format!(
            r#"
            UPDATE sliders
            SET
                title = COALESCE($2, title),
                subtitle = COALESCE($3, subtitle),
                image_url = COALESCE($4, image_url),
                link_url = COALESCE($5, link_url),
                display_order = COALESCE($6, display_order),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SLIDER_COLUMNS
        ))
        .bind(payload.id)
        .bind(&payload.title)
        .bind(&payload.subtitle)
        .bind(&payload.image_url)
        .bind(&payload.link_url)
        .bind(payload.display_order)
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Slider not found".into()))?;
        Ok(slider)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM sliders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Slider not found".into()));
        }
        Ok(())
    }
}
