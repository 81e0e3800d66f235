//! Tag domain methods on Repository

use super::Repository;
use crate::{error::AppResult, models::TagId};

impl Repository {
    /// Return the id of the tag named exactly `name`, creating it if needed
    pub async fn tags_get_or_create(&self, name: &str) -> AppResult<TagId> {
        if let Some(id) = sqlx::query_scalar::<_, i64>("SELECT id FROM product_tags WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(id);
        }

        // A concurrent request may have created it in between; the no-op
        // update makes RETURNING yield the existing row.
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO product_tags (name) VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Created tag '{}' (id={})", name, id);
        Ok(id)
    }
}
