use crate::models::DbBand;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_bands(pool: &Pool<Postgres>) -> Result<Vec<DbBand>> {
    let bands = sqlx::query_as::<_, DbBand>(
        r#"
        SELECT id, name, color
        FROM band
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(bands)
}

pub async fn create_band(pool: &Pool<Postgres>, name: &str, color: &str) -> Result<DbBand> {
    let id = Uuid::new_v4();

    let band = sqlx::query_as::<_, DbBand>(
        r#"
        INSERT INTO band (id, name, color)
        VALUES ($1, $2, $3)
        RETURNING id, name, color
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(color)
    .fetch_one(pool)
    .await?;

    Ok(band)
}
