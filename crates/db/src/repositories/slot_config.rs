use crate::models::DbSlotConfig;
use chrono::NaiveTime;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_slot_configs(pool: &Pool<Postgres>) -> Result<Vec<DbSlotConfig>> {
    let configs = sqlx::query_as::<_, DbSlotConfig>(
        r#"
        SELECT id, start_time, end_time, enabled
        FROM slot_config
        ORDER BY start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(configs)
}

pub async fn create_slot_config(
    pool: &Pool<Postgres>,
    start_time: NaiveTime,
    end_time: NaiveTime,
    enabled: bool,
) -> Result<DbSlotConfig> {
    let id = Uuid::new_v4();

    let config = sqlx::query_as::<_, DbSlotConfig>(
        r#"
        INSERT INTO slot_config (id, start_time, end_time, enabled)
        VALUES ($1, $2, $3, $4)
        RETURNING id, start_time, end_time, enabled
        "#,
    )
    .bind(id)
    .bind(start_time)
    .bind(end_time)
    .bind(enabled)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Slot config created: id={}, start={}", id, start_time);
    Ok(config)
}

/// Fields left as `None` keep their stored value.
pub async fn update_slot_config(
    pool: &Pool<Postgres>,
    id: Uuid,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    enabled: Option<bool>,
) -> Result<Option<DbSlotConfig>> {
    let config = sqlx::query_as::<_, DbSlotConfig>(
        r#"
        UPDATE slot_config
        SET start_time = COALESCE($2, start_time),
            end_time = COALESCE($3, end_time),
            enabled = COALESCE($4, enabled)
        WHERE id = $1
        RETURNING id, start_time, end_time, enabled
        "#,
    )
    .bind(id)
    .bind(start_time)
    .bind(end_time)
    .bind(enabled)
    .fetch_optional(pool)
    .await?;

    Ok(config)
}

pub async fn delete_slot_config(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM slot_config
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
