use crate::models::DbSlot;
use chrono::{DateTime, Utc};
use eyre::Result;
use jamroom_core::models::slot::{NewSlot, Slot};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

/// Slots whose start lies in `[from, to]`, optionally for one room.
pub async fn list_slots<'e, E>(
    executor: E,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    room_id: Option<Uuid>,
) -> Result<Vec<DbSlot>>
where
    E: Executor<'e, Database = Postgres>,
{
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, slot_start, slot_end, status, band_id, room_id
        FROM slot
        WHERE ($1::timestamptz IS NULL OR slot_start >= $1)
          AND ($2::timestamptz IS NULL OR slot_start <= $2)
          AND ($3::uuid IS NULL OR room_id = $3)
        ORDER BY slot_start ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .bind(room_id)
    .fetch_all(executor)
    .await?;

    Ok(slots)
}

pub async fn get_slot_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbSlot>>
where
    E: Executor<'e, Database = Postgres>,
{
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, slot_start, slot_end, status, band_id, room_id
        FROM slot
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(slot)
}

pub async fn get_slot_at<'e, E>(
    executor: E,
    room_id: Uuid,
    slot_start: DateTime<Utc>,
) -> Result<Option<DbSlot>>
where
    E: Executor<'e, Database = Postgres>,
{
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, slot_start, slot_end, status, band_id, room_id
        FROM slot
        WHERE room_id = $1 AND slot_start = $2
        LIMIT 1
        "#,
    )
    .bind(room_id)
    .bind(slot_start)
    .fetch_optional(executor)
    .await?;

    Ok(slot)
}

/// First booked slot in the room overlapping `[start, end)`.
pub async fn find_booked_overlap<'e, E>(
    executor: E,
    room_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Result<Option<DbSlot>>
where
    E: Executor<'e, Database = Postgres>,
{
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, slot_start, slot_end, status, band_id, room_id
        FROM slot
        WHERE room_id = $1
          AND status = 'booked'
          AND slot_start < $3
          AND $2 < slot_end
          AND ($4::uuid IS NULL OR id <> $4)
        ORDER BY slot_start ASC
        LIMIT 1
        "#,
    )
    .bind(room_id)
    .bind(start)
    .bind(end)
    .bind(exclude)
    .fetch_optional(executor)
    .await?;

    Ok(slot)
}

pub async fn create_slot<'e, E>(executor: E, slot: &NewSlot) -> Result<DbSlot>
where
    E: Executor<'e, Database = Postgres>,
{
    let id = Uuid::new_v4();

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        INSERT INTO slot (id, slot_start, slot_end, status, band_id, room_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, slot_start, slot_end, status, band_id, room_id
        "#,
    )
    .bind(id)
    .bind(slot.slot_start)
    .bind(slot.slot_end)
    .bind(slot.status.as_str())
    .bind(slot.band_id)
    .bind(slot.room_id)
    .fetch_one(executor)
    .await?;

    tracing::debug!("Slot created: id={}, start={}", id, slot.slot_start);
    Ok(slot)
}

pub async fn update_slot<'e, E>(executor: E, slot: &Slot) -> Result<DbSlot>
where
    E: Executor<'e, Database = Postgres>,
{
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        UPDATE slot
        SET slot_start = $2, slot_end = $3, status = $4, band_id = $5, room_id = $6
        WHERE id = $1
        RETURNING id, slot_start, slot_end, status, band_id, room_id
        "#,
    )
    .bind(slot.id)
    .bind(slot.slot_start)
    .bind(slot.slot_end)
    .bind(slot.status.as_str())
    .bind(slot.band_id)
    .bind(slot.room_id)
    .fetch_one(executor)
    .await?;

    Ok(slot)
}

pub async fn delete_slot<'e, E>(executor: E, id: Uuid) -> Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        DELETE FROM slot
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}
