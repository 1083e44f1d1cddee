use crate::models::DbRequest;
use eyre::Result;
use jamroom_core::models::request::{NewSlotRequest, RequestStatus, SlotRequest};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub async fn list_requests<'e, E>(executor: E, room_id: Option<Uuid>) -> Result<Vec<DbRequest>>
where
    E: Executor<'e, Database = Postgres>,
{
    let requests = sqlx::query_as::<_, DbRequest>(
        r#"
        SELECT id, user_id, room_id, status, slot_start, slot_end,
               request_date, response_date, slot_id
        FROM request
        WHERE ($1::uuid IS NULL OR room_id = $1)
        ORDER BY request_date ASC
        "#,
    )
    .bind(room_id)
    .fetch_all(executor)
    .await?;

    Ok(requests)
}

pub async fn get_request_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbRequest>>
where
    E: Executor<'e, Database = Postgres>,
{
    let request = sqlx::query_as::<_, DbRequest>(
        r#"
        SELECT id, user_id, room_id, status, slot_start, slot_end,
               request_date, response_date, slot_id
        FROM request
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(request)
}

pub async fn create_request<'e, E>(executor: E, request: &NewSlotRequest) -> Result<DbRequest>
where
    E: Executor<'e, Database = Postgres>,
{
    let id = Uuid::new_v4();

    let request = sqlx::query_as::<_, DbRequest>(
        r#"
        INSERT INTO request (id, user_id, room_id, status, slot_start, slot_end, request_date)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING id, user_id, room_id, status, slot_start, slot_end,
                  request_date, response_date, slot_id
        "#,
    )
    .bind(id)
    .bind(request.user_id)
    .bind(request.room_id)
    .bind(RequestStatus::Pending.as_str())
    .bind(request.slot_start)
    .bind(request.slot_end)
    .fetch_one(executor)
    .await?;

    tracing::debug!("Request created: id={}", id);
    Ok(request)
}

pub async fn update_request<'e, E>(executor: E, request: &SlotRequest) -> Result<DbRequest>
where
    E: Executor<'e, Database = Postgres>,
{
    let request = sqlx::query_as::<_, DbRequest>(
        r#"
        UPDATE request
        SET user_id = $2, room_id = $3, status = $4, slot_start = $5, slot_end = $6,
            response_date = $7, slot_id = $8
        WHERE id = $1
        RETURNING id, user_id, room_id, status, slot_start, slot_end,
                  request_date, response_date, slot_id
        "#,
    )
    .bind(request.id)
    .bind(request.user_id)
    .bind(request.room_id)
    .bind(request.status.as_str())
    .bind(request.slot_start)
    .bind(request.slot_end)
    .bind(request.response_date)
    .bind(request.slot_id)
    .fetch_one(executor)
    .await?;

    Ok(request)
}

pub async fn delete_request<'e, E>(executor: E, id: Uuid) -> Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        DELETE FROM request
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}
