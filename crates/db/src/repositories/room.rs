use crate::models::DbRoom;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_rooms(pool: &Pool<Postgres>) -> Result<Vec<DbRoom>> {
    let rooms = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT id, number, name
        FROM room
        ORDER BY number ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rooms)
}

pub async fn get_room_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbRoom>> {
    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT id, number, name
        FROM room
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(room)
}

pub async fn get_room_by_number(pool: &Pool<Postgres>, number: i32) -> Result<Option<DbRoom>> {
    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT id, number, name
        FROM room
        WHERE number = $1
        "#,
    )
    .bind(number)
    .fetch_optional(pool)
    .await?;

    Ok(room)
}
