use crate::models::DbUser;
use eyre::Result;
use jamroom_core::models::user::NewUser;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub async fn list_users<'e, E>(executor: E) -> Result<Vec<DbUser>>
where
    E: Executor<'e, Database = Postgres>,
{
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, name, hashed_password, role, band_id, email
        FROM users
        ORDER BY username ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(users)
}

pub async fn get_user_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbUser>>
where
    E: Executor<'e, Database = Postgres>,
{
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, name, hashed_password, role, band_id, email
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn get_user_by_username<'e, E>(executor: E, username: &str) -> Result<Option<DbUser>>
where
    E: Executor<'e, Database = Postgres>,
{
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, name, hashed_password, role, band_id, email
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn create_user<'e, E>(executor: E, user: &NewUser) -> Result<DbUser>
where
    E: Executor<'e, Database = Postgres>,
{
    let id = Uuid::new_v4();

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, username, name, hashed_password, role, band_id, email)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, username, name, hashed_password, role, band_id, email
        "#,
    )
    .bind(id)
    .bind(&user.username)
    .bind(&user.name)
    .bind(&user.hashed_password)
    .bind(user.role.as_str())
    .bind(user.band_id)
    .bind(&user.email)
    .fetch_one(executor)
    .await?;

    tracing::debug!("User created: id={}, username={}", id, user.username);
    Ok(user)
}
