use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

/// Rooms the organization books. Seeded once; later runs leave them alone.
const SEED_ROOMS: &[(i32, &str)] = &[(365, "Music Room 365"), (366, "Music Room 366")];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create slot_config table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slot_config (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            enabled BOOLEAN NOT NULL DEFAULT TRUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create room table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS room (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            number INTEGER NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create band table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS band (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            color VARCHAR(32) NOT NULL DEFAULT '#000000'
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            username VARCHAR(255) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            hashed_password VARCHAR(255) NOT NULL,
            role VARCHAR(16) NOT NULL DEFAULT 'user',
            band_id UUID NULL REFERENCES band(id),
            email VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create slot table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slot (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            slot_start TIMESTAMP WITH TIME ZONE NOT NULL,
            slot_end TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'available',
            band_id UUID NULL REFERENCES band(id),
            room_id UUID NOT NULL REFERENCES room(id),
            CONSTRAINT valid_slot_range CHECK (slot_end > slot_start)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create request table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS request (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL REFERENCES users(id),
            room_id UUID NOT NULL REFERENCES room(id),
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            slot_start TIMESTAMP WITHOUT TIME ZONE NOT NULL,
            slot_end TIMESTAMP WITHOUT TIME ZONE NOT NULL,
            request_date TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            response_date TIMESTAMP WITH TIME ZONE NULL,
            slot_id UUID NULL REFERENCES slot(id) ON DELETE SET NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes. Several statements in one string need the simple
    // query protocol, which is what executing a bare &str uses.
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_slot_config_start_time ON slot_config(start_time);
        CREATE INDEX IF NOT EXISTS idx_slot_room_id ON slot(room_id);
        CREATE INDEX IF NOT EXISTS idx_slot_slot_start ON slot(slot_start);
        CREATE INDEX IF NOT EXISTS idx_request_room_id ON request(room_id);
        CREATE INDEX IF NOT EXISTS idx_request_user_id ON request(user_id);
        CREATE INDEX IF NOT EXISTS idx_request_request_date ON request(request_date);
        CREATE INDEX IF NOT EXISTS idx_users_band_id ON users(band_id);
        "#,
    )
    .await?;

    for (number, name) in SEED_ROOMS {
        sqlx::query(
            r#"
            INSERT INTO room (number, name)
            VALUES ($1, $2)
            ON CONFLICT (number) DO NOTHING
            "#,
        )
        .bind(number)
        .bind(name)
        .execute(pool)
        .await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
