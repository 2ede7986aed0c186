use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(50) NOT NULL,
            phone_number VARCHAR(15) NOT NULL,
            email VARCHAR(255) NOT NULL,
            date TIMESTAMP WITH TIME ZONE NOT NULL,
            time VARCHAR(5) NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'pending',
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // At most one non-cancelled appointment may exist per (date, time); this
    // index is what makes insert_if_free atomic under concurrency.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS appointments_active_slot_idx
        ON appointments (date, time)
        WHERE status <> 'cancelled';
        "#,
    )
    .execute(pool)
    .await?;

    // Secondary indexes for the admin listing filters
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS appointments_status_idx ON appointments (status);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS appointments_email_idx ON appointments (email);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized");
    Ok(())
}
