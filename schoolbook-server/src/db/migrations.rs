//! Database migrations for the schools table

use sqlx::PgPool;

/// Create the `schools` table if it does not exist.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schools migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schools (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            contact TEXT NOT NULL,
            image TEXT NOT NULL,
            email_id TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schools migrations complete");
    Ok(())
}
