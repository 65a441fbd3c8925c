use anyhow::Context;
use sqlx::PgPool;
use tracing::info;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        email VARCHAR(255) UNIQUE NOT NULL,
        username VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        bio TEXT,
        display_name VARCHAR(255),
        created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_SHAPES: &str = r#"
    CREATE TABLE IF NOT EXISTS shapes (
        id SERIAL PRIMARY KEY,
        owner_id INTEGER REFERENCES users(id) ON DELETE CASCADE,
        x INTEGER NOT NULL DEFAULT 0,
        y INTEGER NOT NULL DEFAULT 0,
        color VARCHAR(50) DEFAULT 'bg-blue-500',
        size INTEGER DEFAULT 48,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Creates the schema if missing. Runs in a single transaction so a failure
/// never leaves a partially created schema behind.
pub async fn init_schema(db: &PgPool) -> anyhow::Result<()> {
    let mut tx = db.begin().await.context("begin schema transaction")?;
    sqlx::query(CREATE_USERS)
        .execute(&mut *tx)
        .await
        .context("create users table")?;
    sqlx::query(CREATE_SHAPES)
        .execute(&mut *tx)
        .await
        .context("create shapes table")?;
    tx.commit().await.context("commit schema transaction")?;
    info!("database tables initialized");
    Ok(())
}
