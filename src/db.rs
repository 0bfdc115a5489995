use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new().connect_with(options).await
}

/// Materializes the three tables at startup. No migrations; the schema is
/// stable and additive-only.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            role        TEXT NOT NULL,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            UNIQUE (role, email)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            emp_id        INTEGER NOT NULL UNIQUE,
            emp_name      TEXT NOT NULL,
            emp_email     TEXT NOT NULL UNIQUE,
            emp_password  TEXT NOT NULL,
            created_at    TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meetings (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            host_id       INTEGER NOT NULL,
            attendees     TEXT NOT NULL,
            start_time    TEXT NOT NULL,
            end_time      TEXT,
            agenda        TEXT NOT NULL DEFAULT '',
            meeting_link  TEXT NOT NULL DEFAULT '',
            created_at    TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Schema ready");

    Ok(())
}
