use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Credential holder row. The `password` column always carries an argon2
/// hash and is never serialized into a response by any handler.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub role: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: NaiveDateTime,
}
