use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Full employee row, including the password hash. Handlers expose only the
/// non-secret fields via `api::employee::EmployeeResponse`.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,

    /// Externally supplied identifier, unique alongside the surrogate key.
    pub emp_id: i64,

    pub emp_name: String,
    pub emp_email: String,
    pub emp_password: String,
    pub created_at: NaiveDateTime,
}
