use crate::{
    api::required_text,
    auth::password::hash_password,
    errors::ApiError,
    model::employee::Employee,
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

/// Non-secret projection of an employee row; the password hash never leaves
/// the persistence layer.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeResponse {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 3000)]
    pub emp_id: i64,

    #[schema(example = "John Doe")]
    pub emp_name: String,

    #[schema(example = "john.doe@company.com")]
    pub emp_email: String,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employee/create-employee",
    request_body = Object,
    responses(
        (status = 201, description = "Employee created successfully", body = Object, example = json!({
            "message": "Employee created successfully",
            "employee": { "id": 1, "emp_id": 3000, "emp_name": "John Doe", "emp_email": "john.doe@company.com" }
        })),
        (status = 400, description = "Missing fields or duplicate email"),
        (status = 500, description = "Database error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let data = body.into_inner();

    let emp_id = data.get("emp_id").and_then(Value::as_i64);
    let emp_name = required_text(data.get("emp_name"));
    let emp_email = required_text(data.get("emp_email"));
    let emp_password = required_text(data.get("emp_password"));

    let (Some(emp_id), Some(emp_name), Some(emp_email), Some(emp_password)) =
        (emp_id, emp_name, emp_email, emp_password)
    else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    let emp_name = emp_name.trim();
    let emp_email = emp_email.trim().to_lowercase();

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM employees WHERE emp_email = ?")
        .bind(&emp_email)
        .fetch_optional(pool.get_ref())
        .await?;

    if existing.is_some() {
        return Err(ApiError::Conflict("Email already exists"));
    }

    let hashed = hash_password(emp_password)?;
    let created_at = Utc::now().naive_utc();

    let mut tx = pool.begin().await?;

    let insert = sqlx::query(
        r#"
        INSERT INTO employees (emp_id, emp_name, emp_email, emp_password, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(emp_id)
    .bind(emp_name)
    .bind(&emp_email)
    .bind(&hashed)
    .bind(created_at)
    .execute(&mut *tx)
    .await;

    match insert {
        Ok(result) => {
            let id = result.last_insert_rowid();
            tx.commit().await?;

            info!(id, emp_id, "Employee created");

            Ok(HttpResponse::Created().json(json!({
                "message": "Employee created successfully",
                "employee": {
                    "id": id,
                    "emp_id": emp_id,
                    "emp_name": emp_name,
                    "emp_email": emp_email,
                },
            })))
        }
        Err(e) => {
            tx.rollback().await.ok();
            Err(ApiError::Database(e))
        }
    }
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employee/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, EmployeeResponse>(
        "SELECT id, emp_id, emp_name, emp_email FROM employees WHERE id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool.get_ref())
    .await?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Err(ApiError::NotFound("Employee")),
    }
}

/// List Employees
///
/// Unpaginated by design; acceptable at current data volume.
#[utoipa::path(
    get,
    path = "/api/employee/employees",
    responses(
        (status = 200, description = "All employees", body = [EmployeeResponse]),
        (status = 500, description = "Database error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, EmployeeResponse>(
        "SELECT id, emp_id, emp_name, emp_email FROM employees ORDER BY id",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employee/employee/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Employee updated successfully", body = Object, example = json!({
            "message": "Employee updated successfully"
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Database error")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let data = body.into_inner();

    let current = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool.get_ref())
        .await?;

    let Some(current) = current else {
        return Err(ApiError::NotFound("Employee"));
    };

    // Provided, non-empty values overwrite; anything else keeps the stored
    // value, so a field cannot be cleared through this endpoint.
    let emp_name = required_text(data.get("emp_name"))
        .map(|s| s.trim().to_string())
        .unwrap_or(current.emp_name);
    let emp_email = required_text(data.get("emp_email"))
        .map(|s| s.trim().to_lowercase())
        .unwrap_or(current.emp_email);
    let emp_password = match required_text(data.get("emp_password")) {
        Some(plain) => hash_password(plain)?,
        None => current.emp_password,
    };

    let mut tx = pool.begin().await?;

    let update = sqlx::query(
        "UPDATE employees SET emp_name = ?, emp_email = ?, emp_password = ? WHERE id = ?",
    )
    .bind(&emp_name)
    .bind(&emp_email)
    .bind(&emp_password)
    .bind(employee_id)
    .execute(&mut *tx)
    .await;

    match update {
        Ok(_) => {
            tx.commit().await?;
            Ok(HttpResponse::Ok().json(json!({ "message": "Employee updated successfully" })))
        }
        Err(e) => {
            tx.rollback().await.ok();
            Err(ApiError::Database(e))
        }
    }
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employee/employee/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted successfully", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Database error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let mut tx = pool.begin().await?;

    let delete = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(employee_id)
        .execute(&mut *tx)
        .await;

    match delete {
        Ok(result) if result.rows_affected() == 0 => {
            tx.rollback().await.ok();
            Err(ApiError::NotFound("Employee"))
        }
        Ok(_) => {
            tx.commit().await?;
            info!(employee_id, "Employee deleted");
            Ok(HttpResponse::Ok().json(json!({ "message": "Employee deleted successfully" })))
        }
        Err(e) => {
            tx.rollback().await.ok();
            Err(ApiError::Database(e))
        }
    }
}
