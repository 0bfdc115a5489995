use crate::{
    api::required_text,
    auth::password::{hash_password, verify_password},
    errors::ApiError,
    model::{account::Account, role::AccountRole},
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

/// Shared registration path for both discriminator variants. Email is
/// normalized (lower-case + trim) before the uniqueness check and storage;
/// the same policy applies to admins and users.
async fn register_account(
    pool: &SqlitePool,
    data: Value,
    role: AccountRole,
) -> Result<HttpResponse, ApiError> {
    let name = required_text(data.get("name"));
    let email = required_text(data.get("email"));
    let password = required_text(data.get("password"));

    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    let name = name.trim();
    let email = email.trim().to_lowercase();

    // Check-then-insert is not atomic; the UNIQUE (role, email) constraint
    // rejects the losing concurrent writer.
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM accounts WHERE role = ? AND email = ?")
            .bind(role.to_string())
            .bind(&email)
            .fetch_optional(pool)
            .await?;

    if existing.is_some() {
        return Err(ApiError::Conflict("Email already exists"));
    }

    let hashed = hash_password(password)?;
    let created_at = Utc::now().naive_utc();

    let mut tx = pool.begin().await?;

    let insert = sqlx::query(
        r#"
        INSERT INTO accounts (role, name, email, password, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(role.to_string())
    .bind(name)
    .bind(&email)
    .bind(&hashed)
    .bind(created_at)
    .execute(&mut *tx)
    .await;

    match insert {
        Ok(result) => {
            let id = result.last_insert_rowid();
            tx.commit().await?;

            info!(id, %role, "Account registered");

            Ok(HttpResponse::Created().json(json!({
                "message": format!("{} created successfully", role.label()),
                "user": { "id": id, "name": name, "email": email },
            })))
        }
        Err(e) => {
            tx.rollback().await.ok();
            Err(ApiError::Database(e))
        }
    }
}

/// Shared login path. Confirms credentials and returns identity fields only;
/// no token or session artifact is issued.
async fn login_account(
    pool: &SqlitePool,
    data: Value,
    role: AccountRole,
) -> Result<HttpResponse, ApiError> {
    let email = required_text(data.get("email"));
    let password = required_text(data.get("password"));

    let (Some(email), Some(password)) = (email, password) else {
        return Err(ApiError::Validation("Missing Email or Password".to_string()));
    };

    let email = email.trim().to_lowercase();

    debug!("Fetching account");

    let account =
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE role = ? AND email = ?")
            .bind(role.to_string())
            .bind(&email)
            .fetch_optional(pool)
            .await?;

    // Unknown email and wrong password are indistinguishable to the caller.
    let Some(account) = account else {
        info!("Invalid credentials: account not found");
        return Err(ApiError::Unauthorized);
    };

    if verify_password(password, &account.password).is_err() {
        info!("Invalid credentials: password mismatch");
        return Err(ApiError::Unauthorized);
    }

    info!(account_id = account.id, "Login successful");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful",
        "user": { "id": account.id, "email": account.email },
    })))
}

/// Register Admin
#[utoipa::path(
    post,
    path = "/api/admin/auth/register",
    request_body = Object,
    responses(
        (status = 201, description = "Admin created", body = Object, example = json!({
            "message": "Admin created successfully",
            "user": { "id": 1, "name": "Ada", "email": "ada@company.com" }
        })),
        (status = 400, description = "Missing fields or duplicate email")
    ),
    tag = "Auth"
)]
pub async fn register_admin(
    pool: web::Data<SqlitePool>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    register_account(pool.get_ref(), body.into_inner(), AccountRole::Admin).await
}

/// Login Admin
#[utoipa::path(
    post,
    path = "/api/admin/auth/login",
    request_body = Object,
    responses(
        (status = 200, description = "Login successful", body = Object, example = json!({
            "message": "Login successful",
            "user": { "id": 1, "email": "ada@company.com" }
        })),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(name = "admin_login", skip(pool, body))]
pub async fn login_admin(
    pool: web::Data<SqlitePool>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    login_account(pool.get_ref(), body.into_inner(), AccountRole::Admin).await
}

/// Register User
#[utoipa::path(
    post,
    path = "/api/user/auth/register",
    request_body = Object,
    responses(
        (status = 201, description = "User created", body = Object),
        (status = 400, description = "Missing fields or duplicate email")
    ),
    tag = "Auth"
)]
pub async fn register_user(
    pool: web::Data<SqlitePool>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    register_account(pool.get_ref(), body.into_inner(), AccountRole::User).await
}

/// Login User
#[utoipa::path(
    post,
    path = "/api/user/auth/login",
    request_body = Object,
    responses(
        (status = 200, description = "Login successful", body = Object),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(name = "user_login", skip(pool, body))]
pub async fn login_user(
    pool: web::Data<SqlitePool>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    login_account(pool.get_ref(), body.into_inner(), AccountRole::User).await
}
