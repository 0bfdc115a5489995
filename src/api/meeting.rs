use crate::{errors::ApiError, model::meeting::Meeting};
use actix_web::{HttpResponse, web};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::types::Json;
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

/// Keys that must be present (not necessarily truthy) in a create payload.
const REQUIRED_FIELDS: &[&str] = &["name", "host_id", "start_time", "attendees"];

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct MeetingSummary {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Sprint planning")]
    pub name: String,

    #[schema(example = 7)]
    pub host_id: i64,

    #[schema(value_type = String, format = "date-time")]
    pub start_time: NaiveDateTime,

    #[schema(value_type = Option<String>, format = "date-time")]
    pub end_time: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination {
    #[schema(example = 15)]
    pub total: i64,

    #[schema(example = 2)]
    pub pages: i64,

    #[schema(example = 1)]
    pub current_page: u32,

    #[schema(example = 10)]
    pub per_page: u32,

    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeetingListResponse {
    pub meetings: Vec<MeetingSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MeetingListQuery {
    /// Page number; malformed values fall back to 1.
    pub page: Option<String>,

    /// Items per page; malformed values fall back to 10.
    pub per_page: Option<String>,
}

/// ISO-8601 parse shared by create and update. Non-string values are
/// rejected up front rather than surfacing as a storage failure.
fn parse_datetime(value: &Value) -> Result<NaiveDateTime, ApiError> {
    let raw = value.as_str().ok_or_else(|| {
        ApiError::Validation("Datetime fields must be ISO-8601 strings".to_string())
    })?;

    raw.parse::<NaiveDateTime>().map_err(ApiError::from)
}

/// Optional end_time on create: null and the empty string both mean "no end".
fn optional_datetime(value: Option<&Value>) -> Result<Option<NaiveDateTime>, ApiError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(v) => parse_datetime(v).map(Some),
    }
}

/// Create Meeting
#[utoipa::path(
    post,
    path = "/api/meeting",
    request_body = Object,
    responses(
        (status = 201, description = "Meeting created successfully", body = Object, example = json!({
            "message": "Meeting created successfully",
            "meeting_id": 1,
            "meeting_link": "/meetings/1",
            "details": { "name": "Sprint planning", "start_time": "2025-01-01T10:00:00" }
        })),
        (status = 400, description = "Missing fields, non-list attendees, or malformed datetime"),
        (status = 500, description = "Database error")
    ),
    tag = "Meeting"
)]
pub async fn create_meeting(
    pool: web::Data<SqlitePool>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let data = body.into_inner();

    // Presence, not truthiness: an empty-string name passes this check.
    if !REQUIRED_FIELDS.iter().all(|field| data.get(field).is_some()) {
        return Err(ApiError::MissingFields(REQUIRED_FIELDS));
    }

    let attendees = match data.get("attendees") {
        Some(Value::Array(items)) => items.clone(),
        _ => return Err(ApiError::Validation("Attendees must be a list".to_string())),
    };

    let host_id = data
        .get("host_id")
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiError::Validation("host_id must be an integer".to_string()))?;

    let start_time = parse_datetime(&data["start_time"])?;
    let end_time = optional_datetime(data.get("end_time"))?;

    let name = data["name"].as_str().unwrap_or_default().to_string();
    let agenda = data
        .get("agenda")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let meeting_link = data
        .get("meeting_link")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let created_at = Utc::now().naive_utc();

    let mut tx = pool.begin().await?;

    let insert = sqlx::query(
        r#"
        INSERT INTO meetings
        (name, host_id, attendees, start_time, end_time, agenda, meeting_link, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&name)
    .bind(host_id)
    .bind(Json(&attendees))
    .bind(start_time)
    .bind(end_time)
    .bind(agenda)
    .bind(meeting_link)
    .bind(created_at)
    .execute(&mut *tx)
    .await;

    match insert {
        Ok(result) => {
            let meeting_id = result.last_insert_rowid();
            tx.commit().await?;

            info!(meeting_id, host_id, "Meeting created");

            Ok(HttpResponse::Created().json(json!({
                "message": "Meeting created successfully",
                "meeting_id": meeting_id,
                "meeting_link": format!("/meetings/{meeting_id}"),
                "details": { "name": name, "start_time": start_time },
            })))
        }
        Err(e) => {
            tx.rollback().await.ok();
            Err(ApiError::Database(e))
        }
    }
}

/// List Meetings
#[utoipa::path(
    get,
    path = "/api/meeting",
    params(MeetingListQuery),
    responses(
        (status = 200, description = "Paginated meeting summaries", body = MeetingListResponse),
        (status = 500, description = "Database error")
    ),
    tag = "Meeting"
)]
pub async fn list_meetings(
    pool: web::Data<SqlitePool>,
    query: web::Query<MeetingListQuery>,
) -> Result<HttpResponse, ApiError> {
    // Malformed values fall back to the defaults rather than erroring.
    let page = query
        .page
        .as_deref()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(1)
        .max(1);
    let per_page = query
        .per_page
        .as_deref()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(10)
        .clamp(1, 100);
    let offset = (page as i64 - 1) * per_page as i64;

    debug!(page, per_page, "Listing meetings");

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meetings")
        .fetch_one(pool.get_ref())
        .await?;

    let meetings = sqlx::query_as::<_, MeetingSummary>(
        r#"
        SELECT id, name, host_id, start_time, end_time
        FROM meetings
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(per_page as i64)
    .bind(offset)
    .fetch_all(pool.get_ref())
    .await?;

    let pages = (total + per_page as i64 - 1) / per_page as i64;

    Ok(HttpResponse::Ok().json(MeetingListResponse {
        meetings,
        pagination: Pagination {
            total,
            pages,
            current_page: page,
            per_page,
            has_next: (page as i64) < pages,
            has_prev: page > 1,
        },
    }))
}

/// Get Meeting by ID
#[utoipa::path(
    get,
    path = "/api/meeting/{id}",
    params(
        ("id", Path, description = "Meeting ID")
    ),
    responses(
        (status = 200, description = "Full meeting record", body = Meeting),
        (status = 404, description = "Meeting not found")
    ),
    tag = "Meeting"
)]
pub async fn get_meeting(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let meeting_id = path.into_inner();

    let meeting = sqlx::query_as::<_, Meeting>("SELECT * FROM meetings WHERE id = ?")
        .bind(meeting_id)
        .fetch_optional(pool.get_ref())
        .await?;

    match meeting {
        Some(m) => Ok(HttpResponse::Ok().json(m)),
        None => Err(ApiError::NotFound("Meeting")),
    }
}

/// Update Meeting
#[utoipa::path(
    put,
    path = "/api/meeting/{id}",
    params(
        ("id", Path, description = "Meeting ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Meeting updated successfully", body = Object, example = json!({
            "message": "Meeting updated successfully",
            "meeting_id": 1
        })),
        (status = 400, description = "Malformed datetime or non-list attendees"),
        (status = 404, description = "Meeting not found"),
        (status = 500, description = "Database error")
    ),
    tag = "Meeting"
)]
pub async fn update_meeting(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let meeting_id = path.into_inner();
    let data = body.into_inner();

    let current = sqlx::query_as::<_, Meeting>("SELECT * FROM meetings WHERE id = ?")
        .bind(meeting_id)
        .fetch_optional(pool.get_ref())
        .await?;

    let Some(mut meeting) = current else {
        return Err(ApiError::NotFound("Meeting"));
    };

    // Datetimes are parsed once, before any field is assigned; the parsed
    // values feed both validation and assignment.
    let start_time = data.get("start_time").map(parse_datetime).transpose()?;
    let end_time = match data.get("end_time") {
        None | Some(Value::Null) => None,
        Some(v) => Some(parse_datetime(v)?),
    };

    // Non-null overwrite: absent or null keys keep the stored value. A null
    // end_time is indistinguishable from an omitted one, so end_time cannot
    // be cleared through this endpoint.
    if let Some(name) = data.get("name").and_then(Value::as_str) {
        meeting.name = name.to_string();
    }
    if let Some(host_id) = data.get("host_id").and_then(Value::as_i64) {
        meeting.host_id = host_id;
    }
    match data.get("attendees") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => meeting.attendees = Json(items.clone()),
        Some(_) => return Err(ApiError::Validation("Attendees must be a list".to_string())),
    }
    if let Some(parsed) = start_time {
        meeting.start_time = parsed;
    }
    if let Some(parsed) = end_time {
        meeting.end_time = Some(parsed);
    }
    if let Some(agenda) = data.get("agenda").and_then(Value::as_str) {
        meeting.agenda = agenda.to_string();
    }
    if let Some(link) = data.get("meeting_link").and_then(Value::as_str) {
        meeting.meeting_link = link.to_string();
    }

    let mut tx = pool.begin().await?;

    let update = sqlx::query(
        r#"
        UPDATE meetings
        SET name = ?, host_id = ?, attendees = ?, start_time = ?, end_time = ?,
            agenda = ?, meeting_link = ?
        WHERE id = ?
        "#,
    )
    .bind(&meeting.name)
    .bind(meeting.host_id)
    .bind(&meeting.attendees)
    .bind(meeting.start_time)
    .bind(meeting.end_time)
    .bind(&meeting.agenda)
    .bind(&meeting.meeting_link)
    .bind(meeting_id)
    .execute(&mut *tx)
    .await;

    match update {
        Ok(_) => {
            tx.commit().await?;

            info!(meeting_id, "Meeting updated");

            Ok(HttpResponse::Ok().json(json!({
                "message": "Meeting updated successfully",
                "meeting_id": meeting_id,
            })))
        }
        Err(e) => {
            tx.rollback().await.ok();
            Err(ApiError::Database(e))
        }
    }
}

/// Delete Meeting
#[utoipa::path(
    delete,
    path = "/api/meeting/{id}",
    params(
        ("id", Path, description = "Meeting ID")
    ),
    responses(
        (status = 200, description = "Meeting deleted successfully", body = Object, example = json!({
            "message": "Meeting deleted successfully",
            "meeting_id": 1,
            "deleted_meeting": { "name": "Sprint planning", "host_id": 7 }
        })),
        (status = 404, description = "Meeting not found"),
        (status = 500, description = "Database error")
    ),
    tag = "Meeting"
)]
pub async fn delete_meeting(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let meeting_id = path.into_inner();

    let meeting = sqlx::query_as::<_, Meeting>("SELECT * FROM meetings WHERE id = ?")
        .bind(meeting_id)
        .fetch_optional(pool.get_ref())
        .await?;

    let Some(meeting) = meeting else {
        return Err(ApiError::NotFound("Meeting"));
    };

    let mut tx = pool.begin().await?;

    let delete = sqlx::query("DELETE FROM meetings WHERE id = ?")
        .bind(meeting_id)
        .execute(&mut *tx)
        .await;

    match delete {
        Ok(_) => {
            tx.commit().await?;

            info!(meeting_id, "Meeting deleted");

            Ok(HttpResponse::Ok().json(json!({
                "message": "Meeting deleted successfully",
                "meeting_id": meeting_id,
                "deleted_meeting": { "name": meeting.name, "host_id": meeting.host_id },
            })))
        }
        Err(e) => {
            tx.rollback().await.ok();
            Err(ApiError::Database(e))
        }
    }
}
