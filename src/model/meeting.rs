use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use utoipa::ToSchema;

/// Meeting row. `host_id` loosely references an account id; no foreign key
/// enforces it, so deleting an account leaves its meetings in place.
/// `attendees` is an ordered JSON array of opaque identifiers.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Sprint planning",
        "host_id": 7,
        "attendees": ["alice@company.com", "bob@company.com"],
        "start_time": "2025-01-01T10:00:00",
        "end_time": null,
        "agenda": "Scope next sprint",
        "meeting_link": "https://meet.example/sprint",
        "created_at": "2024-12-20T09:30:00"
    })
)]
pub struct Meeting {
    pub id: i64,

    pub name: String,

    pub host_id: i64,

    #[schema(value_type = Vec<String>)]
    pub attendees: Json<Vec<Value>>,

    #[schema(value_type = String, format = "date-time")]
    pub start_time: NaiveDateTime,

    #[schema(value_type = Option<String>, format = "date-time")]
    pub end_time: Option<NaiveDateTime>,

    pub agenda: String,

    pub meeting_link: String,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,
}
