//! Meeting lifecycle over the real routes: creation validation, datetime
//! handling, pagination, partial update, and deletion.

mod common;

use actix_web::test;
use serde_json::{Value, json};

async fn create_meeting(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    body: Value,
) -> Value {
    let req = common::post_json("/api/meeting", &body).to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);
    test::read_body_json(resp).await
}

fn standard_meeting() -> Value {
    json!({
        "name": "Sprint planning",
        "host_id": 7,
        "start_time": "2025-01-01T10:00:00",
        "attendees": ["alice@company.com", "bob@company.com"],
        "agenda": "Scope next sprint",
    })
}

#[actix_web::test]
async fn create_and_fetch_round_trip() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let created = create_meeting(&app, standard_meeting()).await;
    assert_eq!(created["message"], "Meeting created successfully");
    let id = created["meeting_id"].as_i64().unwrap();
    assert_eq!(created["meeting_link"], format!("/meetings/{id}"));
    assert_eq!(created["details"]["name"], "Sprint planning");
    assert_eq!(created["details"]["start_time"], "2025-01-01T10:00:00");

    let req = common::get(&format!("/api/meeting/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Sprint planning");
    assert_eq!(body["host_id"], 7);
    assert_eq!(
        body["attendees"],
        json!(["alice@company.com", "bob@company.com"])
    );
    assert_eq!(body["start_time"], "2025-01-01T10:00:00");
    assert_eq!(body["end_time"], Value::Null);
    assert_eq!(body["agenda"], "Scope next sprint");
    assert_eq!(body["meeting_link"], "");
    assert!(body["created_at"].is_string());
}

#[actix_web::test]
async fn create_missing_fields_lists_required_keys() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let req = common::post_json(
        "/api/meeting",
        &json!({ "name": "No attendees", "host_id": 1, "start_time": "2025-01-01T10:00:00" }),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(
        body["required"],
        json!(["name", "host_id", "start_time", "attendees"])
    );
}

#[actix_web::test]
async fn create_accepts_empty_name_by_presence_check() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let mut body = standard_meeting();
    body["name"] = json!("");
    let created = create_meeting(&app, body).await;
    assert_eq!(created["details"]["name"], "");
}

#[actix_web::test]
async fn create_rejects_non_list_attendees_before_persisting() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let mut body = standard_meeting();
    body["attendees"] = json!("not-a-list");
    let req = common::post_json("/api/meeting", &body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let parsed: Value = test::read_body_json(resp).await;
    assert_eq!(parsed["error"], "Attendees must be a list");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meetings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn create_rejects_malformed_datetime() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let mut body = standard_meeting();
    body["start_time"] = json!("01/01/2025 10:00");
    let req = common::post_json("/api/meeting", &body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let parsed: Value = test::read_body_json(resp).await;
    assert_eq!(parsed["error"], "Invalid datetime format");
    assert!(parsed["details"].is_string());
}

#[actix_web::test]
async fn create_treats_empty_end_time_as_absent() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let mut body = standard_meeting();
    body["end_time"] = json!("");
    let created = create_meeting(&app, body).await;
    let id = created["meeting_id"].as_i64().unwrap();

    let req = common::get(&format!("/api/meeting/{id}")).to_request();
    let fetched: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched["end_time"], Value::Null);
}

#[actix_web::test]
async fn list_paginates_fifteen_meetings_across_two_pages() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    for i in 1..=15 {
        let mut body = standard_meeting();
        body["name"] = json!(format!("Meeting {i}"));
        create_meeting(&app, body).await;
    }

    let req = common::get("/api/meeting?page=1&per_page=10").to_request();
    let page1: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page1["meetings"].as_array().unwrap().len(), 10);
    assert_eq!(page1["meetings"][0]["name"], "Meeting 1");
    assert_eq!(page1["pagination"]["total"], 15);
    assert_eq!(page1["pagination"]["pages"], 2);
    assert_eq!(page1["pagination"]["current_page"], 1);
    assert_eq!(page1["pagination"]["per_page"], 10);
    assert_eq!(page1["pagination"]["has_next"], true);
    assert_eq!(page1["pagination"]["has_prev"], false);

    let req = common::get("/api/meeting?page=2&per_page=10").to_request();
    let page2: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page2["meetings"].as_array().unwrap().len(), 5);
    assert_eq!(page2["meetings"][0]["name"], "Meeting 11");
    assert_eq!(page2["pagination"]["has_next"], false);
    assert_eq!(page2["pagination"]["has_prev"], true);

    // Beyond the last page: empty list, not an error.
    let req = common::get("/api/meeting?page=3&per_page=10").to_request();
    let page3: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page3["meetings"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn list_falls_back_to_defaults_on_malformed_params() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    create_meeting(&app, standard_meeting()).await;

    let req = common::get("/api/meeting?page=abc&per_page=-3").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["pagination"]["current_page"], 1);
    assert_eq!(body["pagination"]["per_page"], 10);
    assert_eq!(body["meetings"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn get_missing_meeting_is_404() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let req = common::get("/api/meeting/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Meeting not found");
}

#[actix_web::test]
async fn update_agenda_only_leaves_other_fields_untouched() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let created = create_meeting(&app, standard_meeting()).await;
    let id = created["meeting_id"].as_i64().unwrap();

    let req = common::put_json(
        &format!("/api/meeting/{id}"),
        &json!({ "agenda": "Revised agenda" }),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Meeting updated successfully");
    assert_eq!(body["meeting_id"], id);

    let req = common::get(&format!("/api/meeting/{id}")).to_request();
    let fetched: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched["agenda"], "Revised agenda");
    assert_eq!(fetched["name"], "Sprint planning");
    assert_eq!(fetched["host_id"], 7);
    assert_eq!(fetched["start_time"], "2025-01-01T10:00:00");
    assert_eq!(
        fetched["attendees"],
        json!(["alice@company.com", "bob@company.com"])
    );
}

#[actix_web::test]
async fn update_rejects_malformed_datetime_before_any_mutation() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let created = create_meeting(&app, standard_meeting()).await;
    let id = created["meeting_id"].as_i64().unwrap();

    let req = common::put_json(
        &format!("/api/meeting/{id}"),
        &json!({ "name": "Changed", "start_time": "bogus" }),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid datetime format");

    let req = common::get(&format!("/api/meeting/{id}")).to_request();
    let fetched: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched["name"], "Sprint planning");
}

#[actix_web::test]
async fn update_cannot_clear_end_time_with_null() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let mut body = standard_meeting();
    body["end_time"] = json!("2025-01-01T11:00:00");
    let created = create_meeting(&app, body).await;
    let id = created["meeting_id"].as_i64().unwrap();

    // Explicit null is indistinguishable from omission and is skipped.
    let req = common::put_json(&format!("/api/meeting/{id}"), &json!({ "end_time": null }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = common::get(&format!("/api/meeting/{id}")).to_request();
    let fetched: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched["end_time"], "2025-01-01T11:00:00");
}

#[actix_web::test]
async fn update_rejects_non_list_attendees() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let created = create_meeting(&app, standard_meeting()).await;
    let id = created["meeting_id"].as_i64().unwrap();

    let req = common::put_json(
        &format!("/api/meeting/{id}"),
        &json!({ "attendees": "not-a-list" }),
    )
    .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_web::test]
async fn update_missing_meeting_is_404() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let req = common::put_json("/api/meeting/42", &json!({ "agenda": "x" })).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn delete_echoes_summary_then_fetch_is_404() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let created = create_meeting(&app, standard_meeting()).await;
    let id = created["meeting_id"].as_i64().unwrap();

    let req = common::delete(&format!("/api/meeting/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Meeting deleted successfully");
    assert_eq!(body["meeting_id"], id);
    assert_eq!(body["deleted_meeting"]["name"], "Sprint planning");
    assert_eq!(body["deleted_meeting"]["host_id"], 7);

    let req = common::get(&format!("/api/meeting/{id}")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = common::delete(&format!("/api/meeting/{id}")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}
