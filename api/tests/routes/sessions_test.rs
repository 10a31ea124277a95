use crate::helpers::app::{TestApp, device_request, make_test_app, request};
use axum::http::StatusCode;
use chrono::TimeDelta;
use serde_json::json;
use serial_test::serial;

async fn start(app: &TestApp) -> i64 {
    let body = json!({ "subject_instance_id": app.data.instance.id });
    let (status, json) = app
        .send(request("POST", "/api/sessions/start", Some(&app.teacher_token()), Some(body)))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
#[serial]
async fn start_uses_server_clock_and_second_start_conflicts() {
    let app = make_test_app().await;
    let id = start(&app).await;

    let (status, json) = app
        .send(request(
            "GET",
            &format!("/api/sessions/{id}"),
            Some(&app.teacher_token()),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["start_at"], "2025-09-24T04:00:00Z");
    assert_eq!(json["data"]["start_display"], "09:30:00 AM");
    assert_eq!(json["data"]["section_name"], "CSE-A");

    let body = json!({ "subject_instance_id": app.data.instance.id });
    let (status, _) = app
        .send(request("POST", "/api/sessions/start", Some(&app.teacher_token()), Some(body)))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn other_teachers_cannot_start_or_close() {
    let app = make_test_app().await;

    let body = json!({ "subject_instance_id": app.data.instance.id });
    let (status, _) = app
        .send(request(
            "POST",
            "/api/sessions/start",
            Some(&app.other_teacher_token()),
            Some(body),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let id = start(&app).await;
    let (status, json) = app
        .send(request(
            "POST",
            &format!("/api/sessions/{id}/close"),
            Some(&app.other_teacher_token()),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "You can only close your own sessions");

    // Coordinators may close anyone's session.
    let (status, _) = app
        .send(request(
            "POST",
            &format!("/api/sessions/{id}/close"),
            Some(&app.admin_token()),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn close_stamps_end_and_twice_conflicts() {
    let app = make_test_app().await;
    let id = start(&app).await;
    app.clock.advance(TimeDelta::minutes(50));

    let uri = format!("/api/sessions/{id}/close");
    let (status, json) = app
        .send(request("POST", &uri, Some(&app.teacher_token()), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["is_closed"], true);
    assert_eq!(json["data"]["end_at"], "2025-09-24T04:50:00Z");

    let (status, _) = app
        .send(request("POST", &uri, Some(&app.teacher_token()), None))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(request("POST", "/api/sessions/999/close", Some(&app.teacher_token()), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn reader_polls_active_session_by_teacher() {
    let app = make_test_app().await;
    let uri = format!("/api/sessions/active-by-teacher/{}", app.data.teacher.id);

    let (status, json) = app.send(device_request("GET", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].is_null());
    assert_eq!(json["message"], "No active session");

    let id = start(&app).await;
    let (status, json) = app.send(device_request("GET", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], id);

    let (_, active) = app
        .send(request("GET", "/api/sessions/active", Some(&app.admin_token()), None))
        .await;
    assert_eq!(active["data"].as_array().unwrap().len(), 1);
}
