use crate::helpers::app::{DEVICE_MAC, make_test_app, request};
use axum::{body::Body, http::{Request, StatusCode}};
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn missing_token_is_unauthorized() {
    let app = make_test_app().await;

    let (status, json) = app.send(request("GET", "/api/sections", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Authentication required");
}

#[tokio::test]
#[serial]
async fn tampered_token_is_unauthorized() {
    let app = make_test_app().await;
    let mut token = app.teacher_token();
    token.push('x');

    let (status, _) = app
        .send(request("GET", "/api/sessions/active", Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn teachers_cannot_manage_catalog() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(request("GET", "/api/sections", Some(&app.teacher_token()), None))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Coordinator access required");

    let (status, _) = app
        .send(request("GET", "/api/sections", Some(&app.admin_token()), None))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn log_cleanup_is_admin_only() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(request(
            "DELETE",
            "/api/attendance/sessions/1/logs",
            Some(&app.teacher_token()),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Admin access required");
}

#[tokio::test]
#[serial]
async fn accounts_without_faculty_cannot_start_sessions() {
    let app = make_test_app().await;

    let body = json!({ "subject_instance_id": app.data.instance.id });
    let (status, json) = app
        .send(request("POST", "/api/sessions/start", Some(&app.admin_token()), Some(body)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "A faculty profile is required");
}

#[tokio::test]
#[serial]
async fn reader_routes_need_valid_device_credentials() {
    let app = make_test_app().await;

    let body = json!({ "rfid_uid": "R1", "session_id": 1 });
    let (status, json) = app
        .send(request("POST", "/api/attendance/scan", None, Some(body.clone())))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Device credentials required");

    let req = Request::builder()
        .method("POST")
        .uri("/api/attendance/scan")
        .header("Content-Type", "application/json")
        .header("X-Device-Mac", DEVICE_MAC)
        .header("X-Device-Secret", "wrong")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, json) = app.send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid device credentials");
}
