use crate::helpers::app::{make_test_app, request};
use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn login_issues_token_with_faculty_link() {
    let app = make_test_app().await;

    let body = json!({ "email": "Teacher@Example.edu", "password": "teacher-pass" });
    let (status, json) = app
        .send(request("POST", "/api/auth/login", None, Some(body)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["data"]["user"]["role"], "TEACHER");
    assert_eq!(json["data"]["user"]["faculty_id"], app.data.teacher.id);
    assert_eq!(json["data"]["user"]["rfid_uid"], "FAC-RFID-1");

    // The issued token opens faculty-only routes.
    let token = json["data"]["token"].as_str().unwrap().to_owned();
    let (status, _) = app
        .send(request("GET", "/api/sessions/teacher-instances", Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn wrong_password_is_unauthorized() {
    let app = make_test_app().await;

    let body = json!({ "email": "teacher@example.edu", "password": "nope" });
    let (status, json) = app
        .send(request("POST", "/api/auth/login", None, Some(body)))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid credentials");
}

#[tokio::test]
#[serial]
async fn malformed_email_is_rejected_before_lookup() {
    let app = make_test_app().await;

    let body = json!({ "email": "not-an-email", "password": "x" });
    let (status, json) = app
        .send(request("POST", "/api/auth/login", None, Some(body)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid email format");
}

#[tokio::test]
#[serial]
async fn coordinator_creates_accounts_and_duplicates_conflict() {
    let app = make_test_app().await;
    let token = app.admin_token();

    let body = json!({ "email": "pc@example.edu", "password": "long-enough", "role": "PCOORD" });
    let (status, json) = app
        .send(request("POST", "/api/users", Some(&token), Some(body.clone())))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["role"], "PCOORD");
    assert!(json["data"].get("password_hash").is_none());

    let (status, _) = app
        .send(request("POST", "/api/users", Some(&token), Some(body)))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
