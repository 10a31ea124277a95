use crate::helpers::app::{TEACHER_RFID, device_request, make_test_app, request};
use axum::http::StatusCode;
use chrono::TimeDelta;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn register_hides_secret_and_rejects_duplicate_mac() {
    let app = make_test_app().await;
    let token = app.admin_token();

    let body = json!({ "mac_address": "aa-bb-cc-dd-ee-02", "secret": "s2", "name": "Lab 2" });
    let (status, json) = app
        .send(request("POST", "/api/devices/register", Some(&token), Some(body.clone())))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["mac_addr"], "AA:BB:CC:DD:EE:02");
    assert!(json["data"].get("secret").is_none());

    let (status, _) = app
        .send(request("POST", "/api/devices/register", Some(&token), Some(body)))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json) = app
        .send(request("GET", "/api/devices", Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[serial]
async fn heartbeat_stamps_boot_time_from_clock() {
    let app = make_test_app().await;
    app.clock.advance(TimeDelta::minutes(5));

    let (status, json) = app
        .send(device_request("POST", "/api/devices/heartbeat", None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["last_boot_at"], "2025-09-24T04:05:00Z");
}

#[tokio::test]
#[serial]
async fn teacher_tap_binds_reader_to_open_sessions() {
    let app = make_test_app().await;
    let body = json!({ "subject_instance_id": app.data.instance.id });
    let (_, started) = app
        .send(request("POST", "/api/sessions/start", Some(&app.teacher_token()), Some(body)))
        .await;
    let id = started["data"]["id"].as_i64().unwrap();

    let status_uri = format!("/api/devices/auth-status/{id}");
    let (_, before) = app
        .send(request("GET", &status_uri, Some(&app.teacher_token()), None))
        .await;
    assert_eq!(before["data"]["is_authenticated"], false);

    let tap = json!({ "teacher_rfid": TEACHER_RFID });
    let (status, json) = app
        .send(device_request("POST", "/api/devices/authenticate-teacher", Some(tap)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Asha Rao");
    assert_eq!(json["data"]["linked_sessions"], 1);

    let (_, after) = app
        .send(request("GET", &status_uri, Some(&app.teacher_token()), None))
        .await;
    assert_eq!(after["data"]["is_authenticated"], true);
    assert_eq!(after["data"]["authenticated_by"], "Asha Rao");
    assert_eq!(after["data"]["device_mac_address"], "AA:BB:CC:DD:EE:01");

    let unknown = json!({ "teacher_rfid": "NOPE" });
    let (status, _) = app
        .send(device_request("POST", "/api/devices/authenticate-teacher", Some(unknown)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
