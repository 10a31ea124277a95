use crate::helpers::app::{TestApp, device_request, make_test_app, request};
use axum::{
    body::to_bytes,
    http::{StatusCode, header::CONTENT_TYPE},
};
use chrono::{TimeZone, Utc};
use serde_json::json;
use serial_test::serial;

async fn open_session(app: &TestApp) -> i64 {
    let body = json!({ "subject_instance_id": app.data.instance.id });
    let (status, json) = app
        .send(request("POST", "/api/sessions/start", Some(&app.teacher_token()), Some(body)))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_i64().unwrap()
}

fn scan_body(session_id: i64, rfid: &str) -> serde_json::Value {
    json!({ "rfid_uid": rfid, "session_id": session_id })
}

#[tokio::test]
#[serial]
async fn scan_stores_utc_and_shows_local_wall_clock() {
    let app = make_test_app().await;
    let id = open_session(&app).await;
    app.clock.set(Utc.with_ymd_and_hms(2025, 9, 24, 6, 24, 31).unwrap());

    let (status, json) = app
        .send(device_request("POST", "/api/attendance/scan", Some(scan_body(id, "R3"))))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["log"]["scanned_at"], "2025-09-24T06:24:31Z");
    assert_eq!(json["data"]["display_time"], "11:54:31 AM");
    assert_eq!(json["data"]["student_name"], "Zoya");

    let (status, json) = app
        .send(device_request("POST", "/api/attendance/scan", Some(scan_body(id, "R3"))))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn reader_local_digits_are_normalized_at_host_offset() {
    let app = make_test_app().await;
    let id = open_session(&app).await;

    let body = json!({ "rfid_uid": "R1", "session_id": id, "timestamp": "2025-09-24 11:55:00" });
    let (status, json) = app
        .send(device_request("POST", "/api/attendance/scan", Some(body)))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["log"]["scanned_at"], "2025-09-24T06:25:00Z");
    assert_eq!(json["data"]["display_time"], "11:55:00 AM");

    let garbage = json!({ "rfid_uid": "R2", "session_id": id, "timestamp": "yesterday-ish" });
    let (status, _) = app
        .send(device_request("POST", "/api/attendance/scan", Some(garbage)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn reading_at_the_calendar_edge_is_a_bad_request() {
    let app = make_test_app().await;
    let id = open_session(&app).await;

    let body = json!({ "rfid_uid": "R1", "session_id": id, "timestamp": "-262143-01-01T00:00:00" });
    let (status, _) = app
        .send(device_request("POST", "/api/attendance/scan", Some(body)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = app
        .send(device_request("POST", "/api/attendance/scan", Some(scan_body(id, "R1"))))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
}

#[tokio::test]
#[serial]
async fn unknown_card_and_closed_session_are_rejected() {
    let app = make_test_app().await;
    let id = open_session(&app).await;

    let (status, _) = app
        .send(device_request("POST", "/api/attendance/scan", Some(scan_body(id, "NOPE"))))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.send(request(
        "POST",
        &format!("/api/sessions/{id}/close"),
        Some(&app.teacher_token()),
        None,
    ))
    .await;

    let (status, json) = app
        .send(device_request("POST", "/api/attendance/scan", Some(scan_body(id, "R1"))))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Session is not active or does not exist");
}

#[tokio::test]
#[serial]
async fn snapshot_export_and_report_agree() {
    let app = make_test_app().await;
    let id = open_session(&app).await;

    app.clock.set(Utc.with_ymd_and_hms(2025, 9, 24, 6, 24, 31).unwrap());
    app.send(device_request("POST", "/api/attendance/scan", Some(scan_body(id, "R3"))))
        .await;
    app.clock.set(Utc.with_ymd_and_hms(2025, 9, 24, 6, 30, 0).unwrap());
    app.send(device_request("POST", "/api/attendance/scan", Some(scan_body(id, "R1"))))
        .await;

    let token = app.teacher_token();
    let (status, snap) = app
        .send(request("GET", &format!("/api/attendance/snapshot/{id}"), Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snap["data"]["present_count"], 2);
    assert_eq!(snap["data"]["absent_count"], 1);
    assert_eq!(snap["data"]["present"][0]["name"], "Zoya");
    assert_eq!(snap["data"]["present"][0]["display_time"], "11:54:31 AM");
    assert_eq!(snap["data"]["absent"][0]["name"], "Meera");

    let response = app
        .raw(request("GET", &format!("/api/attendance/export/{id}"), Some(&token), None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_TYPE].to_str().unwrap(),
        "text/csv; charset=utf-8"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "S. No.,Student Name,Enrollment No.,Status,Scanned At");
    assert_eq!(lines[2], "2,Meera,E002,ABSENT,N/A");
    assert_eq!(lines[3], "3,Zoya,E003,PRESENT,\"24 Sep 2025, 11:54:31 AM\"");

    app.send(request("POST", &format!("/api/sessions/{id}/close"), Some(&token), None))
        .await;

    let uri = format!(
        "/api/attendance/report/{}?from=2025-09-24&to=2025-09-24",
        app.data.section.id
    );
    let (status, report) = app.send(request("GET", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["data"]["total_sessions"], 1);
    assert_eq!(report["data"]["students"][0]["name"], "Arjun");
    assert_eq!(report["data"]["students"][0]["percentage"], 100.0);
    assert_eq!(report["data"]["students"][1]["percentage"], 0.0);
}

#[tokio::test]
#[serial]
async fn admin_can_wipe_session_logs() {
    let app = make_test_app().await;
    let id = open_session(&app).await;
    app.send(device_request("POST", "/api/attendance/scan", Some(scan_body(id, "R2"))))
        .await;

    let uri = format!("/api/attendance/sessions/{id}/logs");
    let (status, json) = app
        .send(request("DELETE", &uri, Some(&app.admin_token()), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["deleted"], 1);

    // The card can be scanned again afterwards.
    let (status, _) = app
        .send(device_request("POST", "/api/attendance/scan", Some(scan_body(id, "R2"))))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}
