use crate::helpers::app::{make_test_app, request};
use axum::http::StatusCode;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn health_reports_database_and_zone() {
    let app = make_test_app().await;

    let (status, json) = app.send(request("GET", "/api/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Health check passed");
    assert_eq!(json["data"]["database"], "ok");
    assert_eq!(json["data"]["env"], "test");
    assert_eq!(json["data"]["display_timezone"], "Asia/Kolkata");
    assert_eq!(json["data"]["server_time"], "2025-09-24T04:00:00Z");
}
