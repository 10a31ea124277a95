use crate::helpers::app::{make_test_app, request};
use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn student_lifecycle_through_catalog_routes() {
    let app = make_test_app().await;
    let token = app.admin_token();

    let (status, section) = app
        .send(request("POST", "/api/sections", Some(&token), Some(json!({ "name": "CSE-B" }))))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let section_id = section["data"]["id"].as_i64().unwrap();

    let student = json!({
        "name": "Kabir",
        "enrollment_no": "E100",
        "rfid_uid": "R100",
        "section_id": section_id
    });
    let (status, created) = app
        .send(request("POST", "/api/students", Some(&token), Some(student.clone())))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let student_id = created["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .send(request("POST", "/api/students", Some(&token), Some(student)))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, listed) = app
        .send(request(
            "GET",
            &format!("/api/students?section_id={section_id}"),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    // A section with students cannot go away.
    let section_uri = format!("/api/sections/{section_id}");
    let (status, _) = app
        .send(request("DELETE", &section_uri, Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(request("DELETE", &format!("/api/students/{student_id}"), Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send(request("DELETE", &section_uri, Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send(request("GET", &section_uri, Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn subject_instances_describe_their_parts() {
    let app = make_test_app().await;
    let token = app.admin_token();

    let (status, subject) = app
        .send(request(
            "POST",
            "/api/subjects",
            Some(&token),
            Some(json!({ "code": "cs202", "name": "Networks" })),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(subject["data"]["code"], "CS202");

    let body = json!({
        "subject_id": subject["data"]["id"],
        "section_id": app.data.section.id,
        "faculty_id": app.data.other_teacher.id
    });
    let (status, created) = app
        .send(request("POST", "/api/subject-instances", Some(&token), Some(body.clone())))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app
        .send(request("POST", "/api/subject-instances", Some(&token), Some(body)))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let id = created["data"]["id"].as_i64().unwrap();
    let (status, detail) = app
        .send(request("GET", &format!("/api/subject-instances/{id}"), Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["data"]["subject_code"], "CS202");
    assert_eq!(detail["data"]["faculty_name"], "Ravi Iyer");
    assert_eq!(detail["data"]["section_name"], "CSE-A");
}

#[tokio::test]
#[serial]
async fn faculty_with_login_can_sign_in() {
    let app = make_test_app().await;
    let token = app.admin_token();

    let body = json!({
        "emp_id": "EMP010",
        "name": "Nila Das",
        "rfid_uid": "FAC-RFID-10",
        "email": "nila@example.edu",
        "password": "nila-pass"
    });
    let (status, created) = app
        .send(request("POST", "/api/faculty", Some(&token), Some(body)))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let login = json!({ "email": "nila@example.edu", "password": "nila-pass" });
    let (status, json) = app
        .send(request("POST", "/api/auth/login", None, Some(login)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["user"]["faculty_id"], created["data"]["id"]);
}
