use api::{auth::generate_jwt, routes::routes};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    response::Response,
};
use chrono::{DateTime, TimeZone, Utc};
use db::models::{device, faculty, section, student, subject, subject_instance, user};
use db::test_utils::setup_test_db;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use util::config::AppConfig;
use util::state::AppState;
use util::time::{DisplayZone, FixedClock, Normalizer};

pub const DEVICE_MAC: &str = "AA:BB:CC:DD:EE:01";
pub const DEVICE_SECRET: &str = "reader-secret";
pub const TEACHER_RFID: &str = "FAC-RFID-1";

/// 09:30 in Asia/Kolkata.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 24, 4, 0, 0).unwrap()
}

pub struct TestData {
    pub admin: user::Model,
    pub teacher_user: user::Model,
    pub teacher: faculty::Model,
    pub other_teacher_user: user::Model,
    pub other_teacher: faculty::Model,
    pub section: section::Model,
    pub subject: subject::Model,
    pub instance: subject_instance::Model,
    pub device: device::Model,
    /// Arjun (R1), Meera (R2), Zoya (R3).
    pub students: Vec<student::Model>,
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: FixedClock,
    pub data: TestData,
}

impl TestApp {
    pub fn admin_token(&self) -> String {
        token_for(&self.data.admin, None)
    }

    pub fn teacher_token(&self) -> String {
        token_for(&self.data.teacher_user, Some(self.data.teacher.id))
    }

    pub fn other_teacher_token(&self) -> String {
        token_for(&self.data.other_teacher_user, Some(self.data.other_teacher.id))
    }

    /// Sends one request through a clone of the router and decodes the body.
    ///
    /// Non-JSON bodies come back as a JSON string.
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.raw(req).await;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
        (status, json)
    }

    pub async fn raw(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }
}

fn token_for(account: &user::Model, faculty_id: Option<i64>) -> String {
    generate_jwt(account.id, account.role, faculty_id).unwrap().0
}

/// Builds a request with an optional bearer token and optional JSON body.
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// A request signed with the registered reader's credentials.
pub fn device_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let mut req = request(method, uri, None, body);
    let headers = req.headers_mut();
    headers.insert("X-Device-Mac", DEVICE_MAC.parse().unwrap());
    headers.insert("X-Device-Secret", DEVICE_SECRET.parse().unwrap());
    req
}

fn configure() {
    unsafe {
        std::env::set_var("DATABASE_PATH", "sqlite::memory:");
        std::env::set_var("JWT_SECRET", "test-secret");
    }
    AppConfig::set_jwt_secret("test-secret");
    AppConfig::set_jwt_duration_minutes(60u64);
    AppConfig::set_env("test");
}

/// Fresh in-memory database, seeded, with the clock pinned at [`t0`].
pub async fn make_test_app() -> TestApp {
    configure();

    let db = setup_test_db().await;
    let now = t0();

    let admin = user::Model::create(&db, "admin@example.edu", "admin-pass", user::Role::Admin, now)
        .await
        .unwrap();
    let teacher_user =
        user::Model::create(&db, "teacher@example.edu", "teacher-pass", user::Role::Teacher, now)
            .await
            .unwrap();
    let teacher = faculty::Model::create(
        &db,
        Some(teacher_user.id),
        "EMP001",
        "Asha Rao",
        None,
        Some(TEACHER_RFID),
        now,
    )
    .await
    .unwrap();
    let other_teacher_user =
        user::Model::create(&db, "other@example.edu", "other-pass", user::Role::Teacher, now)
            .await
            .unwrap();
    let other_teacher = faculty::Model::create(
        &db,
        Some(other_teacher_user.id),
        "EMP002",
        "Ravi Iyer",
        None,
        Some("FAC-RFID-2"),
        now,
    )
    .await
    .unwrap();

    let section = section::Model::create(&db, "CSE-A", now).await.unwrap();
    let subject = subject::Model::create(&db, "CS101", "Programming", now)
        .await
        .unwrap();
    let instance = subject_instance::Model::create(&db, subject.id, section.id, teacher.id, now)
        .await
        .unwrap();
    let device = device::Model::create(&db, DEVICE_MAC, DEVICE_SECRET, Some("Lab 1"), None, now)
        .await
        .unwrap();

    let mut students = Vec::new();
    for (name, enr, rfid) in [("Arjun", "E001", "R1"), ("Meera", "E002", "R2"), ("Zoya", "E003", "R3")] {
        students.push(
            student::Model::create(&db, name, enr, rfid, section.id, now)
                .await
                .unwrap(),
        );
    }

    let clock = FixedClock::new(now);
    let state = AppState::new(
        db,
        Arc::new(clock.clone()),
        Normalizer::from_offset_str("+05:30").unwrap(),
        DisplayZone::parse("Asia/Kolkata").unwrap(),
    );
    let router = Router::new().nest("/api", routes(state.clone()));

    TestApp {
        router,
        state,
        clock,
        data: TestData {
            admin,
            teacher_user,
            teacher,
            other_teacher_user,
            other_teacher,
            section,
            subject,
            instance,
            device,
            students,
        },
    }
}
