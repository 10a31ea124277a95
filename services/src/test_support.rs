use chrono::{DateTime, TimeZone, Utc};
use db::models::{device, faculty, section, student, subject, subject_instance, user};
use db::test_utils::setup_test_db;
use std::sync::Arc;
use util::state::AppState;
use util::time::{DisplayZone, FixedClock, Normalizer};

pub const DEVICE_MAC: &str = "AA:BB:CC:DD:EE:01";
pub const DEVICE_SECRET: &str = "device-secret";
pub const TEACHER_RFID: &str = "FAC-RFID-1";

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 24, 4, 0, 0).unwrap()
}

pub struct Fixture {
    pub state: AppState,
    pub clock: FixedClock,
    pub teacher: faculty::Model,
    pub section: section::Model,
    pub subject: subject::Model,
    pub instance: subject_instance::Model,
    pub device: device::Model,
    /// Arjun (R1), Meera (R2), Zoya (R3), all in `section`.
    pub students: Vec<student::Model>,
}

/// In-memory database with one teacher, one section of three students,
/// one subject instance and one registered device. Clock at [`t0`].
pub async fn fixture() -> Fixture {
    let db = setup_test_db().await;
    let clock = FixedClock::new(t0());
    let now = t0();

    let account = user::Model::create(&db, "teacher@example.edu", "pw", user::Role::Teacher, now)
        .await
        .unwrap();
    let teacher = faculty::Model::create(
        &db,
        Some(account.id),
        "EMP001",
        "Asha Rao",
        None,
        Some(TEACHER_RFID),
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

    let state = AppState::new(
        db,
        Arc::new(clock.clone()),
        Normalizer::from_offset_str("+05:30").unwrap(),
        DisplayZone::parse("Asia/Kolkata").unwrap(),
    );

    Fixture {
        state,
        clock,
        teacher,
        section,
        subject,
        instance,
        device,
        students,
    }
}
