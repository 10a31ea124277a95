//! Faculty, sections, subjects, students and subject instances.

use crate::error::{ServiceError, ServiceResult, require};
use db::models::{
    attendance_log, faculty, section, student, subject, subject_instance, user,
};
use sea_orm::{EntityTrait, ModelTrait};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use util::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct NewFaculty {
    pub emp_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub rfid_uid: Option<String>,
    /// When set, a TEACHER account is created and linked.
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub enrollment_no: String,
    pub rfid_uid: String,
    pub section_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSubjectInstance {
    pub subject_id: i64,
    pub section_id: i64,
    pub faculty_id: i64,
}

/// A subject instance with the names needed to show it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InstanceDetail {
    pub id: i64,
    pub subject_id: i64,
    pub subject_code: String,
    pub subject_name: String,
    pub section_id: i64,
    pub section_name: String,
    pub faculty_id: i64,
    pub faculty_name: String,
}

// --- Faculty ---

pub async fn create_faculty(state: &AppState, input: NewFaculty) -> ServiceResult<faculty::Model> {
    let db = state.db();
    let now = state.clock().now();
    let emp_id = require(&input.emp_id, "emp_id")?;
    let name = require(&input.name, "name")?;

    if faculty::Model::find_by_emp_id(db, &emp_id).await?.is_some() {
        return Err(ServiceError::conflict("Faculty with this employee id already exists"));
    }
    if let Some(rfid) = input.rfid_uid.as_deref() {
        if faculty::Model::find_by_rfid(db, rfid).await?.is_some() {
            return Err(ServiceError::conflict("Faculty with this RFID UID already exists"));
        }
    }

    let user_id = match (input.email.as_deref(), input.password.as_deref()) {
        (Some(email), Some(password)) => {
            let account = crate::user::create_user(state, email, password, user::Role::Teacher).await?;
            Some(account.id)
        }
        (None, None) => None,
        _ => {
            return Err(ServiceError::bad_request(
                "email and password must be given together",
            ));
        }
    };

    let created = faculty::Model::create(
        db,
        user_id,
        &emp_id,
        &name,
        input.phone.as_deref(),
        input.rfid_uid.as_deref(),
        now,
    )
    .await?;
    tracing::info!(faculty_id = created.id, emp_id = %created.emp_id, "Faculty created");
    Ok(created)
}

pub async fn list_faculty(state: &AppState) -> ServiceResult<Vec<faculty::Model>> {
    Ok(faculty::Entity::find().all(state.db()).await?)
}

// --- Sections ---

pub async fn create_section(state: &AppState, name: &str) -> ServiceResult<section::Model> {
    let name = require(name, "name")?;
    if section::Model::find_by_name(state.db(), &name).await?.is_some() {
        return Err(ServiceError::conflict("Section already exists"));
    }
    Ok(section::Model::create(state.db(), &name, state.clock().now()).await?)
}

pub async fn list_sections(state: &AppState) -> ServiceResult<Vec<section::Model>> {
    Ok(section::Model::list(state.db()).await?)
}

pub async fn get_section(state: &AppState, id: i64) -> ServiceResult<section::Model> {
    section::Entity::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| ServiceError::not_found("Section not found"))
}

pub async fn delete_section(state: &AppState, id: i64) -> ServiceResult<()> {
    let found = get_section(state, id).await?;
    if !student::Model::list_by_section(state.db(), id).await?.is_empty() {
        return Err(ServiceError::conflict(
            "Cannot delete section: students are still enrolled",
        ));
    }
    found.delete(state.db()).await?;
    Ok(())
}

// --- Subjects ---

pub async fn create_subject(state: &AppState, code: &str, name: &str) -> ServiceResult<subject::Model> {
    let code = require(code, "code")?;
    let name = require(name, "name")?;
    if subject::Model::find_by_code(state.db(), &code).await?.is_some() {
        return Err(ServiceError::conflict("Subject with this code already exists"));
    }
    Ok(subject::Model::create(state.db(), &code, &name, state.clock().now()).await?)
}

pub async fn list_subjects(state: &AppState) -> ServiceResult<Vec<subject::Model>> {
    Ok(subject::Model::list(state.db()).await?)
}

pub async fn get_subject(state: &AppState, id: i64) -> ServiceResult<subject::Model> {
    subject::Entity::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| ServiceError::not_found("Subject not found"))
}

pub async fn delete_subject(state: &AppState, id: i64) -> ServiceResult<()> {
    let found = get_subject(state, id).await?;
    found.delete(state.db()).await?;
    Ok(())
}

// --- Students ---

pub async fn create_student(state: &AppState, input: NewStudent) -> ServiceResult<student::Model> {
    let db = state.db();
    let name = require(&input.name, "name")?;
    let enrollment_no = require(&input.enrollment_no, "enrollment_no")?;
    let rfid_uid = require(&input.rfid_uid, "rfid_uid")?;

    if student::Model::find_by_enrollment_no(db, &enrollment_no).await?.is_some() {
        return Err(ServiceError::conflict(
            "Student with this enrollment number already exists",
        ));
    }
    if student::Model::find_by_rfid(db, &rfid_uid).await?.is_some() {
        return Err(ServiceError::conflict("Student with this RFID UID already exists"));
    }
    if section::Entity::find_by_id(input.section_id).one(db).await?.is_none() {
        return Err(ServiceError::bad_request("Invalid section_id"));
    }

    let created = student::Model::create(
        db,
        &name,
        &enrollment_no,
        &rfid_uid,
        input.section_id,
        state.clock().now(),
    )
    .await?;
    tracing::info!(student_id = created.id, section_id = created.section_id, "Student created");
    Ok(created)
}

pub async fn list_students(
    state: &AppState,
    section_id: Option<i64>,
) -> ServiceResult<Vec<student::Model>> {
    Ok(match section_id {
        Some(id) => student::Model::list_by_section(state.db(), id).await?,
        None => student::Model::list(state.db()).await?,
    })
}

pub async fn get_student(state: &AppState, id: i64) -> ServiceResult<student::Model> {
    student::Entity::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| ServiceError::not_found("Student not found"))
}

/// Refuses while attendance logs reference the student; those are only
/// removed by explicit cleanup.
pub async fn delete_student(state: &AppState, id: i64) -> ServiceResult<()> {
    let found = get_student(state, id).await?;
    if attendance_log::Model::exists_for_student(state.db(), id).await? {
        return Err(ServiceError::conflict(
            "Cannot delete student: attendance records are linked",
        ));
    }
    found.delete(state.db()).await?;
    Ok(())
}

// --- Subject instances ---

pub async fn create_subject_instance(
    state: &AppState,
    input: NewSubjectInstance,
) -> ServiceResult<InstanceDetail> {
    let db = state.db();
    let subject = subject::Entity::find_by_id(input.subject_id).one(db).await?;
    let section = section::Entity::find_by_id(input.section_id).one(db).await?;
    let teacher = faculty::Entity::find_by_id(input.faculty_id).one(db).await?;
    let (Some(_), Some(_), Some(_)) = (subject, section, teacher) else {
        return Err(ServiceError::bad_request(
            "Invalid subject_id, section_id or faculty_id",
        ));
    };

    let already = subject_instance::Model::list_for_faculty(db, input.faculty_id)
        .await?
        .into_iter()
        .any(|i| i.subject_id == input.subject_id && i.section_id == input.section_id);
    if already {
        return Err(ServiceError::conflict(
            "This subject is already assigned to this section by this faculty member",
        ));
    }

    let created = subject_instance::Model::create(
        db,
        input.subject_id,
        input.section_id,
        input.faculty_id,
        state.clock().now(),
    )
    .await?;
    get_subject_instance(state, created.id).await
}

pub async fn list_subject_instances(state: &AppState) -> ServiceResult<Vec<InstanceDetail>> {
    let instances = subject_instance::Model::list(state.db()).await?;
    describe_instances(state, instances).await
}

pub async fn get_subject_instance(state: &AppState, id: i64) -> ServiceResult<InstanceDetail> {
    let instance = subject_instance::Entity::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| ServiceError::not_found("Subject instance not found"))?;
    describe_instances(state, vec![instance])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found("Subject instance not found"))
}

/// Deletes the instance together with its sessions and their logs.
pub async fn delete_subject_instance(state: &AppState, id: i64) -> ServiceResult<()> {
    let instance = subject_instance::Entity::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| ServiceError::not_found("Subject instance not found"))?;
    instance.delete(state.db()).await?;
    tracing::info!(subject_instance_id = id, "Subject instance deleted with its sessions");
    Ok(())
}

/// Subject instances taught by one faculty member.
pub async fn teacher_instances(state: &AppState, faculty_id: i64) -> ServiceResult<Vec<InstanceDetail>> {
    let instances = subject_instance::Model::list_for_faculty(state.db(), faculty_id).await?;
    describe_instances(state, instances).await
}

pub(crate) async fn describe_instances(
    state: &AppState,
    instances: Vec<subject_instance::Model>,
) -> ServiceResult<Vec<InstanceDetail>> {
    let db = state.db();
    let subjects: HashMap<i64, subject::Model> = subject::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();
    let sections: HashMap<i64, section::Model> = section::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();
    let teachers: HashMap<i64, faculty::Model> = faculty::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect();

    Ok(instances
        .into_iter()
        .map(|i| {
            let subject = subjects.get(&i.subject_id);
            InstanceDetail {
                id: i.id,
                subject_id: i.subject_id,
                subject_code: subject.map(|s| s.code.clone()).unwrap_or_default(),
                subject_name: subject.map(|s| s.name.clone()).unwrap_or_default(),
                section_id: i.section_id,
                section_name: sections
                    .get(&i.section_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_default(),
                faculty_id: i.faculty_id,
                faculty_name: teachers
                    .get(&i.faculty_id)
                    .map(|f| f.name.clone())
                    .unwrap_or_default(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture;

    #[tokio::test]
    async fn student_uniqueness_and_section_check() {
        let fx = fixture().await;
        let dup_rfid = NewStudent {
            name: "Other".into(),
            enrollment_no: "E999".into(),
            rfid_uid: "R1".into(),
            section_id: fx.section.id,
        };
        let bad_section = NewStudent {
            name: "Other".into(),
            enrollment_no: "E999".into(),
            rfid_uid: "R999".into(),
            section_id: 4242,
        };

        assert!(matches!(
            create_student(&fx.state, dup_rfid).await,
            Err(ServiceError::Conflict(_))
        ));
        assert!(matches!(
            create_student(&fx.state, bad_section).await,
            Err(ServiceError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn student_with_attendance_cannot_be_deleted() {
        let fx = fixture().await;
        let session = crate::session::start_session(&fx.state, fx.teacher.id, fx.instance.id)
            .await
            .unwrap();
        crate::attendance::process_scan(
            &fx.state,
            crate::attendance::ScanRequest {
                rfid_uid: "R1".into(),
                device_mac: crate::test_support::DEVICE_MAC.into(),
                session_id: session.id,
                reading: None,
            },
        )
        .await
        .unwrap();

        let arjun = fx.students[0].id;
        assert!(matches!(
            delete_student(&fx.state, arjun).await,
            Err(ServiceError::Conflict(_))
        ));
        delete_student(&fx.state, fx.students[1].id).await.unwrap();
        assert!(matches!(
            get_student(&fx.state, fx.students[1].id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn instance_details_and_duplicates() {
        let fx = fixture().await;

        let mine = teacher_instances(&fx.state, fx.teacher.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].subject_code, "CS101");
        assert_eq!(mine[0].section_name, "CSE-A");
        assert_eq!(mine[0].faculty_name, "Asha Rao");

        let again = create_subject_instance(
            &fx.state,
            NewSubjectInstance {
                subject_id: fx.subject.id,
                section_id: fx.section.id,
                faculty_id: fx.teacher.id,
            },
        )
        .await;
        assert!(matches!(again, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn faculty_with_account_can_log_in() {
        let fx = fixture().await;
        let created = create_faculty(
            &fx.state,
            NewFaculty {
                emp_id: "EMP002".into(),
                name: "Vikram".into(),
                phone: None,
                rfid_uid: Some("FAC-RFID-2".into()),
                email: Some("vikram@example.edu".into()),
                password: Some("pw".into()),
            },
        )
        .await
        .unwrap();

        let summary = crate::user::login(&fx.state, "vikram@example.edu", "pw")
            .await
            .unwrap();
        assert_eq!(summary.faculty_id, Some(created.id));
        assert_eq!(summary.role, user::Role::Teacher);
    }

    #[tokio::test]
    async fn section_with_students_is_kept() {
        let fx = fixture().await;
        assert!(matches!(
            delete_section(&fx.state, fx.section.id).await,
            Err(ServiceError::Conflict(_))
        ));
        let empty = create_section(&fx.state, "CSE-B").await.unwrap();
        delete_section(&fx.state, empty.id).await.unwrap();
    }
}
