//! Coordinator-managed reference data: faculty, sections, subjects,
//! students and subject instances.

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod faculty;
pub mod sections;
pub mod students;
pub mod subject_instances;
pub mod subjects;

/// Builds the catalog routes. Merged at the `/api` root behind the
/// coordinator guard.
///
/// - `POST/GET /faculty`
/// - `POST/GET /sections`, `GET/DELETE /sections/{id}`
/// - `POST/GET /subjects`, `GET/DELETE /subjects/{id}`
/// - `POST/GET /students` (`?section_id=`), `GET/DELETE /students/{id}`
/// - `POST/GET /subject-instances`, `GET/DELETE /subject-instances/{id}`
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/faculty",
            post(faculty::create_faculty).get(faculty::list_faculty),
        )
        .route(
            "/sections",
            post(sections::create_section).get(sections::list_sections),
        )
        .route(
            "/sections/{id}",
            get(sections::get_section).delete(sections::delete_section),
        )
        .route(
            "/subjects",
            post(subjects::create_subject).get(subjects::list_subjects),
        )
        .route(
            "/subjects/{id}",
            get(subjects::get_subject).delete(subjects::delete_subject),
        )
        .route(
            "/students",
            post(students::create_student).get(students::list_students),
        )
        .route(
            "/students/{id}",
            get(students::get_student).delete(students::delete_student),
        )
        .route(
            "/subject-instances",
            post(subject_instances::create_subject_instance)
                .get(subject_instances::list_subject_instances),
        )
        .route(
            "/subject-instances/{id}",
            get(subject_instances::get_subject_instance)
                .delete(subject_instances::delete_subject_instance),
        )
}
