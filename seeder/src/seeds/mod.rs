pub mod coordinator;
pub mod device;
pub mod section;
pub mod student;
pub mod subject;
pub mod subject_instance;
pub mod teacher;

/// Demo data shared between seeders.
pub const DEMO_SECTION: &str = "CSE-A";
pub const DEMO_SUBJECT_CODE: &str = "CS101";
pub const DEMO_TEACHER_EMP_ID: &str = "EMP001";
