pub mod m202509200001_create_users;
pub mod m202509200002_create_faculty;
pub mod m202509200003_create_sections;
pub mod m202509200004_create_subjects;
pub mod m202509200005_create_students;
pub mod m202509200006_create_subject_instances;
pub mod m202509200007_create_devices;
pub mod m202509200008_create_class_sessions;
pub mod m202509200009_create_attendance_logs;
