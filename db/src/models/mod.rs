pub mod attendance_log;
pub mod class_session;
pub mod device;
pub mod faculty;
pub mod section;
pub mod student;
pub mod subject;
pub mod subject_instance;
pub mod user;

pub use attendance_log::Entity as AttendanceLog;
pub use class_session::Entity as ClassSession;
pub use device::Entity as Device;
pub use faculty::Entity as Faculty;
pub use section::Entity as Section;
pub use student::Entity as Student;
pub use subject::Entity as Subject;
pub use subject_instance::Entity as SubjectInstance;
pub use user::Entity as User;
