use super::DEMO_TEACHER_EMP_ID;
use crate::seed::{Outcome, Seeder};
use chrono::Utc;
use db::models::{faculty, user};
use sea_orm::{DatabaseConnection, DbErr};

pub const TEACHER_EMAIL: &str = "teacher@example.edu";
/// Card the demo teacher taps on a reader.
pub const TEACHER_RFID: &str = "FAC0001";

pub struct TeacherSeeder;

#[async_trait::async_trait]
impl Seeder for TeacherSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<Outcome, DbErr> {
        if faculty::Model::find_by_emp_id(db, DEMO_TEACHER_EMP_ID).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        let now = Utc::now();
        let account = match user::Model::find_by_email(db, TEACHER_EMAIL).await? {
            Some(existing) => existing,
            None => user::Model::create(db, TEACHER_EMAIL, "teacher123", user::Role::Teacher, now).await?,
        };

        faculty::Model::create(
            db,
            Some(account.id),
            DEMO_TEACHER_EMP_ID,
            "Demo Teacher",
            None,
            Some(TEACHER_RFID),
            now,
        )
        .await?;
        Ok(Outcome::Created(1))
    }
}
