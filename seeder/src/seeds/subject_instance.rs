use super::{DEMO_SECTION, DEMO_SUBJECT_CODE, DEMO_TEACHER_EMP_ID};
use crate::seed::{Outcome, Seeder};
use chrono::Utc;
use db::models::{faculty, section, subject, subject_instance};
use sea_orm::{DatabaseConnection, DbErr};

pub struct SubjectInstanceSeeder;

#[async_trait::async_trait]
impl Seeder for SubjectInstanceSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<Outcome, DbErr> {
        let (Some(teacher), Some(sec), Some(subj)) = (
            faculty::Model::find_by_emp_id(db, DEMO_TEACHER_EMP_ID).await?,
            section::Model::find_by_name(db, DEMO_SECTION).await?,
            subject::Model::find_by_code(db, DEMO_SUBJECT_CODE).await?,
        ) else {
            return Err(DbErr::RecordNotFound(
                "demo teacher, section and subject must be seeded first".into(),
            ));
        };

        let existing = subject_instance::Model::list_for_faculty(db, teacher.id).await?;
        if existing
            .iter()
            .any(|i| i.subject_id == subj.id && i.section_id == sec.id)
        {
            return Ok(Outcome::Skipped);
        }

        subject_instance::Model::create(db, subj.id, sec.id, teacher.id, Utc::now()).await?;
        Ok(Outcome::Created(1))
    }
}
