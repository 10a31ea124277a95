use super::DEMO_SUBJECT_CODE;
use crate::seed::{Outcome, Seeder};
use chrono::Utc;
use db::models::subject::Model;
use sea_orm::{DatabaseConnection, DbErr};

pub struct SubjectSeeder;

#[async_trait::async_trait]
impl Seeder for SubjectSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<Outcome, DbErr> {
        if Model::find_by_code(db, DEMO_SUBJECT_CODE).await?.is_some() {
            return Ok(Outcome::Skipped);
        }
        Model::create(db, DEMO_SUBJECT_CODE, "Programming Fundamentals", Utc::now()).await?;
        Ok(Outcome::Created(1))
    }
}
