use super::DEMO_SECTION;
use crate::seed::{Outcome, Seeder};
use chrono::Utc;
use db::models::section::Model;
use sea_orm::{DatabaseConnection, DbErr};

pub struct SectionSeeder;

#[async_trait::async_trait]
impl Seeder for SectionSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<Outcome, DbErr> {
        if Model::find_by_name(db, DEMO_SECTION).await?.is_some() {
            return Ok(Outcome::Skipped);
        }
        Model::create(db, DEMO_SECTION, Utc::now()).await?;
        Ok(Outcome::Created(1))
    }
}
