use crate::seed::{Outcome, Seeder};
use chrono::Utc;
use db::models::{faculty, user};
use sea_orm::{DatabaseConnection, DbErr};

pub const COORDINATOR_EMAIL: &str = "pcoord@example.edu";
pub const COORDINATOR_EMP_ID: &str = "PCOORD001";

pub struct CoordinatorSeeder;

#[async_trait::async_trait]
impl Seeder for CoordinatorSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<Outcome, DbErr> {
        if user::Model::find_by_email(db, COORDINATOR_EMAIL).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        let password =
            std::env::var("SEED_PCOORD_PASSWORD").unwrap_or_else(|_| "pcoord123".into());
        let now = Utc::now();
        let account =
            user::Model::create(db, COORDINATOR_EMAIL, &password, user::Role::Pcoord, now).await?;

        if faculty::Model::find_by_emp_id(db, COORDINATOR_EMP_ID).await?.is_none() {
            faculty::Model::create(
                db,
                Some(account.id),
                COORDINATOR_EMP_ID,
                "Programme Coordinator",
                None,
                None,
                now,
            )
            .await?;
        }

        Ok(Outcome::Created(1))
    }
}
