use crate::seed::{Outcome, Seeder};
use chrono::Utc;
use db::models::device::Model;
use sea_orm::{DatabaseConnection, DbErr};

pub const DEMO_DEVICE_MAC: &str = "AA:BB:CC:DD:EE:01";

pub struct DeviceSeeder;

#[async_trait::async_trait]
impl Seeder for DeviceSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<Outcome, DbErr> {
        if Model::find_by_mac(db, DEMO_DEVICE_MAC).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        let secret =
            std::env::var("SEED_DEVICE_SECRET").unwrap_or_else(|_| "demo-device-secret".into());
        Model::create(
            db,
            DEMO_DEVICE_MAC,
            &secret,
            Some("Demo reader"),
            Some("Lab 1"),
            Utc::now(),
        )
        .await?;
        Ok(Outcome::Created(1))
    }
}
