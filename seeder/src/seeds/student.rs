use super::DEMO_SECTION;
use crate::seed::{Outcome, Seeder};
use chrono::Utc;
use db::models::{section, student};
use fake::{Fake, faker::name::en::Name};
use sea_orm::{DatabaseConnection, DbErr};

const DEMO_STUDENTS: usize = 20;

pub struct StudentSeeder;

/// Eight upper-case hex digits, the shape of a Mifare UID.
fn random_rfid() -> String {
    format!("{:08X}", fastrand::u32(..))
}

#[async_trait::async_trait]
impl Seeder for StudentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<Outcome, DbErr> {
        let Some(sec) = section::Model::find_by_name(db, DEMO_SECTION).await? else {
            return Err(DbErr::RecordNotFound("demo section must be seeded first".into()));
        };
        if !student::Model::list_by_section(db, sec.id).await?.is_empty() {
            return Ok(Outcome::Skipped);
        }

        let now = Utc::now();
        let mut created = 0;
        for i in 1..=DEMO_STUDENTS {
            let name: String = Name().fake();
            let enrollment_no = format!("DEMO{i:03}");
            if student::Model::find_by_enrollment_no(db, &enrollment_no).await?.is_some() {
                continue;
            }

            let mut rfid = random_rfid();
            while student::Model::find_by_rfid(db, &rfid).await?.is_some() {
                rfid = random_rfid();
            }

            student::Model::create(db, &name, &enrollment_no, &rfid, sec.id, now).await?;
            created += 1;
        }

        Ok(Outcome::Created(created))
    }
}
