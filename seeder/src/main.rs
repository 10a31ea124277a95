use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    coordinator::CoordinatorSeeder, device::DeviceSeeder, section::SectionSeeder,
    student::StudentSeeder, subject::SubjectSeeder, subject_instance::SubjectInstanceSeeder,
    teacher::TeacherSeeder,
};
use colored::*;
use migration::Migrator;
use sea_orm_migration::MigratorTrait;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {}", "Failed to connect to database:".red(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {}", "Failed to apply migrations:".red(), e);
        std::process::exit(1);
    }

    for (seeder, name) in [
        (Box::new(CoordinatorSeeder) as Box<dyn Seeder + Send + Sync>, "Coordinator"),
        (Box::new(SectionSeeder), "Section"),
        (Box::new(SubjectSeeder), "Subject"),
        (Box::new(TeacherSeeder), "Teacher"),
        (Box::new(SubjectInstanceSeeder), "SubjectInstance"),
        (Box::new(DeviceSeeder), "Device"),
        (Box::new(StudentSeeder), "Student"),
    ] {
        if let Err(e) = run_seeder(&*seeder, name, &db).await {
            eprintln!("{} {}", "Seeding aborted:".red(), e);
            std::process::exit(1);
        }
    }
}
