use async_trait::async_trait;
use colored::*;
use sea_orm::{DatabaseConnection, DbErr};
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

/// What a seeder did. Seeders never overwrite existing rows.
pub enum Outcome {
    Created(usize),
    Skipped,
}

#[async_trait]
pub trait Seeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<Outcome, DbErr>;
}

pub async fn run_seeder<S: Seeder + ?Sized>(
    seeder: &S,
    name: &str,
    db: &DatabaseConnection,
) -> Result<(), DbErr> {
    let base_msg = format!("Seeding {}", name.bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(base_msg.len()));
    print!("{}{} ", base_msg, dots);
    io::stdout().flush().ok();

    let start = Instant::now();
    let result = seeder.seed(db).await;
    let time_str = format!("({:.2?})", start.elapsed()).dimmed();

    match result {
        Ok(Outcome::Created(n)) => {
            println!("{} {} {}", "done".green(), format!("+{n}").cyan(), time_str);
            Ok(())
        }
        Ok(Outcome::Skipped) => {
            println!("{} {}", "exists".yellow(), time_str);
            Ok(())
        }
        Err(e) => {
            println!("{}", "failed".red());
            Err(e)
        }
    }
}
