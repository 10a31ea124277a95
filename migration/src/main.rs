use colored::*;
use std::{env, fs, path::Path, process};

mod runner;

const USAGE: &str = "\
Usage: migration [COMMAND]

Commands:
  (none)   Create the attendance schema in DATABASE_PATH if it is missing
  fresh    Delete the attendance database and rebuild the schema
  clean    Delete the attendance database file
  help     Show this message";

enum Command {
    Up,
    Fresh,
    Clean,
    Help,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg {
            None | Some("up") => Some(Self::Up),
            Some("fresh") => Some(Self::Fresh),
            Some("clean") => Some(Self::Clean),
            Some("help" | "-h" | "--help") => Some(Self::Help),
            Some(_) => None,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let arg = env::args().nth(1);
    let Some(command) = Command::parse(arg.as_deref()) else {
        eprintln!("{} {}\n\n{USAGE}", "Unknown command:".red(), arg.unwrap_or_default());
        process::exit(2);
    };
    if let Command::Help = command {
        println!("{USAGE}");
        return;
    }

    let db_path = env::var("DATABASE_PATH").expect("DATABASE_PATH must be set");
    // A full DSN is used as given; a bare path gets a read-write-create SQLite URL.
    let (url, file) = match db_path.strip_prefix("sqlite:") {
        Some(_) => (db_path.clone(), None),
        None => (format!("sqlite://{db_path}?mode=rwc"), Some(db_path.as_str())),
    };

    match command {
        Command::Clean => {
            if let Some(file) = file {
                remove_db_file(file);
            }
        }
        Command::Fresh => {
            if let Some(file) = file {
                remove_db_file(file);
                create_db_dir(file);
            }
            runner::run_all_migrations(&url).await;
        }
        Command::Up => {
            if let Some(file) = file {
                create_db_dir(file);
            }
            runner::run_all_migrations(&url).await;
        }
        Command::Help => {}
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if !db_path.exists() {
        println!("No attendance database at {}", db_path.display());
        return;
    }
    if let Err(e) = fs::remove_file(db_path) {
        eprintln!("{} {}: {e}", "Could not delete".red(), db_path.display());
        process::exit(1);
    }
    println!("Deleted attendance database {}", db_path.display());
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("{} {}: {e}", "Could not create".red(), parent.display());
            process::exit(1);
        }
    }
}
