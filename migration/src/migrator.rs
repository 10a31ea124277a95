use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202509200001_create_users::Migration),
            Box::new(migrations::m202509200002_create_faculty::Migration),
            Box::new(migrations::m202509200003_create_sections::Migration),
            Box::new(migrations::m202509200004_create_subjects::Migration),
            Box::new(migrations::m202509200005_create_students::Migration),
            Box::new(migrations::m202509200006_create_subject_instances::Migration),
            Box::new(migrations::m202509200007_create_devices::Migration),
            Box::new(migrations::m202509200008_create_class_sessions::Migration),
            Box::new(migrations::m202509200009_create_attendance_logs::Migration),
        ]
    }
}
