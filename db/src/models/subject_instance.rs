use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};
use serde::Serialize;

/// A subject taught to one section by one faculty member.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "subject_instances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub section_id: i64,
    pub faculty_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,
    #[sea_orm(
        belongs_to = "super::faculty::Entity",
        from = "Column::FacultyId",
        to = "super::faculty::Column::Id"
    )]
    Faculty,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::faculty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faculty.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        subject_id: i64,
        section_id: i64,
        faculty_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            subject_id: Set(subject_id),
            section_id: Set(section_id),
            faculty_id: Set(faculty_id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn list_for_faculty(db: &DbConn, faculty_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::FacultyId.eq(faculty_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn list_for_section(db: &DbConn, section_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SectionId.eq(section_id))
            .all(db)
            .await
    }

    pub async fn list(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Id).all(db).await
    }
}
