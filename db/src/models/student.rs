use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub enrollment_no: String,
    #[sea_orm(unique)]
    pub rfid_uid: String,
    pub section_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        name: &str,
        enrollment_no: &str,
        rfid_uid: &str,
        section_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            name: Set(name.trim().to_owned()),
            enrollment_no: Set(enrollment_no.trim().to_owned()),
            rfid_uid: Set(rfid_uid.trim().to_owned()),
            section_id: Set(section_id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_rfid(db: &DbConn, rfid_uid: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::RfidUid.eq(rfid_uid.trim()))
            .one(db)
            .await
    }

    pub async fn find_by_enrollment_no(
        db: &DbConn,
        enrollment_no: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::EnrollmentNo.eq(enrollment_no.trim()))
            .one(db)
            .await
    }

    /// Students of a section, alphabetical.
    pub async fn list_by_section(db: &DbConn, section_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SectionId.eq(section_id))
            .order_by_asc(Column::Name)
            .all(db)
            .await
    }

    pub async fn list(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Name).all(db).await
    }
}
