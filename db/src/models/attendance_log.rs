use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{
    DeriveActiveEnum, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One recorded scan. `scanned_at` is the normalized UTC instant and is
/// never rewritten after insert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub session_id: i64,
    pub student_id: i64,
    pub scanned_at: DateTime<Utc>,
    pub status: AttendanceStatus,
    pub device_mac_address: Option<String>,
    pub device_id: Option<i64>,
}

/// A log as read for display, with `scanned_at` left as the stored text.
///
/// Viewers parse the value themselves so one unreadable row cannot fail a
/// whole listing.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct StoredScan {
    pub id: i64,
    pub student_id: i64,
    pub status: String,
    pub scanned_at: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "PRESENT")]
    Present,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_session::Entity",
        from = "Column::SessionId",
        to = "super::class_session::Column::Id"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::class_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        session_id: i64,
        student_id: i64,
        scanned_at: DateTime<Utc>,
        device_mac_address: Option<&str>,
        device_id: Option<i64>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            session_id: Set(session_id),
            student_id: Set(student_id),
            scanned_at: Set(scanned_at),
            status: Set(AttendanceStatus::Present),
            device_mac_address: Set(device_mac_address.map(str::to_owned)),
            device_id: Set(device_id),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_for_student(
        db: &DbConn,
        session_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.eq(AttendanceStatus::Present))
            .one(db)
            .await
    }

    /// Logs of a session in scan order.
    pub async fn list_for_session(db: &DbConn, session_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .order_by_asc(Column::ScannedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Raw-text view of [`list_for_session`](Self::list_for_session).
    pub async fn list_stored_for_session(
        db: &DbConn,
        session_id: i64,
    ) -> Result<Vec<StoredScan>, DbErr> {
        Entity::find()
            .select_only()
            .columns([Column::Id, Column::StudentId, Column::Status, Column::ScannedAt])
            .filter(Column::SessionId.eq(session_id))
            .order_by_asc(Column::ScannedAt)
            .order_by_asc(Column::Id)
            .into_model::<StoredScan>()
            .all(db)
            .await
    }

    /// Student id of every log in the given sessions, one entry per log.
    pub async fn student_ids_for_sessions(
        db: &DbConn,
        session_ids: Vec<i64>,
    ) -> Result<Vec<i64>, DbErr> {
        Entity::find()
            .select_only()
            .column(Column::StudentId)
            .filter(Column::SessionId.is_in(session_ids))
            .into_tuple::<i64>()
            .all(db)
            .await
    }

    pub async fn exists_for_student(db: &DbConn, student_id: i64) -> Result<bool, DbErr> {
        Ok(Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .count(db)
            .await?
            > 0)
    }

    pub async fn delete_for_session(db: &DbConn, session_id: i64) -> Result<u64, DbErr> {
        let result = Entity::delete_many()
            .filter(Column::SessionId.eq(session_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
