use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryFilter, QueryOrder};
use serde::Serialize;

/// One sitting of a subject instance. `start_at` and `end_at` are absolute
/// instants taken from the application clock.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "class_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_instance_id: i64,
    pub teacher_id: i64,
    pub device_id: Option<i64>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub is_closed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject_instance::Entity",
        from = "Column::SubjectInstanceId",
        to = "super::subject_instance::Column::Id"
    )]
    SubjectInstance,
    #[sea_orm(
        belongs_to = "super::faculty::Entity",
        from = "Column::TeacherId",
        to = "super::faculty::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::device::Entity",
        from = "Column::DeviceId",
        to = "super::device::Column::Id"
    )]
    Device,
    #[sea_orm(has_many = "super::attendance_log::Entity")]
    Logs,
}

impl Related<super::subject_instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectInstance.def()
    }
}

impl Related<super::attendance_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Logs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        subject_instance_id: i64,
        teacher_id: i64,
        device_id: Option<i64>,
        start_at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            subject_instance_id: Set(subject_instance_id),
            teacher_id: Set(teacher_id),
            device_id: Set(device_id),
            start_at: Set(start_at),
            end_at: Set(None),
            is_closed: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_open_for_instance(
        db: &DbConn,
        subject_instance_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::SubjectInstanceId.eq(subject_instance_id))
            .filter(Column::IsClosed.eq(false))
            .one(db)
            .await
    }

    /// Open sessions of a teacher, most recently started first.
    pub async fn list_open_for_teacher(db: &DbConn, teacher_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::IsClosed.eq(false))
            .order_by_desc(Column::StartAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn list_open(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::IsClosed.eq(false))
            .order_by_desc(Column::StartAt)
            .all(db)
            .await
    }

    /// Closed sessions of the given instances that started in `[from, to)`.
    pub async fn list_closed_between(
        db: &DbConn,
        subject_instance_ids: Vec<i64>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SubjectInstanceId.is_in(subject_instance_ids))
            .filter(Column::IsClosed.eq(true))
            .filter(Column::StartAt.gte(from))
            .filter(Column::StartAt.lt(to))
            .order_by_asc(Column::StartAt)
            .all(db)
            .await
    }

    pub async fn close(db: &DbConn, id: i64, end_at: DateTime<Utc>) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Session {} not found", id)))?;

        let mut active_model: ActiveModel = model.into();
        active_model.is_closed = Set(true);
        active_model.end_at = Set(Some(end_at));
        active_model.update(db).await
    }

    pub async fn set_device(db: &DbConn, id: i64, device_id: i64) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Session {} not found", id)))?;

        let mut active_model: ActiveModel = model.into();
        active_model.device_id = Set(Some(device_id));
        active_model.update(db).await
    }

    /// Links a device to every open session of a teacher. Returns the number updated.
    pub async fn link_device_to_teacher_sessions(
        db: &DbConn,
        teacher_id: i64,
        device_id: i64,
    ) -> Result<u64, DbErr> {
        let result = Entity::update_many()
            .col_expr(Column::DeviceId, Expr::value(device_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::IsClosed.eq(false))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Closes every open session at `end_at`. Returns the number closed.
    pub async fn close_all_open(db: &DbConn, end_at: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = Entity::update_many()
            .col_expr(Column::IsClosed, Expr::value(true))
            .col_expr(Column::EndAt, Expr::value(end_at))
            .filter(Column::IsClosed.eq(false))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
