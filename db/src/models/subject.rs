use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        code: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            code: Set(code.trim().to_uppercase()),
            name: Set(name.trim().to_owned()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_code(db: &DbConn, code: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Code.eq(code.trim().to_uppercase()))
            .one(db)
            .await
    }

    pub async fn list(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Code).all(db).await
    }
}
