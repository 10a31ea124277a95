use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};
use serde::Serialize;

use crate::password;

/// An RFID reader, identified by its MAC address.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub mac_addr: String,
    #[serde(skip_serializing)]
    pub secret: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub last_boot_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// MAC addresses are compared in upper case with `:` separators.
pub fn canonical_mac(mac: &str) -> String {
    mac.trim().replace('-', ":").to_uppercase()
}

impl Model {
    pub async fn create(
        db: &DbConn,
        mac_addr: &str,
        secret: &str,
        name: Option<&str>,
        location: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            mac_addr: Set(canonical_mac(mac_addr)),
            secret: Set(password::hash(secret)?),
            name: Set(name.map(str::to_owned)),
            location: Set(location.map(str::to_owned)),
            last_boot_at: Set(None),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_mac(db: &DbConn, mac_addr: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::MacAddr.eq(canonical_mac(mac_addr)))
            .one(db)
            .await
    }

    /// Newest first.
    pub async fn list(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub fn verify_secret(&self, secret: &str) -> bool {
        password::verify(secret, &self.secret)
    }

    pub async fn record_boot(db: &DbConn, id: i64, at: DateTime<Utc>) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Device {} not found", id)))?;

        let mut active_model: ActiveModel = model.into();
        active_model.last_boot_at = Set(Some(at));
        active_model.update(db).await
    }
}
