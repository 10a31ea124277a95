use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::QueryFilter;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A teaching staff member. The RFID card identifies them at a reader.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "faculty")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Option<i64>,
    #[sea_orm(unique)]
    pub emp_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub rfid_uid: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        user_id: Option<i64>,
        emp_id: &str,
        name: &str,
        phone: Option<&str>,
        rfid_uid: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let active_model = ActiveModel {
            user_id: Set(user_id),
            emp_id: Set(emp_id.to_owned()),
            name: Set(name.to_owned()),
            phone: Set(phone.map(str::to_owned)),
            rfid_uid: Set(rfid_uid.map(str::to_owned)),
            created_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_user_id(db: &DbConn, user_id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub async fn find_by_rfid(db: &DbConn, rfid_uid: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::RfidUid.eq(rfid_uid))
            .one(db)
            .await
    }

    pub async fn find_by_emp_id(db: &DbConn, emp_id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::EmpId.eq(emp_id))
            .one(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{self, Role};
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn lookups_by_user_rfid_and_emp_id() {
        let db = setup_test_db().await;
        let now = Utc::now();
        let account = user::Model::create(&db, "t@example.edu", "pw", Role::Teacher, now)
            .await
            .unwrap();

        let created = Model::create(
            &db,
            Some(account.id),
            "EMP001",
            "Asha Rao",
            None,
            Some("FAC-RFID-1"),
            now,
        )
        .await
        .unwrap();

        let by_user = Model::find_by_user_id(&db, account.id).await.unwrap();
        let by_rfid = Model::find_by_rfid(&db, "FAC-RFID-1").await.unwrap();
        let by_emp = Model::find_by_emp_id(&db, "EMP001").await.unwrap();

        assert_eq!(by_user.map(|f| f.id), Some(created.id));
        assert_eq!(by_rfid.map(|f| f.id), Some(created.id));
        assert_eq!(by_emp.map(|f| f.name), Some("Asha Rao".to_string()));
        assert!(Model::find_by_rfid(&db, "nope").await.unwrap().is_none());
    }
}
