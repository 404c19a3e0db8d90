use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub phone_number: String,
    pub varsity_id: Option<String>,
    pub session: Option<String>,
    pub gender: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::exam_registration::Entity")]
    ExamRegistration,
}

impl Related<super::exam_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamRegistration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
