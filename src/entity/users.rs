//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub image_alt: Option<String>,
    pub suspended: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::capability_grants::Entity")]
    CapabilityGrants,
    #[sea_orm(has_many = "super::group_members::Entity")]
    GroupMembers,
}

impl Related<super::capability_grants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CapabilityGrants.def()
    }
}

impl Related<super::group_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::User;

        User {
            id: self.id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            image_alt: self.image_alt,
            suspended: self.suspended,
        }
    }

    pub fn into_guest_identity(self) -> crate::models::users::entities::GuestIdentity {
        use crate::models::users::entities::GuestIdentity;

        GuestIdentity {
            id: self.id,
            email: self.email,
            image_alt: self.image_alt.unwrap_or_default(),
        }
    }
}
