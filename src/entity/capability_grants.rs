//! 权限授予实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "capability_grants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub capability: String,
    pub context_level: String,
    pub instance_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，无法识别的上下文层级返回 None
    pub fn into_grant(self) -> Option<crate::models::users::entities::CapabilityGrant> {
        use crate::models::users::entities::{CapabilityGrant, CapabilityScope, ContextLevel};

        let level = self.context_level.parse::<ContextLevel>().ok()?;
        Some(CapabilityGrant {
            capability: self.capability,
            scope: CapabilityScope {
                level,
                instance_id: self.instance_id,
            },
        })
    }
}
