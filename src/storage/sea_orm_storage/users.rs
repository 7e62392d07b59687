//! 用户与权限存储操作

use super::SeaOrmStorage;
use crate::entity::capability_grants::Column as GrantColumn;
use crate::entity::prelude::{CapabilityGrants, UserActiveModel, Users};
use crate::entity::users::Column;
use crate::errors::{AdminCommentError, Result};
use crate::models::users::entities::{CapabilityGrant, GuestIdentity, User};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::warn;

impl SeaOrmStorage {
    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AdminCommentError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 获取系统访客用户
    pub async fn get_guest_user_impl(&self) -> Result<Option<GuestIdentity>> {
        let result = Users::find()
            .filter(Column::Username.eq(User::GUEST_USERNAME))
            .one(&self.db)
            .await
            .map_err(|e| AdminCommentError::database_operation(format!("查询访客用户失败: {e}")))?;

        Ok(result.map(|m| m.into_guest_identity()))
    }

    /// 创建系统访客用户
    pub async fn create_guest_user_impl(&self) -> Result<GuestIdentity> {
        let now = chrono::Utc::now().timestamp();

        let model = UserActiveModel {
            username: Set(User::GUEST_USERNAME.to_string()),
            email: Set("root@localhost".to_string()),
            first_name: Set("Guest user".to_string()),
            last_name: Set(" ".to_string()),
            image_alt: Set(None),
            suspended: Set(false),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AdminCommentError::database_operation(format!("创建访客用户失败: {e}")))?;

        Ok(result.into_guest_identity())
    }

    /// 列出用户的全部权限授予
    pub async fn list_capability_grants_impl(&self, user_id: i64) -> Result<Vec<CapabilityGrant>> {
        let results = CapabilityGrants::find()
            .filter(GrantColumn::UserId.eq(user_id))
            .order_by_asc(GrantColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AdminCommentError::database_operation(format!("查询权限失败: {e}")))?;

        let mut grants = Vec::with_capacity(results.len());
        for model in results {
            let id = model.id;
            match model.into_grant() {
                Some(grant) => grants.push(grant),
                // 跳过无法识别的上下文层级，不影响其他授予
                None => warn!("Ignoring capability grant {} with unknown context level", id),
            }
        }

        Ok(grants)
    }
}

#[cfg(test)]
mod tests {
    use super::super::TempDatabase;
    use super::*;
    use crate::entity::prelude::CapabilityGrantActiveModel;
    use crate::models::users::entities::CapabilityScope;

    async fn insert_user(storage: &SeaOrmStorage, username: &str) -> i64 {
        UserActiveModel {
            username: Set(username.to_string()),
            email: Set(format!("{username}@example.com")),
            first_name: Set("Test".to_string()),
            last_name: Set(username.to_string()),
            image_alt: Set(None),
            suspended: Set(false),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap()
        .id
    }

    async fn insert_grant(storage: &SeaOrmStorage, user_id: i64, level: &str, instance_id: i64) {
        CapabilityGrantActiveModel {
            user_id: Set(user_id),
            capability: Set("mod/assign:grade".to_string()),
            context_level: Set(level.to_string()),
            instance_id: Set(instance_id),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_guest_is_found_by_username() {
        let (storage, _db) = TempDatabase::open().await;
        insert_user(&storage, "teacher").await;
        assert!(storage.get_guest_user_impl().await.unwrap().is_none());

        let created = storage.create_guest_user_impl().await.unwrap();
        let found = storage.get_guest_user_impl().await.unwrap().unwrap();

        assert_eq!(found, created);
        assert_eq!(found.email, "root@localhost");
        assert_eq!(found.image_alt, "");
    }

    #[tokio::test]
    async fn test_get_user_by_id() {
        let (storage, _db) = TempDatabase::open().await;
        let id = insert_user(&storage, "student").await;

        let user = storage.get_user_by_id_impl(id).await.unwrap().unwrap();
        assert_eq!(user.username, "student");
        assert!(!user.suspended);
        assert!(storage.get_user_by_id_impl(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_context_level_is_skipped() {
        let (storage, _db) = TempDatabase::open().await;
        let id = insert_user(&storage, "grader").await;
        insert_grant(&storage, id, "course", 2).await;
        insert_grant(&storage, id, "category", 5).await;
        insert_grant(&storage, id, "module", 11).await;

        let grants = storage.list_capability_grants_impl(id).await.unwrap();
        let scopes: Vec<CapabilityScope> = grants.iter().map(|g| g.scope).collect();
        assert_eq!(
            scopes,
            vec![CapabilityScope::course(2), CapabilityScope::module(11)]
        );
    }
}
