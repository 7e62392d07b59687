use std::sync::Arc;

use crate::models::{
    assignments::entities::Assignment,
    submissions::entities::Submission,
    users::entities::{CapabilityGrant, GuestIdentity, User},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 获取系统访客身份
    async fn get_guest_user(&self) -> Result<Option<GuestIdentity>>;
    // 创建系统访客身份
    async fn create_guest_user(&self) -> Result<GuestIdentity>;
    // 列出用户的权限授予
    async fn list_capability_grants(&self, user_id: i64) -> Result<Vec<CapabilityGrant>>;

    /// 作业管理方法
    // 通过课程模块 ID 解析作业
    async fn get_assignment_by_course_module(
        &self,
        course_module_id: i64,
    ) -> Result<Option<Assignment>>;
    // 获取（必要时分配）用户在作业内的匿名编号
    async fn get_or_create_user_mapping(&self, assignment_id: i64, user_id: i64) -> Result<i64>;

    /// 提交管理方法
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;

    /// 小组管理方法
    // 用户是否为小组成员
    async fn is_group_member(&self, group_id: i64, user_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
