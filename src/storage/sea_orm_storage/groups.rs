//! 小组存储操作

use super::SeaOrmStorage;
use crate::entity::group_members::Column;
use crate::entity::prelude::GroupMembers;
use crate::errors::{AdminCommentError, Result};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    /// 用户是否属于该小组
    pub async fn is_group_member_impl(&self, group_id: i64, user_id: i64) -> Result<bool> {
        let count = GroupMembers::find()
            .filter(Column::GroupId.eq(group_id))
            .filter(Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| AdminCommentError::database_operation(format!("查询小组成员失败: {e}")))?;

        Ok(count > 0)
    }
}
