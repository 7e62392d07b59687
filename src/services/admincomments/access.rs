//! 作业内的访问判定

use crate::config::AdminCommentsConfig;
use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::{Actor, CapabilityScope};
use crate::storage::Storage;

/// 当前用户在某个作业内的访问判定
pub struct AssignmentAccess<'a> {
    storage: &'a dyn Storage,
    actor: &'a Actor,
    assignment: &'a Assignment,
    settings: &'a AdminCommentsConfig,
}

impl<'a> AssignmentAccess<'a> {
    pub fn new(
        storage: &'a dyn Storage,
        actor: &'a Actor,
        assignment: &'a Assignment,
        settings: &'a AdminCommentsConfig,
    ) -> Self {
        Self {
            storage,
            actor,
            assignment,
            settings,
        }
    }

    /// 在作业模块或所在课程持有评分权限
    pub fn can_grade(&self) -> bool {
        let capability = &self.settings.grade_capability;
        self.actor.has_capability(
            capability,
            CapabilityScope::module(self.assignment.course_module_id),
        ) || self
            .actor
            .has_capability(capability, CapabilityScope::course(self.assignment.course_id))
    }

    /// 能否查看某用户的提交
    pub fn can_view_submission(&self, user_id: i64) -> bool {
        self.actor.id == user_id || self.can_grade()
    }

    /// 能否查看某小组的提交
    pub async fn can_view_group_submission(&self, group_id: i64) -> Result<bool> {
        if self.can_grade() {
            return Ok(true);
        }
        self.storage.is_group_member(group_id, self.actor.id).await
    }

    /// 能否保留他人评论的删除按钮
    ///
    /// 在个人上下文或当前课程上下文持有覆盖权限任一即可。
    /// 个人上下文指当前用户自己的上下文，不是评论作者的。
    pub fn can_delete_others(&self) -> bool {
        let capability = &self.settings.override_capability;
        self.actor
            .has_capability(capability, CapabilityScope::user(self.actor.id))
            || self
                .actor
                .has_capability(capability, CapabilityScope::course(self.assignment.course_id))
    }
}
