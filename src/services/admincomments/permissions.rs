use tracing::debug;

use super::access::AssignmentAccess;
use super::{RequestContext, resolve_target};
use crate::errors::Result;
use crate::models::admincomments::requests::CommentOptions;
use crate::models::admincomments::responses::CommentPermissions;
use crate::storage::Storage;

/// 计算当前用户对提交评论区的权限
///
/// 小组提交只看小组查看权限，个人提交只看用户查看权限。无权限时返回
/// 全假，不报错。
pub async fn resolve_permissions(
    storage: &dyn Storage,
    ctx: &RequestContext,
    options: &CommentOptions,
) -> Result<CommentPermissions> {
    let target = resolve_target(storage, options).await?;
    let access = AssignmentAccess::new(storage, &ctx.actor, &target.assignment, &ctx.settings);

    let allowed = if target.assignment.team_submission {
        access
            .can_view_group_submission(target.submission.group_id)
            .await?
    } else {
        // 个人提交缺少归属用户时无人可见
        target
            .submission
            .user_id
            .is_some_and(|user_id| access.can_view_submission(user_id))
    };

    debug!(
        "Admin comment permissions for user {} on submission {}: {}",
        ctx.actor.id, target.submission.id, allowed
    );
    Ok(CommentPermissions::granted(allowed))
}
