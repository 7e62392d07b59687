use tracing::debug;

use super::access::AssignmentAccess;
use super::{RequestContext, resolve_target};
use crate::errors::{AdminCommentError, Result};
use crate::models::admincomments::requests::CommentOptions;
use crate::storage::Storage;

/// 校验评论操作
///
/// 前置校验之后，有归属用户的提交按用户判定查看权限，否则按小组判定。
pub async fn validate(
    storage: &dyn Storage,
    ctx: &RequestContext,
    options: &CommentOptions,
) -> Result<bool> {
    let target = resolve_target(storage, options).await?;
    let access = AssignmentAccess::new(storage, &ctx.actor, &target.assignment, &ctx.settings);

    let can_view = match target.submission.user_id {
        Some(user_id) => access.can_view_submission(user_id),
        None => {
            access
                .can_view_group_submission(target.submission.group_id)
                .await?
        }
    };

    if !can_view {
        return Err(AdminCommentError::permission_denied(format!(
            "用户 {} 无权评论提交 {}",
            ctx.actor.id, target.submission.id
        )));
    }

    debug!(
        "Validated admin comment on submission {} for user {}",
        target.submission.id, ctx.actor.id
    );
    Ok(true)
}
