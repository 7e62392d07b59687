use tracing::{debug, warn};

use crate::errors::{AdminCommentError, Result};
use crate::models::admincomments::entities::{Comment, CommentArea};
use crate::models::admincomments::requests::CommentContext;
use crate::storage::Storage;

/// 新建评论回调：把迁移区域的评论归属到提交的所有者
///
/// 区域为 `submission_admincomments_upgrade` 时，作者改为提交的归属用户，
/// 区域改回 `submission_admincomments`；其他区域原样返回。
pub async fn normalize_for_migration(
    storage: &dyn Storage,
    comment: Comment,
    context: &CommentContext,
) -> Result<Comment> {
    if comment.comment_area != CommentArea::UPGRADE {
        return Ok(comment);
    }

    let submission = storage
        .get_submission_by_id(comment.item_id)
        .await?
        .ok_or_else(|| {
            AdminCommentError::invalid_item_reference(format!("提交不存在: {}", comment.item_id))
        })?;

    let mut comment = comment;
    match submission.user_id {
        Some(owner) => comment.user_id = owner,
        None => warn!(
            "Submission {} has no owning user, keeping author {} for migrated comment",
            submission.id, comment.user_id
        ),
    }
    comment.comment_area = CommentArea::ADMINCOMMENTS.to_string();

    debug!(
        "Normalized migrated comment on submission {} in context {}",
        submission.id, context.course_module_id
    );
    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::super::testing::{MemoryStorage, SCENARIO_CM, comment};
    use super::*;

    fn context() -> CommentContext {
        CommentContext {
            course_module_id: SCENARIO_CM,
        }
    }

    #[tokio::test]
    async fn test_upgrade_comment_takes_submission_owner() {
        let storage = MemoryStorage::scenario();
        let mut migrated = comment(1, 2);
        migrated.comment_area = CommentArea::UPGRADE.to_string();

        let normalized = normalize_for_migration(&storage, migrated, &context())
            .await
            .unwrap();
        assert_eq!(normalized.user_id, 7);
        assert_eq!(normalized.comment_area, "submission_admincomments");
        assert_eq!(normalized.content, "comment 1");
    }

    #[tokio::test]
    async fn test_regular_comment_is_unchanged() {
        let storage = MemoryStorage::scenario();
        let original = comment(1, 2);

        let normalized = normalize_for_migration(&storage, original.clone(), &context())
            .await
            .unwrap();
        assert_eq!(normalized, original);
        assert_eq!(storage.submission_lookups(), 0);
    }

    #[tokio::test]
    async fn test_unknown_area_is_left_alone() {
        let storage = MemoryStorage::scenario();
        let mut other = comment(1, 2);
        other.comment_area = "submission_comments".to_string();

        let normalized = normalize_for_migration(&storage, other.clone(), &context())
            .await
            .unwrap();
        assert_eq!(normalized, other);
    }

    #[tokio::test]
    async fn test_missing_submission() {
        let storage = MemoryStorage::scenario();
        let mut migrated = comment(1, 2);
        migrated.comment_area = CommentArea::UPGRADE.to_string();
        migrated.item_id = 404;

        let err = normalize_for_migration(&storage, migrated, &context())
            .await
            .unwrap_err();
        assert!(matches!(err, AdminCommentError::InvalidItemReference(_)));
    }

    #[tokio::test]
    async fn test_group_submission_keeps_author() {
        let storage = MemoryStorage::new()
            .with_assignment(3, 2, SCENARIO_CM, true, false)
            .with_submission(42, 3, None, 5);
        let mut migrated = comment(1, 2);
        migrated.comment_area = CommentArea::UPGRADE.to_string();

        let normalized = normalize_for_migration(&storage, migrated, &context())
            .await
            .unwrap();
        assert_eq!(normalized.user_id, 2);
        assert_eq!(normalized.comment_area, CommentArea::ADMINCOMMENTS);
    }
}
