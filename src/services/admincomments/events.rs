//! 评论事件
//!
//! 评论创建、删除之后由宿主回调，事件携带作业模块上下文与作业查看页 URL。

use serde::Serialize;
use tracing::info;

use super::{RequestContext, resolve_target};
use crate::errors::Result;
use crate::models::admincomments::entities::Comment;
use crate::models::admincomments::requests::CommentOptions;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminCommentEventKind {
    Created,
    Deleted,
}

impl AdminCommentEventKind {
    pub fn event_name(&self) -> &'static str {
        match self {
            AdminCommentEventKind::Created => {
                "\\assignsubmission_admincomments\\event\\admincomment_created"
            }
            AdminCommentEventKind::Deleted => {
                "\\assignsubmission_admincomments\\event\\admincomment_deleted"
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminCommentEvent {
    pub kind: AdminCommentEventKind,
    pub event_name: &'static str,
    pub course_module_id: i64, // 事件上下文
    pub comment_id: i64,
    pub item_id: i64,
    pub user_id: i64,                 // 触发事件的用户
    pub related_user_id: Option<i64>, // 提交所属用户，小组提交为空
    pub url: String,
    pub time_created: i64,
}

/// 事件出口
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &AdminCommentEvent);
}

/// 以结构化日志输出事件
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: &AdminCommentEvent) {
        info!(
            target: "admincomments::events",
            event = event.event_name,
            context = event.course_module_id,
            comment_id = event.comment_id,
            item_id = event.item_id,
            user_id = event.user_id,
            related_user_id = ?event.related_user_id,
            url = %event.url,
            "Admin comment event"
        );
    }
}

async fn record(
    kind: AdminCommentEventKind,
    storage: &dyn Storage,
    sink: &dyn EventSink,
    ctx: &RequestContext,
    comment: &Comment,
    options: &CommentOptions,
) -> Result<AdminCommentEvent> {
    let target = resolve_target(storage, options).await?;
    let course_module_id = target.assignment.course_module_id;

    let event = AdminCommentEvent {
        kind,
        event_name: kind.event_name(),
        course_module_id,
        comment_id: comment.id,
        item_id: target.submission.id,
        user_id: ctx.actor.id,
        related_user_id: target.submission.user_id,
        url: format!("{}?id={}", ctx.settings.view_base_url, course_module_id),
        time_created: chrono::Utc::now().timestamp(),
    };
    sink.publish(&event);
    Ok(event)
}

/// 评论创建事件
pub async fn comment_created(
    storage: &dyn Storage,
    sink: &dyn EventSink,
    ctx: &RequestContext,
    comment: &Comment,
    options: &CommentOptions,
) -> Result<AdminCommentEvent> {
    record(
        AdminCommentEventKind::Created,
        storage,
        sink,
        ctx,
        comment,
        options,
    )
    .await
}

/// 评论删除事件
pub async fn comment_deleted(
    storage: &dyn Storage,
    sink: &dyn EventSink,
    ctx: &RequestContext,
    comment: &Comment,
    options: &CommentOptions,
) -> Result<AdminCommentEvent> {
    record(
        AdminCommentEventKind::Deleted,
        storage,
        sink,
        ctx,
        comment,
        options,
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::super::testing::{MemoryStorage, SCENARIO_CM, comment, grader, options};
    use super::*;
    use crate::errors::AdminCommentError;

    #[derive(Default)]
    struct CollectingSink {
        events: Mutex<Vec<AdminCommentEvent>>,
    }

    impl EventSink for CollectingSink {
        fn publish(&self, event: &AdminCommentEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[tokio::test]
    async fn test_created_event() {
        let storage = MemoryStorage::scenario();
        let sink = CollectingSink::default();

        let event = comment_created(&storage, &sink, &grader(9), &comment(5, 9), &options(42))
            .await
            .unwrap();

        assert_eq!(
            event.event_name,
            "\\assignsubmission_admincomments\\event\\admincomment_created"
        );
        assert_eq!(event.course_module_id, SCENARIO_CM);
        assert_eq!(event.comment_id, 5);
        assert_eq!(event.user_id, 9);
        assert_eq!(event.related_user_id, Some(7));
        assert_eq!(event.url, "/mod/assign/view.php?id=11");

        let published = sink.events.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0], event);
    }

    #[tokio::test]
    async fn test_deleted_event() {
        let storage = MemoryStorage::scenario();
        let sink = CollectingSink::default();

        let event = comment_deleted(&storage, &sink, &grader(9), &comment(5, 9), &options(42))
            .await
            .unwrap();
        assert_eq!(event.kind, AdminCommentEventKind::Deleted);
        assert!(event.event_name.ends_with("admincomment_deleted"));
        assert_eq!(event.url, "/mod/assign/view.php?id=11");
    }

    #[tokio::test]
    async fn test_team_submission_has_no_related_user() {
        let storage = MemoryStorage::new()
            .with_assignment(3, 2, SCENARIO_CM, true, false)
            .with_submission(50, 3, None, 4);
        let sink = CollectingSink::default();

        let event = comment_created(&storage, &sink, &grader(9), &comment(5, 9), &options(50))
            .await
            .unwrap();
        assert_eq!(event.item_id, 50);
        assert_eq!(event.related_user_id, None);
    }

    #[tokio::test]
    async fn test_invalid_request_publishes_nothing() {
        let storage = MemoryStorage::scenario();
        let sink = CollectingSink::default();
        let mut opts = options(42);
        opts.comment_area = "blog_comments".to_string();

        let err = comment_created(&storage, &sink, &grader(9), &comment(5, 9), &opts)
            .await
            .unwrap_err();
        assert!(matches!(err, AdminCommentError::InvalidCommentArea(_)));
        assert!(sink.events.lock().unwrap().is_empty());
    }
}
