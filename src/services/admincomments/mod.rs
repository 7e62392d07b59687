//! 管理员评论回调
//!
//! 宿主评论组件在四个扩展点调用本模块：
//! - `validate`：校验评论操作
//! - `permissions`：计算查看/发表权限
//! - `display`：渲染前过滤（匿名评分、删除按钮）
//! - `add`：迁移评论归属修正
//!
//! 另有 `events` 在评论创建/删除后记录事件。每个回调都先执行同样的前置校验，
//! 任何一项失败都在产生副作用之前返回错误。

pub mod access;
pub mod add;
pub mod avatar;
pub mod display;
pub mod events;
pub mod permissions;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::AdminCommentsConfig;
use crate::errors::{AdminCommentError, Result};
use crate::models::admincomments::entities::{Comment, CommentArea};
use crate::models::admincomments::requests::{CommentContext, CommentOptions};
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use events::{EventSink, TracingEventSink};

/// 单次请求的显式上下文
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub actor: Actor,
    pub settings: AdminCommentsConfig,
}

impl RequestContext {
    pub fn new(actor: Actor, settings: AdminCommentsConfig) -> Self {
        Self { actor, settings }
    }
}

/// 通过前置校验的评论目标
#[derive(Debug, Clone)]
pub struct CommentTarget {
    pub area: CommentArea,
    pub submission: Submission,
    pub assignment: Assignment,
}

/// 通过上下文解析作业
pub(crate) async fn resolve_assignment(
    storage: &dyn Storage,
    context: &CommentContext,
) -> Result<Assignment> {
    storage
        .get_assignment_by_course_module(context.course_module_id)
        .await?
        .ok_or_else(|| {
            AdminCommentError::context_mismatch(format!(
                "上下文 {} 不属于任何作业",
                context.course_module_id
            ))
        })
}

/// 前置校验：评论区域、提交存在、上下文作业拥有该提交
///
/// 区域校验不访问存储。
pub(crate) async fn resolve_target(
    storage: &dyn Storage,
    options: &CommentOptions,
) -> Result<CommentTarget> {
    let area = options.comment_area.parse::<CommentArea>()?;

    let submission = storage
        .get_submission_by_id(options.item_id)
        .await?
        .ok_or_else(|| {
            AdminCommentError::invalid_item_reference(format!("提交不存在: {}", options.item_id))
        })?;

    let assignment = resolve_assignment(storage, &options.context).await?;

    if assignment.id != submission.assignment_id {
        return Err(AdminCommentError::context_mismatch(format!(
            "作业 {} 不包含提交 {}",
            assignment.id, submission.id
        )));
    }

    Ok(CommentTarget {
        area,
        submission,
        assignment,
    })
}

pub struct AdminCommentService {
    storage: Option<Arc<dyn Storage>>,
    events: Arc<dyn EventSink>,
}

impl AdminCommentService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            events: Arc::new(TracingEventSink),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 校验评论操作
    pub async fn validate(
        &self,
        request: &HttpRequest,
        ctx: &RequestContext,
        options: CommentOptions,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = validate::validate(storage.as_ref(), ctx, &options)
            .await
            .map(|valid| crate::models::admincomments::responses::ValidateResponse { valid });
        Ok(respond(result, "校验通过"))
    }

    /// 计算评论权限
    pub async fn permissions(
        &self,
        request: &HttpRequest,
        ctx: &RequestContext,
        options: CommentOptions,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = permissions::resolve_permissions(storage.as_ref(), ctx, &options).await;
        Ok(respond(result, "查询成功"))
    }

    /// 渲染前过滤评论
    pub async fn display(
        &self,
        request: &HttpRequest,
        ctx: &RequestContext,
        comments: Vec<Comment>,
        options: CommentOptions,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = display::filter_for_display(storage.as_ref(), ctx, comments, &options).await;
        Ok(respond(result, "过滤完成"))
    }

    /// 新建评论前修正迁移评论
    pub async fn add(
        &self,
        request: &HttpRequest,
        comment: Comment,
        context: CommentContext,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = add::normalize_for_migration(storage.as_ref(), comment, &context).await;
        Ok(respond(result, "处理完成"))
    }

    /// 记录评论创建事件
    pub async fn comment_created(
        &self,
        request: &HttpRequest,
        ctx: &RequestContext,
        comment: Comment,
        options: CommentOptions,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = events::comment_created(
            storage.as_ref(),
            self.events.as_ref(),
            ctx,
            &comment,
            &options,
        )
        .await;
        Ok(respond(result, "事件已记录"))
    }

    /// 记录评论删除事件
    pub async fn comment_deleted(
        &self,
        request: &HttpRequest,
        ctx: &RequestContext,
        comment: Comment,
        options: CommentOptions,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let result = events::comment_deleted(
            storage.as_ref(),
            self.events.as_ref(),
            ctx,
            &comment,
            &options,
        )
        .await;
        Ok(respond(result, "事件已记录"))
    }
}

/// 将回调结果转换为 HTTP 响应
fn respond<T: Serialize>(result: Result<T>, message: &str) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::success(data, message)),
        Err(err) => error_response(&err),
    }
}

pub(crate) fn error_response(err: &AdminCommentError) -> HttpResponse {
    let code = ErrorCode::from(err);
    let body = ApiResponse::error_empty(code, err.message());
    match err {
        AdminCommentError::Authentication(_) => HttpResponse::Unauthorized().json(body),
        AdminCommentError::PermissionDenied(_) => {
            info!("Admin comment request rejected: {}", err);
            HttpResponse::Forbidden().json(body)
        }
        _ if err.is_rejection() => {
            info!("Admin comment request rejected: {}", err);
            HttpResponse::BadRequest().json(body)
        }
        _ => {
            error!("Admin comment callback failed: {}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}
