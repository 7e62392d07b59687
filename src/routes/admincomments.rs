use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::config::AppConfig;
use crate::middlewares::{self, RequireJWT};
use crate::models::admincomments::requests::{
    AddCommentRequest, CommentEventRequest, CommentOptions, DisplayCommentsRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AdminCommentService;
use crate::services::admincomments::RequestContext;

// 懒加载的全局 AdminCommentService 实例
static ADMINCOMMENT_SERVICE: Lazy<AdminCommentService> =
    Lazy::new(AdminCommentService::new_lazy);

// 从请求中构建回调上下文
fn request_context(req: &HttpRequest) -> Option<RequestContext> {
    RequireJWT::extract_actor(req)
        .map(|actor| RequestContext::new(actor, AppConfig::get().admincomments.clone()))
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "无法获取用户信息",
    ))
}

// 校验评论操作
pub async fn validate(
    req: HttpRequest,
    body: web::Json<CommentOptions>,
) -> ActixResult<HttpResponse> {
    let Some(ctx) = request_context(&req) else {
        return Ok(unauthorized());
    };

    ADMINCOMMENT_SERVICE
        .validate(&req, &ctx, body.into_inner())
        .await
}

// 查询评论权限
pub async fn permissions(
    req: HttpRequest,
    body: web::Json<CommentOptions>,
) -> ActixResult<HttpResponse> {
    let Some(ctx) = request_context(&req) else {
        return Ok(unauthorized());
    };

    ADMINCOMMENT_SERVICE
        .permissions(&req, &ctx, body.into_inner())
        .await
}

// 渲染前过滤评论
pub async fn display(
    req: HttpRequest,
    body: web::Json<DisplayCommentsRequest>,
) -> ActixResult<HttpResponse> {
    let Some(ctx) = request_context(&req) else {
        return Ok(unauthorized());
    };

    let DisplayCommentsRequest { comments, options } = body.into_inner();
    ADMINCOMMENT_SERVICE
        .display(&req, &ctx, comments, options)
        .await
}

// 新建评论前处理
pub async fn add(req: HttpRequest, body: web::Json<AddCommentRequest>) -> ActixResult<HttpResponse> {
    let AddCommentRequest { comment, context } = body.into_inner();
    ADMINCOMMENT_SERVICE.add(&req, comment, context).await
}

// 评论已创建
pub async fn comment_created(
    req: HttpRequest,
    body: web::Json<CommentEventRequest>,
) -> ActixResult<HttpResponse> {
    let Some(ctx) = request_context(&req) else {
        return Ok(unauthorized());
    };

    let CommentEventRequest { comment, options } = body.into_inner();
    ADMINCOMMENT_SERVICE
        .comment_created(&req, &ctx, comment, options)
        .await
}

// 评论已删除
pub async fn comment_deleted(
    req: HttpRequest,
    body: web::Json<CommentEventRequest>,
) -> ActixResult<HttpResponse> {
    let Some(ctx) = request_context(&req) else {
        return Ok(unauthorized());
    };

    let CommentEventRequest { comment, options } = body.into_inner();
    ADMINCOMMENT_SERVICE
        .comment_deleted(&req, &ctx, comment, options)
        .await
}

// 配置路由
pub fn configure_admincomments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admincomments")
            .wrap(middlewares::RequireJWT)
            .route("/validate", web::post().to(validate))
            .route("/permissions", web::post().to(permissions))
            .route("/display", web::post().to(display))
            .route("/add", web::post().to(add))
            .route("/events/created", web::post().to(comment_created))
            .route("/events/deleted", web::post().to(comment_deleted)),
    );
}
