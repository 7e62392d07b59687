use serde::Deserialize;

use super::entities::Comment;

/// 评论所在的上下文，由宿主传入
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct CommentContext {
    pub course_module_id: i64,
}

/// 评论回调的通用参数
///
/// `comment_area` 保留原始字符串，未知值由回调自身拒绝。
#[derive(Debug, Clone, Deserialize)]
pub struct CommentOptions {
    pub comment_area: String,
    pub item_id: i64,
    pub context: CommentContext,
}

// 渲染前过滤评论请求
#[derive(Debug, Deserialize)]
pub struct DisplayCommentsRequest {
    pub comments: Vec<Comment>,
    pub options: CommentOptions,
}

// 新建评论回调请求
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub comment: Comment,
    pub context: CommentContext,
}

// 评论事件请求（创建/删除之后由宿主调用）
#[derive(Debug, Deserialize)]
pub struct CommentEventRequest {
    pub comment: Comment,
    pub options: CommentOptions,
}
