use serde::Serialize;

/// 当前用户对某提交评论区的权限
///
/// `post` 与 `view` 总是相等，没有只读评论者。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CommentPermissions {
    pub post: bool,
    pub view: bool,
}

impl CommentPermissions {
    pub fn granted(allowed: bool) -> Self {
        Self {
            post: allowed,
            view: allowed,
        }
    }
}

// 校验结果
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
}
