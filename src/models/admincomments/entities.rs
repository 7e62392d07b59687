use serde::{Deserialize, Serialize};

use crate::errors::AdminCommentError;

// 评论区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentArea {
    AdminComments, // 常规管理员评论
    Upgrade,       // 数据迁移期间创建的评论
}

impl CommentArea {
    pub const ADMINCOMMENTS: &'static str = "submission_admincomments";
    pub const UPGRADE: &'static str = "submission_admincomments_upgrade";

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentArea::AdminComments => Self::ADMINCOMMENTS,
            CommentArea::Upgrade => Self::UPGRADE,
        }
    }
}

impl std::fmt::Display for CommentArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CommentArea {
    type Err = AdminCommentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CommentArea::ADMINCOMMENTS => Ok(CommentArea::AdminComments),
            CommentArea::UPGRADE => Ok(CommentArea::Upgrade),
            _ => Err(AdminCommentError::invalid_comment_area(format!(
                "无效的评论区域: '{s}'"
            ))),
        }
    }
}

/// 评论
///
/// `fullname`、`avatar`、`profile_url` 仅在单次渲染中附加，不会持久化。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub content: String,
    pub comment_area: String,
    pub item_id: i64,
    #[serde(default)]
    pub delete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_area_parse() {
        assert_eq!(
            "submission_admincomments".parse::<CommentArea>(),
            Ok(CommentArea::AdminComments)
        );
        assert_eq!(
            "submission_admincomments_upgrade".parse::<CommentArea>(),
            Ok(CommentArea::Upgrade)
        );
        let err = "submission_comments".parse::<CommentArea>().unwrap_err();
        assert_eq!(err.code(), "E101");
    }

    #[test]
    fn test_comment_defaults_from_host_payload() {
        let comment: Comment = serde_json::from_str(
            r#"{"id":1,"user_id":7,"comment_area":"submission_admincomments","item_id":42}"#,
        )
        .unwrap();
        assert!(!comment.delete);
        assert_eq!(comment.fullname, None);
        assert_eq!(comment.profile_url, None);
    }
}
