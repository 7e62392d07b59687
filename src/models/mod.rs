//! 数据模型定义
//!
//! 业务实体、请求体与响应体，与 `entity` 中的数据库实体分离。

pub mod admincomments;
pub mod assignments;
pub mod common;
pub mod submissions;
pub mod users;

pub use common::response::ApiResponse;

use crate::errors::AdminCommentError;

/// 响应体中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InvalidCommentArea = 2001,
    InvalidItemReference = 2002,
    ContextMismatch = 2003,
    InternalServerError = 5000,
}

impl From<&AdminCommentError> for ErrorCode {
    fn from(err: &AdminCommentError) -> Self {
        match err {
            AdminCommentError::InvalidCommentArea(_) => ErrorCode::InvalidCommentArea,
            AdminCommentError::InvalidItemReference(_) => ErrorCode::InvalidItemReference,
            AdminCommentError::ContextMismatch(_) => ErrorCode::ContextMismatch,
            AdminCommentError::PermissionDenied(_) => ErrorCode::Forbidden,
            AdminCommentError::Authentication(_) => ErrorCode::Unauthorized,
            AdminCommentError::NotFound(_) => ErrorCode::NotFound,
            _ => ErrorCode::InternalServerError,
        }
    }
}
