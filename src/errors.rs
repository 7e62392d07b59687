//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! `E0xx` 为基础设施错误，`E1xx` 为评论回调的业务错误。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_admincomment_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum AdminCommentError {
            $($variant(String),)*
        }

        impl AdminCommentError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AdminCommentError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AdminCommentError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AdminCommentError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AdminCommentError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AdminCommentError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_admincomment_errors! {
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Authentication("E012", "Authentication Error"),
    InvalidCommentArea("E101", "Invalid Comment Area"),
    InvalidItemReference("E102", "Invalid Item Reference"),
    ContextMismatch("E103", "Context Mismatch"),
    PermissionDenied("E104", "Permission Denied"),
}

impl AdminCommentError {
    /// 是否为调用方输入导致的业务错误（非基础设施故障）
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AdminCommentError::InvalidCommentArea(_)
                | AdminCommentError::InvalidItemReference(_)
                | AdminCommentError::ContextMismatch(_)
                | AdminCommentError::PermissionDenied(_)
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AdminCommentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AdminCommentError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AdminCommentError {
    fn from(err: sea_orm::DbErr) -> Self {
        AdminCommentError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AdminCommentError {
    fn from(err: std::io::Error) -> Self {
        AdminCommentError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AdminCommentError {
    fn from(err: serde_json::Error) -> Self {
        AdminCommentError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdminCommentError>;
