use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub admincomments: AdminCommentsConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub secret: String,
    pub access_token_expiry: i64,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 管理员评论回调配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminCommentsConfig {
    /// 匿名评分时显示的名字前缀，后接匿名编号
    pub hidden_user_label: String,
    /// 匿名头像尺寸（像素）
    pub avatar_size: u32,
    /// 默认头像图片的 URL 前缀
    pub avatar_base_url: String,
    /// 用户主页 URL 前缀
    pub profile_base_url: String,
    /// 作业查看页 URL 前缀，事件中引用
    pub view_base_url: String,
    /// 允许删除他人评论的权限名
    pub override_capability: String,
    /// 评分权限名，持有者可查看任意提交
    pub grade_capability: String,
}

impl Default for AdminCommentsConfig {
    fn default() -> Self {
        Self {
            hidden_user_label: "Hidden user".to_string(),
            avatar_size: 18,
            avatar_base_url: "/theme/image.php/boost/core/1".to_string(),
            profile_base_url: "/user/view.php".to_string(),
            view_base_url: "/mod/assign/view.php".to_string(),
            override_capability: "moodle/site:caneditadmincomment".to_string(),
            grade_capability: "mod/assign:grade".to_string(),
        }
    }
}
