use serde::{Deserialize, Serialize};

// 上下文层级
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContextLevel {
    System, // 全站
    Course, // 课程
    Module, // 课程模块（作业实例）
    User,   // 用户个人
}

impl ContextLevel {
    pub const SYSTEM: &'static str = "system";
    pub const COURSE: &'static str = "course";
    pub const MODULE: &'static str = "module";
    pub const USER: &'static str = "user";
}

impl<'de> Deserialize<'de> for ContextLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ContextLevel>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的上下文层级: '{s}'. 支持的层级: system, course, module, user"
            ))
        })
    }
}

impl std::fmt::Display for ContextLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextLevel::System => write!(f, "{}", ContextLevel::SYSTEM),
            ContextLevel::Course => write!(f, "{}", ContextLevel::COURSE),
            ContextLevel::Module => write!(f, "{}", ContextLevel::MODULE),
            ContextLevel::User => write!(f, "{}", ContextLevel::USER),
        }
    }
}

impl std::str::FromStr for ContextLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(ContextLevel::System),
            "course" => Ok(ContextLevel::Course),
            "module" => Ok(ContextLevel::Module),
            "user" => Ok(ContextLevel::User),
            _ => Err(format!("Invalid context level: {s}")),
        }
    }
}

/// 权限作用域：上下文层级 + 实例 ID
///
/// 全站作用域的实例 ID 恒为 0。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapabilityScope {
    pub level: ContextLevel,
    pub instance_id: i64,
}

impl CapabilityScope {
    pub fn system() -> Self {
        Self {
            level: ContextLevel::System,
            instance_id: 0,
        }
    }

    pub fn course(course_id: i64) -> Self {
        Self {
            level: ContextLevel::Course,
            instance_id: course_id,
        }
    }

    pub fn module(course_module_id: i64) -> Self {
        Self {
            level: ContextLevel::Module,
            instance_id: course_module_id,
        }
    }

    pub fn user(user_id: i64) -> Self {
        Self {
            level: ContextLevel::User,
            instance_id: user_id,
        }
    }

    /// 该作用域上的授予是否覆盖目标作用域
    pub fn covers(&self, target: &CapabilityScope) -> bool {
        self.level == ContextLevel::System || self == target
    }
}

// 权限授予
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapabilityGrant {
    pub capability: String,
    pub scope: CapabilityScope,
}

// 用户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub image_alt: Option<String>,
    pub suspended: bool,
}

impl User {
    pub const GUEST_USERNAME: &'static str = "guest";
}

/// 当前请求的发起者
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    #[serde(default)]
    pub grants: Vec<CapabilityGrant>,
}

impl Actor {
    pub fn new(id: i64, grants: Vec<CapabilityGrant>) -> Self {
        Self { id, grants }
    }

    /// 是否在指定作用域持有某权限
    pub fn has_capability(&self, capability: &str, scope: CapabilityScope) -> bool {
        self.grants
            .iter()
            .any(|grant| grant.capability == capability && grant.scope.covers(&scope))
    }
}

/// 系统访客身份，用于匿名头像
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuestIdentity {
    pub id: i64,
    pub email: String,
    pub image_alt: String,
}
