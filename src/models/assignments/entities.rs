use serde::{Deserialize, Serialize};

// 作业实例
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub course_module_id: i64,
    pub name: String,
    pub team_submission: bool, // 小组提交
    pub blind_marking: bool,   // 匿名评分
}
