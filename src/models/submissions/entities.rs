use serde::{Deserialize, Serialize};

// 作业提交
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub user_id: Option<i64>, // 小组提交时为空
    pub group_id: i64,        // 0 表示默认小组
    pub status: String,
}
