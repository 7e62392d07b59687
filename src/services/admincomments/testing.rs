//! 测试用内存存储，记录各查询的调用次数

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::RequestContext;
use crate::config::AdminCommentsConfig;
use crate::errors::Result;
use crate::models::admincomments::entities::{Comment, CommentArea};
use crate::models::admincomments::requests::{CommentContext, CommentOptions};
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::{
    Actor, CapabilityGrant, CapabilityScope, GuestIdentity, User,
};
use crate::storage::Storage;

pub const SCENARIO_CM: i64 = 11;
pub const SCENARIO_COURSE: i64 = 2;

#[derive(Default)]
pub struct MemoryStorage {
    assignments: HashMap<i64, Assignment>,
    submissions: HashMap<i64, Submission>,
    group_members: HashSet<(i64, i64)>,
    grants: HashMap<i64, Vec<CapabilityGrant>>,
    guest: Mutex<Option<GuestIdentity>>,
    mappings: Mutex<HashMap<(i64, i64), i64>>,
    mapping_calls: Mutex<HashMap<i64, usize>>,
    submission_lookups: AtomicUsize,
    group_checks: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 提交 42 属于用户 7，作业 3（课程模块 11，课程 2），个人提交，匿名评分
    pub fn scenario() -> Self {
        Self::new()
            .with_assignment(3, SCENARIO_COURSE, SCENARIO_CM, false, true)
            .with_submission(42, 3, Some(7), 0)
            .with_guest(guest())
    }

    pub fn with_assignment(
        mut self,
        id: i64,
        course_id: i64,
        course_module_id: i64,
        team_submission: bool,
        blind_marking: bool,
    ) -> Self {
        self.assignments.insert(
            course_module_id,
            Assignment {
                id,
                course_id,
                course_module_id,
                name: format!("Assignment {id}"),
                team_submission,
                blind_marking,
            },
        );
        self
    }

    pub fn with_submission(
        mut self,
        id: i64,
        assignment_id: i64,
        user_id: Option<i64>,
        group_id: i64,
    ) -> Self {
        self.submissions.insert(
            id,
            Submission {
                id,
                assignment_id,
                user_id,
                group_id,
                status: "submitted".to_string(),
            },
        );
        self
    }

    pub fn with_group_member(mut self, group_id: i64, user_id: i64) -> Self {
        self.group_members.insert((group_id, user_id));
        self
    }

    pub fn with_grants(mut self, user_id: i64, grants: Vec<CapabilityGrant>) -> Self {
        self.grants.insert(user_id, grants);
        self
    }

    pub fn with_guest(self, guest: GuestIdentity) -> Self {
        *self.guest.lock().unwrap() = Some(guest);
        self
    }

    pub fn without_guest(self) -> Self {
        *self.guest.lock().unwrap() = None;
        self
    }

    pub fn submission_lookups(&self) -> usize {
        self.submission_lookups.load(Ordering::SeqCst)
    }

    pub fn group_checks(&self) -> usize {
        self.group_checks.load(Ordering::SeqCst)
    }

    pub fn mapping_calls(&self, user_id: i64) -> usize {
        self.mapping_calls
            .lock()
            .unwrap()
            .get(&user_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(Some(User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            first_name: "Test".to_string(),
            last_name: format!("User {id}"),
            image_alt: None,
            suspended: false,
        }))
    }

    async fn get_guest_user(&self) -> Result<Option<GuestIdentity>> {
        Ok(self.guest.lock().unwrap().clone())
    }

    async fn create_guest_user(&self) -> Result<GuestIdentity> {
        let created = guest();
        *self.guest.lock().unwrap() = Some(created.clone());
        Ok(created)
    }

    async fn list_capability_grants(&self, user_id: i64) -> Result<Vec<CapabilityGrant>> {
        Ok(self.grants.get(&user_id).cloned().unwrap_or_default())
    }

    async fn get_assignment_by_course_module(
        &self,
        course_module_id: i64,
    ) -> Result<Option<Assignment>> {
        Ok(self.assignments.get(&course_module_id).cloned())
    }

    async fn get_or_create_user_mapping(&self, assignment_id: i64, user_id: i64) -> Result<i64> {
        *self
            .mapping_calls
            .lock()
            .unwrap()
            .entry(user_id)
            .or_default() += 1;

        let mut mappings = self.mappings.lock().unwrap();
        let next = mappings.len() as i64 + 1;
        Ok(*mappings.entry((assignment_id, user_id)).or_insert(next))
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.submission_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.submissions.get(&submission_id).cloned())
    }

    async fn is_group_member(&self, group_id: i64, user_id: i64) -> Result<bool> {
        self.group_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.group_members.contains(&(group_id, user_id)))
    }
}

pub fn guest() -> GuestIdentity {
    GuestIdentity {
        id: 1,
        email: "root@localhost".to_string(),
        image_alt: String::new(),
    }
}

pub fn options(item_id: i64) -> CommentOptions {
    CommentOptions {
        comment_area: CommentArea::ADMINCOMMENTS.to_string(),
        item_id,
        context: CommentContext {
            course_module_id: SCENARIO_CM,
        },
    }
}

pub fn comment(id: i64, user_id: i64) -> Comment {
    Comment {
        id,
        user_id,
        content: format!("comment {id}"),
        comment_area: CommentArea::ADMINCOMMENTS.to_string(),
        item_id: 42,
        delete: true,
        fullname: Some(format!("Real Name {user_id}")),
        avatar: None,
        profile_url: Some(format!("/user/view.php?id={user_id}")),
    }
}

pub fn grant(capability: &str, scope: CapabilityScope) -> CapabilityGrant {
    CapabilityGrant {
        capability: capability.to_string(),
        scope,
    }
}

pub fn ctx(actor_id: i64, grants: Vec<CapabilityGrant>) -> RequestContext {
    RequestContext::new(Actor::new(actor_id, grants), AdminCommentsConfig::default())
}

/// 课程级评分权限
pub fn grader(actor_id: i64) -> RequestContext {
    ctx(
        actor_id,
        vec![grant(
            "mod/assign:grade",
            CapabilityScope::course(SCENARIO_COURSE),
        )],
    )
}
