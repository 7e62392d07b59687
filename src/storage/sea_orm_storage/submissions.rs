//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::Submissions;
use crate::errors::{AdminCommentError, Result};
use crate::models::submissions::entities::Submission;
use sea_orm::EntityTrait;

impl SeaOrmStorage {
    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| AdminCommentError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::TempDatabase;
    use super::*;
    use crate::entity::prelude::{AssignmentActiveModel, SubmissionActiveModel};
    use sea_orm::{ActiveModelTrait, Set};

    async fn insert_submission(
        storage: &SeaOrmStorage,
        assignment_id: i64,
        user_id: i64,
        group_id: i64,
    ) -> i64 {
        SubmissionActiveModel {
            assignment_id: Set(assignment_id),
            user_id: Set(user_id),
            group_id: Set(group_id),
            status: Set("submitted".to_string()),
            time_modified: Set(0),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_owner_zero_means_no_user() {
        let (storage, _db) = TempDatabase::open().await;
        let assignment = AssignmentActiveModel {
            course_id: Set(2),
            course_module_id: Set(11),
            name: Set("Team project".to_string()),
            team_submission: Set(true),
            blind_marking: Set(false),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();

        let individual = insert_submission(&storage, assignment.id, 7, 0).await;
        let team = insert_submission(&storage, assignment.id, 0, 4).await;

        let individual = storage
            .get_submission_by_id_impl(individual)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(individual.user_id, Some(7));

        let team = storage.get_submission_by_id_impl(team).await.unwrap().unwrap();
        assert_eq!(team.user_id, None);
        assert_eq!(team.group_id, 4);
        assert_eq!(team.assignment_id, assignment.id);

        assert!(storage.get_submission_by_id_impl(999).await.unwrap().is_none());
    }
}
