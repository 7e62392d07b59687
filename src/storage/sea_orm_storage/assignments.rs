//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assign_user_mapping::Column as MappingColumn;
use crate::entity::assignments::Column;
use crate::entity::prelude::{AssignUserMappingActiveModel, AssignUserMappings, Assignments};
use crate::errors::{AdminCommentError, Result};
use crate::models::assignments::entities::Assignment;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};
use tracing::debug;

impl SeaOrmStorage {
    /// 通过课程模块 ID 获取作业
    pub async fn get_assignment_by_course_module_impl(
        &self,
        course_module_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find()
            .filter(Column::CourseModuleId.eq(course_module_id))
            .one(&self.db)
            .await
            .map_err(|e| AdminCommentError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 获取用户在作业内的匿名编号，不存在时分配新编号
    ///
    /// 编号按分配顺序递增，同一作业同一用户始终得到同一编号。
    /// 并发分配同一编号时唯一索引冲突的一方改读已写入的行。
    pub async fn get_or_create_user_mapping_impl(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<i64> {
        if let Some(id) = self.find_user_mapping(assignment_id, user_id).await? {
            return Ok(id);
        }

        let model = AssignUserMappingActiveModel {
            assignment_id: Set(assignment_id),
            user_id: Set(user_id),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(result) => Ok(result.id),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(
                    "Anonymous id for user {} on assignment {} allocated concurrently",
                    user_id, assignment_id
                );
                self.find_user_mapping(assignment_id, user_id)
                    .await?
                    .ok_or_else(|| {
                        AdminCommentError::database_operation(format!(
                            "匿名编号冲突后仍未找到: assignment={assignment_id}, user={user_id}"
                        ))
                    })
            }
            Err(e) => Err(AdminCommentError::database_operation(format!(
                "分配匿名编号失败: {e}"
            ))),
        }
    }

    async fn find_user_mapping(&self, assignment_id: i64, user_id: i64) -> Result<Option<i64>> {
        let existing = AssignUserMappings::find()
            .filter(MappingColumn::AssignmentId.eq(assignment_id))
            .filter(MappingColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| AdminCommentError::database_operation(format!("查询匿名编号失败: {e}")))?;

        Ok(existing.map(|mapping| mapping.id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::TempDatabase;
    use crate::entity::prelude::AssignmentActiveModel;
    use sea_orm::{ActiveModelTrait, Set};

    async fn insert_assignment(
        storage: &super::SeaOrmStorage,
        course_module_id: i64,
        blind_marking: bool,
    ) -> i64 {
        AssignmentActiveModel {
            course_id: Set(2),
            course_module_id: Set(course_module_id),
            name: Set(format!("Assignment cm{course_module_id}")),
            team_submission: Set(false),
            blind_marking: Set(blind_marking),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_assignment_by_course_module() {
        let (storage, _db) = TempDatabase::open().await;
        let id = insert_assignment(&storage, 11, true).await;

        let assignment = storage
            .get_assignment_by_course_module_impl(11)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(assignment.id, id);
        assert!(assignment.blind_marking);
        assert!(
            storage
                .get_assignment_by_course_module_impl(12)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_mapping_is_stable_and_monotonic() {
        let (storage, _db) = TempDatabase::open().await;
        let assignment = insert_assignment(&storage, 11, true).await;

        let first = storage
            .get_or_create_user_mapping_impl(assignment, 7)
            .await
            .unwrap();
        let second = storage
            .get_or_create_user_mapping_impl(assignment, 8)
            .await
            .unwrap();
        let again = storage
            .get_or_create_user_mapping_impl(assignment, 7)
            .await
            .unwrap();

        assert_eq!(first, again);
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_concurrent_first_allocation_agrees() {
        let (storage, _db) = TempDatabase::open().await;
        let assignment = insert_assignment(&storage, 11, true).await;

        for user_id in 100..130 {
            let (a, b, c) = tokio::join!(
                storage.get_or_create_user_mapping_impl(assignment, user_id),
                storage.get_or_create_user_mapping_impl(assignment, user_id),
                storage.get_or_create_user_mapping_impl(assignment, user_id),
            );
            let a = a.unwrap();
            assert_eq!(a, b.unwrap());
            assert_eq!(a, c.unwrap());
        }
    }
}
