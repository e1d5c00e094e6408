//! 作业存储操作
//!
//! 状态迁移均以条件更新实现：`WHERE id = ? AND state IN (...)`。
//! 行不再满足条件（被并发请求抢先迁移）时返回 `None`。

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{ClassroomError, Result};
use crate::models::assignments::entities::{Assignment, AssignmentState, GradeEnum};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

fn state_values(states: &[AssignmentState]) -> Vec<&'static str> {
    states.iter().map(|s| s.as_str()).collect()
}

impl SeaOrmStorage {
    /// 创建草稿
    pub async fn create_assignment_impl(
        &self,
        student_id: i64,
        content: String,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            teacher_id: Set(None),
            content: Set(content),
            grade: Set(None),
            state: Set(AssignmentState::Draft.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 修改草稿内容
    pub async fn update_assignment_content_impl(
        &self,
        assignment_id: i64,
        content: String,
    ) -> Result<Option<Assignment>> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(Column::Content, Expr::value(content))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::State.eq(AssignmentState::DRAFT))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("更新作业内容失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 提交作业：DRAFT -> SUBMITTED，同时绑定教师
    pub async fn submit_assignment_impl(
        &self,
        assignment_id: i64,
        teacher_id: i64,
    ) -> Result<Option<Assignment>> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(Column::TeacherId, Expr::value(teacher_id))
            .col_expr(Column::State, Expr::value(AssignmentState::SUBMITTED))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::State.eq(AssignmentState::DRAFT))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("提交作业失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 评分：SUBMITTED -> GRADED，或 GRADED 状态下重新评分
    pub async fn grade_assignment_impl(
        &self,
        assignment_id: i64,
        grade: GradeEnum,
    ) -> Result<Option<Assignment>> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(Column::Grade, Expr::value(grade.as_str()))
            .col_expr(Column::State, Expr::value(AssignmentState::GRADED))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::State.is_in(state_values(AssignmentState::reviewable_states())))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("作业评分失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 列出学生的全部作业
    pub async fn list_assignments_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学生作业失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 列出提交给某教师的作业
    pub async fn list_assignments_by_teacher_impl(
        &self,
        teacher_id: i64,
        states: &[AssignmentState],
    ) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::State.is_in(state_values(states)))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询教师作业失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 按状态列出全部作业
    pub async fn list_assignments_by_states_impl(
        &self,
        states: &[AssignmentState],
    ) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::State.is_in(state_values(states)))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::requests::CreateUserRequest;

    async fn storage_with_roster() -> SeaOrmStorage {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let student = storage
            .create_user_impl(CreateUserRequest {
                username: "student1".into(),
                email: "student1@example.com".into(),
            })
            .await
            .unwrap();
        let teacher = storage
            .create_user_impl(CreateUserRequest {
                username: "teacher1".into(),
                email: "teacher1@example.com".into(),
            })
            .await
            .unwrap();
        storage.create_student_impl(student.id).await.unwrap();
        storage.create_teacher_impl(teacher.id).await.unwrap();
        storage
    }

    #[actix_web::test]
    async fn test_transitions_are_conditional() {
        let storage = storage_with_roster().await;
        let draft = storage
            .create_assignment_impl(1, "ESSAY".into())
            .await
            .unwrap();

        // 草稿不可评分
        assert!(
            storage
                .grade_assignment_impl(draft.id, GradeEnum::A)
                .await
                .unwrap()
                .is_none()
        );

        let submitted = storage
            .submit_assignment_impl(draft.id, 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submitted.state, AssignmentState::Submitted);

        // 第二次提交与修改都不再命中
        assert!(storage.submit_assignment_impl(draft.id, 1).await.unwrap().is_none());
        assert!(
            storage
                .update_assignment_content_impl(draft.id, "late edit".into())
                .await
                .unwrap()
                .is_none()
        );

        let graded = storage
            .grade_assignment_impl(draft.id, GradeEnum::B)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(graded.grade, Some(GradeEnum::B));
        assert_eq!(graded.content, "ESSAY");

        let regraded = storage
            .grade_assignment_impl(draft.id, GradeEnum::A)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(regraded.grade, Some(GradeEnum::A));
        assert_eq!(regraded.state, AssignmentState::Graded);
    }

    #[actix_web::test]
    async fn test_missing_assignment_is_none() {
        let storage = storage_with_roster().await;
        assert!(storage.get_assignment_by_id_impl(7).await.unwrap().is_none());
        assert!(storage.submit_assignment_impl(7, 1).await.unwrap().is_none());
    }
}
