use std::sync::Arc;

use crate::models::{
    assignments::entities::{Assignment, AssignmentState, GradeEnum},
    users::{
        entities::{Principal, Student, Teacher, User},
        requests::CreateUserRequest,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 角色管理方法
    // 将用户登记为学生
    async fn create_student(&self, user_id: i64) -> Result<Student>;
    // 将用户登记为教师
    async fn create_teacher(&self, user_id: i64) -> Result<Teacher>;
    // 将用户登记为校长
    async fn create_principal(&self, user_id: i64) -> Result<Principal>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    // 通过ID获取教师
    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>>;
    // 通过ID获取校长
    async fn get_principal_by_id(&self, principal_id: i64) -> Result<Option<Principal>>;
    // 列出全部教师
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;

    /// 作业管理方法
    // 创建草稿
    async fn create_assignment(&self, student_id: i64, content: String) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 修改草稿内容（仅当仍为 DRAFT 时生效）
    async fn update_assignment_content(
        &self,
        assignment_id: i64,
        content: String,
    ) -> Result<Option<Assignment>>;
    // 提交作业（仅当仍为 DRAFT 时生效）
    async fn submit_assignment(
        &self,
        assignment_id: i64,
        teacher_id: i64,
    ) -> Result<Option<Assignment>>;
    // 评分（仅当为 SUBMITTED/GRADED 时生效）
    async fn grade_assignment(
        &self,
        assignment_id: i64,
        grade: GradeEnum,
    ) -> Result<Option<Assignment>>;
    // 列出学生的全部作业
    async fn list_assignments_by_student(&self, student_id: i64) -> Result<Vec<Assignment>>;
    // 列出提交给某教师且处于给定状态的作业
    async fn list_assignments_by_teacher(
        &self,
        teacher_id: i64,
        states: &[AssignmentState],
    ) -> Result<Vec<Assignment>>;
    // 列出处于给定状态的全部作业
    async fn list_assignments_by_states(
        &self,
        states: &[AssignmentState],
    ) -> Result<Vec<Assignment>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
