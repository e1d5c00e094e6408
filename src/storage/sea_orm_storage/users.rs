//! 用户与角色存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{
    PrincipalActiveModel, Principals, StudentActiveModel, Students, TeacherActiveModel, Teachers,
};
use crate::entity::teachers::Column as TeacherColumn;
use crate::entity::users::{ActiveModel, Column as UserColumn, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::users::{
    entities::{Principal, Student, Teacher, User},
    requests::CreateUserRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(UserColumn::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("统计用户数量失败: {e}")))
    }

    /// 登记学生
    pub async fn create_student_impl(&self, user_id: i64) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = StudentActiveModel {
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 登记教师
    pub async fn create_teacher_impl(&self, user_id: i64) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = TeacherActiveModel {
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 登记校长
    pub async fn create_principal_impl(&self, user_id: i64) -> Result<Principal> {
        let now = chrono::Utc::now().timestamp();

        let model = PrincipalActiveModel {
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建校长失败: {e}")))?;

        Ok(result.into_principal())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 通过 ID 获取校长
    pub async fn get_principal_by_id_impl(
        &self,
        principal_id: i64,
    ) -> Result<Option<Principal>> {
        let result = Principals::find_by_id(principal_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询校长失败: {e}")))?;

        Ok(result.map(|m| m.into_principal()))
    }

    /// 列出全部教师
    pub async fn list_teachers_impl(&self) -> Result<Vec<Teacher>> {
        let results = Teachers::find()
            .order_by_asc(TeacherColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_teacher()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: name.to_string(),
            email: format!("{name}@example.com"),
        }
    }

    #[actix_web::test]
    async fn test_user_and_role_lookup() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        assert_eq!(storage.count_users_impl().await.unwrap(), 0);

        let user = storage.create_user_impl(request("teacher1")).await.unwrap();
        let fetched = storage
            .get_user_by_email_impl("teacher1@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, user.id);
        assert_eq!(fetched.username, "teacher1");
        assert!(
            storage
                .get_user_by_email_impl("nobody@example.com")
                .await
                .unwrap()
                .is_none()
        );

        let teacher = storage.create_teacher_impl(user.id).await.unwrap();
        assert_eq!(teacher.user_id, user.id);
        assert!(storage.get_teacher_by_id_impl(teacher.id).await.unwrap().is_some());
        assert!(storage.get_student_by_id_impl(teacher.id).await.unwrap().is_none());
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_duplicate_username_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage.create_user_impl(request("student1")).await.unwrap();

        let err = storage
            .create_user_impl(request("student1"))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "DatabaseOperationError");
    }

    #[actix_web::test]
    async fn test_role_requires_existing_user() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        assert!(storage.create_principal_impl(42).await.is_err());
    }
}
