//! 作业生命周期服务
//!
//! 每个操作拆分为两层：
//! - 纯业务函数（`create_draft`、`submit`、`grade` 等）只依赖 `Storage`，返回领域错误
//! - `AssignmentService` 的同名方法从请求中取出存储与调用者，包装为统一响应

pub mod grade;
pub mod list;
pub mod submit;
pub mod upsert;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{ClassroomError, Result};
use crate::middlewares::RequirePrincipal;
use crate::models::assignments::requests::{
    GradeAssignmentRequest, SubmitAssignmentRequest, UpsertAssignmentRequest,
};
use crate::models::users::entities::AuthPrincipal;
use crate::storage::Storage;

pub use grade::grade;
pub use list::{list_for_principal, list_for_student, list_for_teacher};
pub use submit::submit;
pub use upsert::{create_draft, edit_draft};

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        if let Some(storage) = &self.storage {
            return Ok(storage.clone());
        }
        request
            .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
            .map(|data| data.get_ref().clone())
            .ok_or_else(|| ClassroomError::database_connection("Storage not found in app data"))
    }

    pub(crate) fn get_principal(&self, request: &HttpRequest) -> Result<AuthPrincipal> {
        RequirePrincipal::extract_principal(request)
            .ok_or_else(|| ClassroomError::authentication("principal not found"))
    }

    pub async fn list_student_assignments(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_student_assignments(self, request).await
    }

    pub async fn upsert_assignment(
        &self,
        request: &HttpRequest,
        req: UpsertAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        upsert::upsert_assignment(self, request, req).await
    }

    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        req: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, request, req).await
    }

    pub async fn list_teacher_assignments(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_teacher_assignments(self, request).await
    }

    pub async fn list_principal_assignments(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_principal_assignments(self, request).await
    }

    pub async fn grade_assignment(
        &self,
        request: &HttpRequest,
        req: GradeAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_assignment(self, request, req).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    /// 内存数据库：学生 1、2，教师 1、2，校长 1
    pub async fn roster() -> Arc<dyn Storage> {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::new_in_memory()
                .await
                .expect("in-memory storage"),
        );

        let mut user_ids = Vec::new();
        for name in ["student1", "student2", "teacher1", "teacher2", "principal1"] {
            let user = storage
                .create_user(CreateUserRequest {
                    username: name.to_string(),
                    email: format!("{name}@example.com"),
                })
                .await
                .expect("create user");
            user_ids.push(user.id);
        }
        storage.create_student(user_ids[0]).await.expect("student 1");
        storage.create_student(user_ids[1]).await.expect("student 2");
        storage.create_teacher(user_ids[2]).await.expect("teacher 1");
        storage.create_teacher(user_ids[3]).await.expect("teacher 2");
        storage
            .create_principal(user_ids[4])
            .await
            .expect("principal 1");

        storage
    }
}
