use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AssignmentService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::assignments::entities::{Assignment, AssignmentState};
use crate::storage::Storage;

/// 学生本人的全部作业，包括草稿
pub async fn list_for_student(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<Vec<Assignment>> {
    storage.list_assignments_by_student(student_id).await
}

/// 提交给该教师的作业（SUBMITTED / GRADED）
pub async fn list_for_teacher(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
) -> Result<Vec<Assignment>> {
    storage
        .list_assignments_by_teacher(teacher_id, AssignmentState::reviewable_states())
        .await
}

/// 全校已提交或已评分的作业
pub async fn list_for_principal(storage: &Arc<dyn Storage>) -> Result<Vec<Assignment>> {
    storage
        .list_assignments_by_states(AssignmentState::reviewable_states())
        .await
}

pub async fn list_student_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let principal = service.get_principal(request)?;

    let assignments = list_for_student(&storage, principal.role_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignments,
        "Assignments retrieved successfully",
    )))
}

pub async fn list_teacher_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let principal = service.get_principal(request)?;

    let assignments = list_for_teacher(&storage, principal.role_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignments,
        "Assignments retrieved successfully",
    )))
}

pub async fn list_principal_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let assignments = list_for_principal(&storage).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignments,
        "Assignments retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::Grader;
    use crate::services::assignments::{create_draft, grade, submit, test_support::roster};

    #[actix_web::test]
    async fn test_lists_without_submissions_are_empty() {
        let storage = roster().await;
        // 只有草稿时，教师与校长都看不到
        create_draft(&storage, 1, Some("SOLUTION T1".into())).await.unwrap();

        assert!(list_for_teacher(&storage, 1).await.unwrap().is_empty());
        assert!(list_for_teacher(&storage, 2).await.unwrap().is_empty());
        assert!(list_for_principal(&storage).await.unwrap().is_empty());
        assert_eq!(list_for_student(&storage, 1).await.unwrap().len(), 1);
        assert!(list_for_student(&storage, 2).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_lists_are_scoped_and_ordered() {
        let storage = roster().await;

        let a = create_draft(&storage, 1, Some("ESSAY T1".into())).await.unwrap();
        let b = create_draft(&storage, 2, Some("ESSAY T2".into())).await.unwrap();
        let c = create_draft(&storage, 1, Some("THESIS T1".into())).await.unwrap();
        let draft = create_draft(&storage, 1, Some("SOLUTION T1".into())).await.unwrap();
        submit(&storage, a.id, 1, 1).await.unwrap();
        submit(&storage, b.id, 2, 2).await.unwrap();
        submit(&storage, c.id, 1, 2).await.unwrap();
        grade(&storage, c.id, Grader::Teacher(2), "D").await.unwrap();

        let ids = |list: Vec<Assignment>| list.into_iter().map(|a| a.id).collect::<Vec<_>>();

        assert_eq!(
            ids(list_for_student(&storage, 1).await.unwrap()),
            vec![a.id, c.id, draft.id]
        );
        assert_eq!(ids(list_for_student(&storage, 2).await.unwrap()), vec![b.id]);
        assert_eq!(ids(list_for_teacher(&storage, 1).await.unwrap()), vec![a.id]);
        assert_eq!(
            ids(list_for_teacher(&storage, 2).await.unwrap()),
            vec![b.id, c.id]
        );
        assert_eq!(
            ids(list_for_principal(&storage).await.unwrap()),
            vec![a.id, b.id, c.id]
        );
    }
}
