use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::AssignmentService;
use crate::errors::{ClassroomError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{entities::Assignment, requests::SubmitAssignmentRequest};
use crate::storage::Storage;

const SUBMIT_STATE_ERROR: &str = "only a draft assignment can be submitted";

/// 提交草稿并绑定教师
pub async fn submit(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
    student_id: i64,
    teacher_id: i64,
) -> Result<Assignment> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found("No assignment with this id was found"))?;
    assignment.ensure_submittable_by(student_id)?;

    if storage.get_teacher_by_id(teacher_id).await?.is_none() {
        return Err(ClassroomError::validation(format!(
            "teacher_id: Invalid pk \"{teacher_id}\" - object does not exist."
        )));
    }

    storage
        .submit_assignment(assignment_id, teacher_id)
        .await?
        .ok_or_else(|| ClassroomError::state(SUBMIT_STATE_ERROR))
}

pub async fn submit_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    req: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let principal = service.get_principal(request)?;

    let assignment = submit(&storage, req.id, principal.role_id, req.teacher_id).await?;
    info!(
        "Student {} submitted assignment {} to teacher {}",
        principal.role_id, assignment.id, req.teacher_id
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignment,
        "Assignment submitted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentState;
    use crate::services::assignments::{create_draft, test_support::roster};

    #[actix_web::test]
    async fn test_submit_binds_teacher() {
        let storage = roster().await;
        let draft = create_draft(&storage, 1, Some("ABCD".into())).await.unwrap();

        let submitted = submit(&storage, draft.id, 1, 2).await.unwrap();
        assert_eq!(submitted.state, AssignmentState::Submitted);
        assert_eq!(submitted.teacher_id, Some(2));
        assert_eq!(submitted.content, "ABCD");
    }

    #[actix_web::test]
    async fn test_resubmit_is_state_error() {
        let storage = roster().await;
        let draft = create_draft(&storage, 1, Some("ABCD".into())).await.unwrap();
        submit(&storage, draft.id, 1, 2).await.unwrap();

        let err = submit(&storage, draft.id, 1, 1).await.unwrap_err();
        assert_eq!(err, ClassroomError::state(SUBMIT_STATE_ERROR));

        // 教师绑定保持不变
        let stored = storage.get_assignment_by_id(draft.id).await.unwrap().unwrap();
        assert_eq!(stored.teacher_id, Some(2));
    }

    #[actix_web::test]
    async fn test_submit_rejections() {
        let storage = roster().await;
        let draft = create_draft(&storage, 1, Some("ABCD".into())).await.unwrap();

        let err = submit(&storage, draft.id, 2, 1).await.unwrap_err();
        assert_eq!(err.error_type(), "AuthorizationError");

        let err = submit(&storage, 999, 1, 1).await.unwrap_err();
        assert_eq!(err.error_type(), "NotFoundError");

        let err = submit(&storage, draft.id, 1, 42).await.unwrap_err();
        assert_eq!(err.error_type(), "ValidationError");

        let stored = storage.get_assignment_by_id(draft.id).await.unwrap().unwrap();
        assert_eq!(stored.state, AssignmentState::Draft);
    }
}
