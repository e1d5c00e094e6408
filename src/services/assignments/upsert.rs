use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::AssignmentService;
use crate::errors::{ClassroomError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{entities::Assignment, requests::UpsertAssignmentRequest};
use crate::storage::Storage;

fn require_content(content: Option<String>) -> Result<String> {
    content.ok_or_else(|| ClassroomError::validation("content: Field may not be null."))
}

/// 新建草稿，空字符串内容是合法的
pub async fn create_draft(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    content: Option<String>,
) -> Result<Assignment> {
    let content = require_content(content)?;
    storage.create_assignment(student_id, content).await
}

/// 修改草稿内容
pub async fn edit_draft(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
    student_id: i64,
    content: Option<String>,
) -> Result<Assignment> {
    let content = require_content(content)?;

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found("No assignment with this id was found"))?;
    assignment.ensure_editable_by(student_id)?;

    // 条件更新未命中说明已被并发提交
    storage
        .update_assignment_content(assignment_id, content)
        .await?
        .ok_or_else(|| ClassroomError::state("only assignment in draft state can be edited"))
}

pub async fn upsert_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    req: UpsertAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let principal = service.get_principal(request)?;

    let assignment = match req.id {
        Some(assignment_id) => {
            edit_draft(&storage, assignment_id, principal.role_id, req.content).await?
        }
        None => {
            let assignment = create_draft(&storage, principal.role_id, req.content).await?;
            info!(
                "Student {} created draft assignment {}",
                principal.role_id, assignment.id
            );
            assignment
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignment,
        "Assignment saved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentState;
    use crate::services::assignments::test_support::roster;

    #[actix_web::test]
    async fn test_create_draft_accepts_empty_content() {
        let storage = roster().await;

        let draft = create_draft(&storage, 1, Some(String::new())).await.unwrap();
        assert_eq!(draft.state, AssignmentState::Draft);
        assert_eq!(draft.content, "");
        assert_eq!(draft.teacher_id, None);
        assert_eq!(draft.grade, None);
    }

    #[actix_web::test]
    async fn test_create_draft_rejects_null_content() {
        let storage = roster().await;

        let err = create_draft(&storage, 1, None).await.unwrap_err();
        assert_eq!(err.error_type(), "ValidationError");
    }

    #[actix_web::test]
    async fn test_edit_draft_updates_content() {
        let storage = roster().await;
        let draft = create_draft(&storage, 1, Some("ABCD".into())).await.unwrap();

        let edited = edit_draft(&storage, draft.id, 1, Some("ABCD TESTPOST".into()))
            .await
            .unwrap();
        assert_eq!(edited.id, draft.id);
        assert_eq!(edited.content, "ABCD TESTPOST");
        assert_eq!(edited.state, AssignmentState::Draft);
    }

    #[actix_web::test]
    async fn test_edit_draft_rejections() {
        let storage = roster().await;
        let draft = create_draft(&storage, 1, Some("ABCD".into())).await.unwrap();

        let err = edit_draft(&storage, draft.id, 2, Some("X".into()))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClassroomError::authorization("This assignment belongs to some other student")
        );

        let err = edit_draft(&storage, 999, 1, Some("X".into()))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "NotFoundError");

        let err = edit_draft(&storage, draft.id, 1, None).await.unwrap_err();
        assert_eq!(err.error_type(), "ValidationError");

        storage.submit_assignment(draft.id, 1).await.unwrap();
        let err = edit_draft(&storage, draft.id, 1, Some("X".into()))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClassroomError::state("only assignment in draft state can be edited")
        );
    }
}
