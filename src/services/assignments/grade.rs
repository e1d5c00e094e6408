use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::AssignmentService;
use crate::errors::{ClassroomError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{
    entities::{Assignment, GradeEnum, Grader},
    requests::GradeAssignmentRequest,
};
use crate::models::users::entities::PrincipalRole;
use crate::storage::Storage;

/// 评分
///
/// 检查顺序：成绩取值 -> 作业存在 -> 状态 -> 教师绑定（校长跳过）。
/// 已评分的作业可以重新评分。
pub async fn grade(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
    grader: Grader,
    grade_value: &str,
) -> Result<Assignment> {
    let grade: GradeEnum = grade_value
        .parse()
        .map_err(|e: String| ClassroomError::validation(format!("grade: {e}")))?;

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found("No assignment with this id was found"))?;
    assignment.ensure_gradable_by(&grader)?;

    storage
        .grade_assignment(assignment_id, grade)
        .await?
        .ok_or_else(|| ClassroomError::state("only a submitted assignment can be graded"))
}

pub async fn grade_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    req: GradeAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let principal = service.get_principal(request)?;

    let grader = match principal.role {
        PrincipalRole::Teacher => Grader::Teacher(principal.role_id),
        PrincipalRole::Principal => Grader::Principal(principal.role_id),
        PrincipalRole::Student => {
            return Err(ClassroomError::forbidden("requester should be a teacher").into());
        }
    };

    let assignment = grade(&storage, req.id, grader, &req.grade).await?;
    info!(
        "{} {} graded assignment {} with {}",
        principal.role,
        grader.id(),
        assignment.id,
        req.grade
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignment,
        "Assignment graded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentState;
    use crate::services::assignments::{create_draft, submit, test_support::roster};

    async fn submitted_to(storage: &Arc<dyn Storage>, teacher_id: i64) -> Assignment {
        let draft = create_draft(storage, 1, Some("ABCD".into())).await.unwrap();
        submit(storage, draft.id, 1, teacher_id).await.unwrap()
    }

    #[actix_web::test]
    async fn test_lifecycle_with_regrade() {
        let storage = roster().await;
        let assignment = submitted_to(&storage, 2).await;

        let graded = grade(&storage, assignment.id, Grader::Teacher(2), "A")
            .await
            .unwrap();
        assert_eq!(graded.state, AssignmentState::Graded);
        assert_eq!(graded.grade, Some(GradeEnum::A));

        let regraded = grade(&storage, assignment.id, Grader::Teacher(2), "B")
            .await
            .unwrap();
        assert_eq!(regraded.state, AssignmentState::Graded);
        assert_eq!(regraded.grade, Some(GradeEnum::B));
        assert_eq!(regraded.teacher_id, Some(2));

        let err = grade(&storage, assignment.id, Grader::Teacher(1), "A")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClassroomError::authorization("This assignment belongs to some other teacher")
        );
    }

    #[actix_web::test]
    async fn test_principal_bypasses_teacher_binding() {
        let storage = roster().await;
        let assignment = submitted_to(&storage, 1).await;

        let graded = grade(&storage, assignment.id, Grader::Principal(1), "C")
            .await
            .unwrap();
        assert_eq!(graded.grade, Some(GradeEnum::C));
        assert_eq!(graded.teacher_id, Some(1));
    }

    #[actix_web::test]
    async fn test_draft_cannot_be_graded() {
        let storage = roster().await;
        let draft = create_draft(&storage, 1, Some("ABCD".into())).await.unwrap();

        for grader in [Grader::Teacher(1), Grader::Principal(1)] {
            let err = grade(&storage, draft.id, grader, "A").await.unwrap_err();
            assert_eq!(
                err,
                ClassroomError::state("only a submitted assignment can be graded")
            );
        }
    }

    #[actix_web::test]
    async fn test_grade_value_checked_before_anything_else() {
        let storage = roster().await;

        // 不存在的作业，非法成绩仍优先报 ValidationError
        let err = grade(&storage, 999, Grader::Teacher(1), "AB")
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "ValidationError");

        let err = grade(&storage, 999, Grader::Teacher(1), "A")
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "NotFoundError");
    }

    #[actix_web::test]
    async fn test_bad_grade_rejected_in_every_state() {
        let storage = roster().await;
        let draft = create_draft(&storage, 1, Some("DRAFT".into())).await.unwrap();
        let submitted = submitted_to(&storage, 1).await;
        let graded = submitted_to(&storage, 1).await;
        grade(&storage, graded.id, Grader::Teacher(1), "B").await.unwrap();

        for id in [draft.id, submitted.id, graded.id] {
            for grader in [Grader::Teacher(1), Grader::Principal(1)] {
                let err = grade(&storage, id, grader, "Z").await.unwrap_err();
                assert_eq!(err.error_type(), "ValidationError", "assignment {id}");
            }
        }

        // 状态与成绩保持不变
        let stored = storage.get_assignment_by_id(graded.id).await.unwrap().unwrap();
        assert_eq!(stored.grade, Some(GradeEnum::B));
        let stored = storage.get_assignment_by_id(draft.id).await.unwrap().unwrap();
        assert_eq!(stored.state, AssignmentState::Draft);
    }
}
