use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::GradeAssignmentRequest;
use crate::models::users::entities::PrincipalRole;
use crate::services::AssignmentService;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出提交给本人的作业
pub async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_teacher_assignments(&req).await
}

// 评分
pub async fn grade_assignment(
    req: HttpRequest,
    body: web::Json<GradeAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .grade_assignment(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teacher")
            .wrap(middlewares::RequirePrincipal)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(PrincipalRole::Teacher))
                    .route("/assignments", web::get().to(list_assignments))
                    .route("/assignments/grade", web::post().to(grade_assignment)),
            ),
    );
}
