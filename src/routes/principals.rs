use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::GradeAssignmentRequest;
use crate::models::users::entities::PrincipalRole;
use crate::services::{AssignmentService, TeacherService};

// 懒加载的全局服务实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

// 列出全校已提交或已评分的作业
pub async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_principal_assignments(&req).await
}

// 评分或重新评分，不受教师绑定约束
pub async fn grade_assignment(
    req: HttpRequest,
    body: web::Json<GradeAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .grade_assignment(&req, body.into_inner())
        .await
}

// 列出全部教师
pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(&req).await
}

// 配置路由
pub fn configure_principal_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/principal")
            .wrap(middlewares::RequirePrincipal)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(PrincipalRole::Principal))
                    .route("/assignments", web::get().to(list_assignments))
                    .route("/assignments/grade", web::post().to(grade_assignment))
                    .route("/teachers", web::get().to(list_teachers)),
            ),
    );
}
