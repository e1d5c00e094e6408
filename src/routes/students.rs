use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{SubmitAssignmentRequest, UpsertAssignmentRequest};
use crate::models::users::entities::PrincipalRole;
use crate::services::AssignmentService;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出本人作业
pub async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_student_assignments(&req).await
}

// 创建或修改草稿
pub async fn upsert_assignment(
    req: HttpRequest,
    body: web::Json<UpsertAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .upsert_assignment(&req, body.into_inner())
        .await
}

// 提交作业
pub async fn submit_assignment(
    req: HttpRequest,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit_assignment(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/student")
            .wrap(middlewares::RequirePrincipal)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(PrincipalRole::Student))
                    .service(
                        web::resource("/assignments")
                            .route(web::get().to(list_assignments))
                            .route(web::post().to(upsert_assignment)),
                    )
                    .route("/assignments/submit", web::post().to(submit_assignment)),
            ),
    );
}
