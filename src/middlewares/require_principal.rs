/*!
 * 调用者身份认证中间件
 *
 * 此中间件解析 `X-Principal` 请求头，确认调用者身份后才允许访问受保护的路由。
 *
 * ## 使用方法
 *
 * 1. 在路由上应用中间件：
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::RequirePrincipal;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/student")
 *                 .wrap(RequirePrincipal)  // 应用身份认证中间件
 *                 .route("/assignments", web::get().to(list_assignments))
 *         )
 * })
 * ```
 *
 * 2. 在处理程序中提取调用者信息：
 * ```rust,ignore
 * async fn list_assignments(req: HttpRequest) -> Result<HttpResponse> {
 *     if let Some(principal) = RequirePrincipal::extract_principal(&req) {
 *         return Ok(HttpResponse::Ok().json(format!("role: {}", principal.role)));
 *     }
 *     Ok(HttpResponse::InternalServerError().finish())
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中携带 `X-Principal: {"user_id": 1, "student_id": 1}`
 *    （`student_id` / `teacher_id` / `principal_id` 必须且只能出现一个）
 * 2. 中间件解析请求头，并在存储中确认该角色记录存在且属于该用户
 * 3. 校验通过后将 `AuthPrincipal` 存入请求扩展，继续处理请求
 * 4. 请求头缺失、格式错误或身份不存在时返回 401
 */

use crate::errors::ClassroomError;
use crate::models::users::entities::{AuthPrincipal, PrincipalRole};
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde::Deserialize;
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

pub const PRINCIPAL_HEADER: &str = "X-Principal";

#[derive(Clone)]
pub struct RequirePrincipal;

/// `X-Principal` 请求头的 JSON 结构
#[derive(Debug, Deserialize)]
struct PrincipalHeader {
    user_id: i64,
    student_id: Option<i64>,
    teacher_id: Option<i64>,
    principal_id: Option<i64>,
}

/// 解析请求头，要求恰好携带一个角色 ID
pub fn parse_principal_header(raw: &str) -> Result<AuthPrincipal, String> {
    let header: PrincipalHeader =
        serde_json::from_str(raw).map_err(|e| format!("Malformed principal header: {e}"))?;

    let roles = [
        (PrincipalRole::Student, header.student_id),
        (PrincipalRole::Teacher, header.teacher_id),
        (PrincipalRole::Principal, header.principal_id),
    ];
    let mut present = roles
        .into_iter()
        .filter_map(|(role, id)| id.map(|id| (role, id)));

    match (present.next(), present.next()) {
        (Some((role, role_id)), None) => Ok(AuthPrincipal {
            user_id: header.user_id,
            role,
            role_id,
        }),
        (None, _) => Err("Principal header carries no role id".to_string()),
        (Some(_), Some(_)) => Err("Principal header carries more than one role id".to_string()),
    }
}

// 辅助函数：确认角色记录存在且属于该用户
async fn verify_principal(
    storage: &Arc<dyn Storage>,
    principal: &AuthPrincipal,
) -> Result<(), String> {
    let owner = match principal.role {
        PrincipalRole::Student => storage
            .get_student_by_id(principal.role_id)
            .await
            .map(|s| s.map(|s| s.user_id)),
        PrincipalRole::Teacher => storage
            .get_teacher_by_id(principal.role_id)
            .await
            .map(|t| t.map(|t| t.user_id)),
        PrincipalRole::Principal => storage
            .get_principal_by_id(principal.role_id)
            .await
            .map(|p| p.map(|p| p.user_id)),
    }
    .map_err(|e| format!("Failed to retrieve principal from storage: {e}"))?;

    match owner {
        Some(user_id) if user_id == principal.user_id => Ok(()),
        Some(_) => Err(format!("{} does not belong to this user", principal.role)),
        None => Err("principal not found".to_string()),
    }
}

// 辅助函数：提取并验证调用者身份
async fn extract_and_validate_principal(req: &ServiceRequest) -> Result<AuthPrincipal, String> {
    let raw = req
        .headers()
        .get(PRINCIPAL_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| "principal not found".to_string())?;

    let principal = parse_principal_header(raw)?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not found in app data".to_string())?
        .get_ref()
        .clone();

    verify_principal(&storage, &principal).await?;

    Ok(principal)
}

impl<S, B> Transform<S, ServiceRequest> for RequirePrincipal
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePrincipalMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePrincipalMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequirePrincipalMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequirePrincipalMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    HttpResponse::build(StatusCode::NO_CONTENT)
                        .finish()
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_principal(&req).await {
                Ok(principal) => {
                    debug!(
                        "Principal authenticated: user {} as {} {}",
                        principal.user_id, principal.role, principal.role_id
                    );
                    req.extensions_mut().insert(principal);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "Principal authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(ClassroomError::authentication(err))
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取调用者信息
impl RequirePrincipal {
    /// 从请求扩展中提取调用者
    /// 此函数应该在应用了RequirePrincipal中间件的路由处理程序中使用
    pub fn extract_principal(req: &actix_web::HttpRequest) -> Option<AuthPrincipal> {
        req.extensions().get::<AuthPrincipal>().copied()
    }

    /// 从请求扩展中提取调用者角色
    pub fn extract_role(req: &actix_web::HttpRequest) -> Option<PrincipalRole> {
        req.extensions()
            .get::<AuthPrincipal>()
            .map(|principal| principal.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_student_header() {
        let principal = parse_principal_header(r#"{"user_id": 1, "student_id": 1}"#).unwrap();
        assert_eq!(
            principal,
            AuthPrincipal {
                user_id: 1,
                role: PrincipalRole::Student,
                role_id: 1,
            }
        );
    }

    #[test]
    fn test_parse_teacher_and_principal_headers() {
        let teacher = parse_principal_header(r#"{"teacher_id": 2, "user_id": 4}"#).unwrap();
        assert_eq!(teacher.role, PrincipalRole::Teacher);
        assert_eq!(teacher.role_id, 2);
        assert_eq!(teacher.user_id, 4);

        let principal = parse_principal_header(r#"{"principal_id": 1, "user_id": 5}"#).unwrap();
        assert_eq!(principal.role, PrincipalRole::Principal);
    }

    #[test]
    fn test_reject_malformed_headers() {
        assert!(parse_principal_header("not json").is_err());
        assert!(parse_principal_header(r#"{"student_id": 1}"#).is_err());
        assert!(parse_principal_header(r#"{"user_id": 1}"#).is_err());
        assert!(
            parse_principal_header(r#"{"user_id": 1, "student_id": 1, "teacher_id": 1}"#)
                .is_err()
        );
    }
}
