/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequirePrincipal 中间件之后使用，用于验证调用者是否具有特定角色。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::{RequirePrincipal, RequireRole};
 * use crate::models::users::entities::PrincipalRole;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/principal")
 *                 .wrap(RequirePrincipal)  // 先验证身份
 *                 .service(
 *                     web::scope("")
 *                         .wrap(RequireRole::new(PrincipalRole::Principal))  // 再验证角色
 *                         .route("/teachers", web::get().to(list_teachers))
 *                 )
 *         )
 * })
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::{
    errors::ClassroomError, middlewares::RequirePrincipal,
    models::users::entities::PrincipalRole,
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_role: PrincipalRole,
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: PrincipalRole) -> Self {
        Self {
            required_role: role,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_role: self.required_role,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_role: PrincipalRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let required_role = self.required_role;

        Box::pin(async move {
            match RequirePrincipal::extract_role(req.request()) {
                Some(role) if role == required_role => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(role) => {
                    info!(
                        "Access denied for {} to {}. Required role: {}",
                        role,
                        req.path(),
                        required_role
                    );
                    Ok(req.into_response(
                        create_error_response(ClassroomError::forbidden(format!(
                            "requester should be a {required_role}"
                        )))
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: No principal found in request. Make sure RequirePrincipal middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(ClassroomError::authentication(
                            "Authentication required",
                        ))
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
