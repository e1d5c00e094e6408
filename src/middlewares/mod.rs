pub mod require_principal;
pub mod require_role;

pub use require_principal::RequirePrincipal;
pub use require_role::RequireRole;

use actix_web::{HttpResponse, ResponseError};

use crate::errors::ClassroomError;

// 辅助函数：创建错误响应
fn create_error_response(err: ClassroomError) -> HttpResponse {
    err.error_response()
}
