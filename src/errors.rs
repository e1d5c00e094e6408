//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称与 HTTP 状态码。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称（响应体中的 `error` 字段）
/// - status_code() 方法 - 返回 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_classroom_errors {
    ($(
        $variant:ident($code:ident, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum ClassroomError {
            $($variant(String),)*
        }

        impl ClassroomError {
            /// 获取错误代码
            pub fn code(&self) -> ErrorCode {
                match self {
                    $(ClassroomError::$variant(_) => ErrorCode::$code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn http_status(&self) -> StatusCode {
                match self {
                    $(ClassroomError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassroomError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ClassroomError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassroomError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classroom_errors! {
    DatabaseConfig(DatabaseConfig, "DatabaseConfigError", INTERNAL_SERVER_ERROR),
    DatabaseConnection(DatabaseConnection, "DatabaseConnectionError", INTERNAL_SERVER_ERROR),
    DatabaseOperation(DatabaseOperation, "DatabaseOperationError", INTERNAL_SERVER_ERROR),
    Serialization(Serialization, "SerializationError", INTERNAL_SERVER_ERROR),
    Validation(ValidationFailed, "ValidationError", BAD_REQUEST),
    State(IllegalStateTransition, "StateError", BAD_REQUEST),
    Authorization(NotResourceOwner, "AuthorizationError", BAD_REQUEST),
    NotFound(ResourceNotFound, "NotFoundError", NOT_FOUND),
    Authentication(Unauthorized, "AuthenticationError", UNAUTHORIZED),
    Forbidden(Forbidden, "AuthenticationError", FORBIDDEN),
}

impl ClassroomError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClassroomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassroomError {}

impl ResponseError for ClassroomError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.http_status().is_server_error() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(self.http_status()).json(ApiResponse::from_error(self))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClassroomError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClassroomError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ClassroomError {
    fn from(err: serde_json::Error) -> Self {
        ClassroomError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ClassroomError::database_config("test").code(),
            ErrorCode::DatabaseConfig
        );
        assert_eq!(
            ClassroomError::validation("test").code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            ClassroomError::state("test").code(),
            ErrorCode::IllegalStateTransition
        );
        assert_eq!(
            ClassroomError::authentication("test").code(),
            ErrorCode::Unauthorized
        );
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassroomError::validation("test").error_type(),
            "ValidationError"
        );
        assert_eq!(ClassroomError::state("test").error_type(), "StateError");
        assert_eq!(
            ClassroomError::authorization("test").error_type(),
            "AuthorizationError"
        );
        assert_eq!(
            ClassroomError::not_found("test").error_type(),
            "NotFoundError"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(
            ClassroomError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ClassroomError::state("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ClassroomError::authorization("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ClassroomError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ClassroomError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ClassroomError::forbidden("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ClassroomError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message() {
        let err = ClassroomError::state("only a draft assignment can be submitted");
        assert_eq!(err.message(), "only a draft assignment can be submitted");
    }

    #[test]
    fn test_format_simple() {
        let err = ClassroomError::validation("content must not be null");
        let formatted = err.format_simple();
        assert!(formatted.contains("ValidationError"));
        assert!(formatted.contains("content must not be null"));
    }

    #[test]
    fn test_db_err_conversion() {
        let err: ClassroomError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.error_type(), "DatabaseOperationError");
        assert!(err.message().contains("boom"));
    }
}
