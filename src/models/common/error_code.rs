use serde::Serialize;

/// 响应体中的数值错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 请求错误 (1xxx)
    ValidationFailed = 1001,
    IllegalStateTransition = 1002,
    NotResourceOwner = 1003,

    // 认证错误 (2xxx)
    Unauthorized = 2001,
    Forbidden = 2002,

    // 资源错误 (4xxx)
    ResourceNotFound = 4004,

    // 服务端错误 (5xxx)
    DatabaseConfig = 5001,
    DatabaseConnection = 5002,
    DatabaseOperation = 5003,
    Serialization = 5004,
}
