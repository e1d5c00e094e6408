use serde::Deserialize;

// 用户创建请求（仅用于启动时的演示数据）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}
