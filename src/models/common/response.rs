use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::ClassroomError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    /// 错误类型标签，仅在失败时出现
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            error: None,
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error_empty(
        code: ErrorCode,
        error_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            error: Some(error_type.into()),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn from_error(err: &ClassroomError) -> Self {
        Self::error_empty(err.code(), err.error_type(), err.message())
    }
}
