//! 请求参数解析错误处理
//!
//! 将 actix-web 的 JSON / Query 反序列化错误统一转换为 ValidationError 响应。

use actix_web::{
    Error, HttpRequest,
    error::{JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::errors::ClassroomError;

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("JSON payload rejected for {}: {}", req.path(), err);

    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {e}"),
        JsonPayloadError::OverflowKnownLength { length, limit } => {
            format!("Request body too large: {length} bytes (limit {limit})")
        }
        JsonPayloadError::Overflow { limit } => {
            format!("Request body too large (limit {limit} bytes)")
        }
        _ => format!("Invalid request body: {err}"),
    };

    ClassroomError::validation(message).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Query string rejected for {}: {}", req.path(), err);

    ClassroomError::validation(format!("Invalid query parameters: {err}")).into()
}
