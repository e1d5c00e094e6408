use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 就绪探针响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct ReadinessResponse {
    pub status: String,
    pub time: chrono::DateTime<chrono::Utc>,
}

impl ReadinessResponse {
    pub fn ready() -> Self {
        Self {
            status: "ready".to_string(),
            time: chrono::Utc::now(),
        }
    }
}
