use serde::Deserialize;
use ts_rs::TS;

/// 创建或修改草稿：带 id 为修改，否则为新建
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct UpsertAssignmentRequest {
    pub id: Option<i64>,
    pub content: Option<String>,
}

/// 提交作业
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct SubmitAssignmentRequest {
    pub id: i64,
    pub teacher_id: i64,
}

/// 评分请求，成绩在服务层解析以便统一返回 ValidationError
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct GradeAssignmentRequest {
    pub id: i64,
    pub grade: String,
}
