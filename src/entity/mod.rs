//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod assignments;
pub mod principals;
pub mod students;
pub mod teachers;
pub mod users;

use crate::models::users::entities::RoleMember;

/// 学生与教师表结构相同，共用转换逻辑
fn role_member(id: i64, user_id: i64, created_at: i64, updated_at: i64) -> RoleMember {
    use chrono::{DateTime, Utc};

    RoleMember {
        id,
        user_id,
        created_at: DateTime::<Utc>::from_timestamp(created_at, 0).unwrap_or_default(),
        updated_at: DateTime::<Utc>::from_timestamp(updated_at, 0).unwrap_or_default(),
    }
}
