use crate::config::AppConfig;
use crate::models::users::entities::PrincipalRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

// 演示数据：(用户名, 角色)
const DEMO_USERS: [(&str, PrincipalRole); 5] = [
    ("student1", PrincipalRole::Student),
    ("student2", PrincipalRole::Student),
    ("teacher1", PrincipalRole::Teacher),
    ("teacher2", PrincipalRole::Teacher),
    ("principal1", PrincipalRole::Principal),
];

// 演示作业：(学生 id, 教师 id, 内容)，教师为空的保持草稿
const DEMO_ASSIGNMENTS: [(i64, Option<i64>, &str); 5] = [
    (1, Some(1), "ESSAY T1"),
    (1, Some(2), "THESIS T1"),
    (2, Some(2), "ESSAY T2"),
    (2, Some(2), "THESIS T2"),
    (1, None, "SOLUTION T1"),
];

async fn seed_roster(storage: &Arc<dyn Storage>) -> crate::errors::Result<()> {
    for (username, role) in DEMO_USERS {
        let email = format!("{username}@classroom.local");
        // 已存在的演示账号直接复用
        let user = match storage.get_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                storage
                    .create_user(CreateUserRequest {
                        username: username.to_string(),
                        email,
                    })
                    .await?
            }
        };

        let role_id = match role {
            PrincipalRole::Student => storage.create_student(user.id).await?.id,
            PrincipalRole::Teacher => storage.create_teacher(user.id).await?.id,
            PrincipalRole::Principal => storage.create_principal(user.id).await?.id,
        };
        debug!("Seeded {} {} {} (user {})", role, role_id, username, user.id);
    }
    Ok(())
}

async fn seed_assignments(storage: &Arc<dyn Storage>) -> crate::errors::Result<()> {
    for (student_id, teacher_id, content) in DEMO_ASSIGNMENTS {
        let assignment = storage
            .create_assignment(student_id, content.to_string())
            .await?;
        if let Some(teacher_id) = teacher_id {
            storage.submit_assignment(assignment.id, teacher_id).await?;
        }
    }
    Ok(())
}

/// 写入演示数据
/// 仅当数据库中没有任何用户时执行，失败只记录日志
pub async fn seed_demo_data(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping demo seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, seeding demo roster and assignments...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping demo seed", e);
            return;
        }
    }

    if let Err(e) = seed_roster(storage).await {
        warn!("Failed to seed demo roster: {}", e);
        return;
    }

    match seed_assignments(storage).await {
        Ok(()) => info!(
            "Demo data seeded: {} users, {} assignments",
            DEMO_USERS.len(),
            DEMO_ASSIGNMENTS.len()
        ),
        Err(e) => warn!("Failed to seed demo assignments: {}", e),
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 写入演示数据（如果需要）
    if AppConfig::get().app.seed_demo_data {
        seed_demo_data(&storage).await;
    }

    StartupContext { storage }
}
