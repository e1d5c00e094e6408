use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 调用者角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum PrincipalRole {
    Student,   // 学生
    Teacher,   // 教师
    Principal, // 校长
}

impl PrincipalRole {
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";
    pub const PRINCIPAL: &'static str = "principal";
}

impl<'de> Deserialize<'de> for PrincipalRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<PrincipalRole>()
            .map_err(|_| {
                serde::de::Error::custom(format!(
                    "无效的角色: '{s}'. 支持的角色: student, teacher, principal"
                ))
            })
    }
}

impl std::fmt::Display for PrincipalRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrincipalRole::Student => write!(f, "{}", PrincipalRole::STUDENT),
            PrincipalRole::Teacher => write!(f, "{}", PrincipalRole::TEACHER),
            PrincipalRole::Principal => write!(f, "{}", PrincipalRole::PRINCIPAL),
        }
    }
}

impl std::str::FromStr for PrincipalRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PrincipalRole::STUDENT => Ok(PrincipalRole::Student),
            PrincipalRole::TEACHER => Ok(PrincipalRole::Teacher),
            PrincipalRole::PRINCIPAL => Ok(PrincipalRole::Principal),
            _ => Err(format!("Invalid principal role: {s}")),
        }
    }
}

/// 经过认证的调用者（由 `X-Principal` 请求头解析而来）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthPrincipal {
    pub user_id: i64,
    pub role: PrincipalRole,
    /// 对应角色表中的 id（student_id / teacher_id / principal_id）
    pub role_id: i64,
}

// 用户
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<User '{}'>", self.username)
    }
}

/// 学生、教师、校长共用的角色记录结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "user.ts")]
pub struct RoleMember {
    pub id: i64,
    pub user_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub type Student = RoleMember;
pub type Teacher = RoleMember;

// 校长
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "user.ts")]
pub struct Principal {
    pub id: i64,
    pub user_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Principal {}>", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_display() {
        for role in [
            PrincipalRole::Student,
            PrincipalRole::Teacher,
            PrincipalRole::Principal,
        ] {
            assert_eq!(role.to_string().parse::<PrincipalRole>(), Ok(role));
        }
        assert!("admin".parse::<PrincipalRole>().is_err());
    }

    #[test]
    fn test_principal_representation() {
        let now = chrono::Utc::now();
        let principal = Principal {
            id: 1,
            user_id: 5,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(principal.to_string(), "<Principal 1>");
    }

    #[test]
    fn test_user_representation() {
        let now = chrono::Utc::now();
        let user = User {
            id: 1,
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(user.to_string(), "<User 'testuser'>");
    }
}
