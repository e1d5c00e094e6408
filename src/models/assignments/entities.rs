use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ClassroomError, Result};

// 作业状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "assignment.ts")]
pub enum AssignmentState {
    Draft,     // 草稿
    Submitted, // 已提交
    Graded,    // 已评分
}

impl AssignmentState {
    pub const DRAFT: &'static str = "DRAFT";
    pub const SUBMITTED: &'static str = "SUBMITTED";
    pub const GRADED: &'static str = "GRADED";

    /// 教师与校长可见的状态
    pub fn reviewable_states() -> &'static [AssignmentState] {
        &[AssignmentState::Submitted, AssignmentState::Graded]
    }

    /// 状态机：只能前进，GRADED 允许自转移（重新评分）
    pub fn can_transition_to(self, next: AssignmentState) -> bool {
        matches!(
            (self, next),
            (AssignmentState::Draft, AssignmentState::Submitted)
                | (AssignmentState::Submitted, AssignmentState::Graded)
                | (AssignmentState::Graded, AssignmentState::Graded)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentState::Draft => Self::DRAFT,
            AssignmentState::Submitted => Self::SUBMITTED,
            AssignmentState::Graded => Self::GRADED,
        }
    }
}

impl std::fmt::Display for AssignmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssignmentState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            AssignmentState::DRAFT => Ok(AssignmentState::Draft),
            AssignmentState::SUBMITTED => Ok(AssignmentState::Submitted),
            AssignmentState::GRADED => Ok(AssignmentState::Graded),
            _ => Err(format!("Invalid assignment state: {s}")),
        }
    }
}

// 成绩等级（封闭集合）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "assignment.ts")]
pub enum GradeEnum {
    A,
    B,
    C,
    D,
}

impl GradeEnum {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradeEnum::A => "A",
            GradeEnum::B => "B",
            GradeEnum::C => "C",
            GradeEnum::D => "D",
        }
    }
}

impl<'de> Deserialize<'de> for GradeEnum {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<GradeEnum>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for GradeEnum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GradeEnum {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "A" => Ok(GradeEnum::A),
            "B" => Ok(GradeEnum::B),
            "C" => Ok(GradeEnum::C),
            "D" => Ok(GradeEnum::D),
            _ => Err(format!("Invalid grade: '{s}'. Supported grades: A, B, C, D")),
        }
    }
}

/// 评分人：教师受绑定约束，校长不受
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grader {
    Teacher(i64),
    Principal(i64),
}

impl Grader {
    pub fn id(&self) -> i64 {
        match self {
            Grader::Teacher(id) | Grader::Principal(id) => *id,
        }
    }
}

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: Option<i64>,
    pub content: String,
    pub grade: Option<GradeEnum>,
    pub state: AssignmentState,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    fn ensure_owned_by(&self, student_id: i64) -> Result<()> {
        if self.student_id != student_id {
            return Err(ClassroomError::authorization(
                "This assignment belongs to some other student",
            ));
        }
        Ok(())
    }

    /// 只有本人的草稿可以修改
    pub fn ensure_editable_by(&self, student_id: i64) -> Result<()> {
        self.ensure_owned_by(student_id)?;
        if self.state != AssignmentState::Draft {
            return Err(ClassroomError::state(
                "only assignment in draft state can be edited",
            ));
        }
        Ok(())
    }

    /// 只有本人的草稿可以提交
    pub fn ensure_submittable_by(&self, student_id: i64) -> Result<()> {
        self.ensure_owned_by(student_id)?;
        if !self.state.can_transition_to(AssignmentState::Submitted) {
            return Err(ClassroomError::state(
                "only a draft assignment can be submitted",
            ));
        }
        Ok(())
    }

    /// 评分检查：状态必须为 SUBMITTED/GRADED；教师只能评分提交给自己的作业
    pub fn ensure_gradable_by(&self, grader: &Grader) -> Result<()> {
        if !self.state.can_transition_to(AssignmentState::Graded) {
            return Err(ClassroomError::state(
                "only a submitted assignment can be graded",
            ));
        }
        match grader {
            Grader::Teacher(teacher_id) if self.teacher_id != Some(*teacher_id) => Err(
                ClassroomError::authorization("This assignment belongs to some other teacher"),
            ),
            _ => Ok(()),
        }
    }
}
