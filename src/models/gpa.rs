use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry of a calculator working set. Lives only for the duration of a
/// calculation session; nothing is persisted until the trimester is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedSubject {
    pub subject_id: Option<i64>,
    pub name: String,
    pub credit_hours: i64,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrimesterRecord {
    pub id: i64,
    pub user_id: i64,
    pub trimester: String,
    pub gpa: f64,
    pub total_credits: i64,
    pub total_grade_points: f64,
    pub saved_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCalculatorSubjectRequest {
    pub subject_id: Option<i64>,
    pub name: Option<String>,
    pub credit_hours: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetGradeRequest {
    pub grade: String,
}
