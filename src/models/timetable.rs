use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimetableEntry {
    pub id: i64,
    pub user_id: i64,
    pub day: i64,
    pub time_slot: String,
    pub subject_id: i64,
    pub task: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimetableEntryRequest {
    pub day: i64,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: Option<i64>,
    pub custom_name: Option<String>,
    pub task: Option<String>,
}
