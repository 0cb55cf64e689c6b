use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Codes of throwaway subjects created for one-off timetable tasks. They are
/// removed again when the last timetable entry referencing them goes away.
pub const CUSTOM_CODE_PREFIX: &str = "CUSTOM-";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub credit_hours: i64,
}

impl Subject {
    pub fn is_custom(&self) -> bool {
        self.code.starts_with(CUSTOM_CODE_PREFIX)
    }
}
