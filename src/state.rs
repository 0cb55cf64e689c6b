use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::CalculatorSessions;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub calculators: Arc<CalculatorSessions>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            calculators: Arc::new(CalculatorSessions::default()),
        }
    }
}
