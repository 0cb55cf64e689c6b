pub mod calculator;

pub use calculator::{CalculatorSessions, CalculatorState, MAX_TRIMESTER};
