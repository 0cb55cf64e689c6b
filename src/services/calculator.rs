use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::core::gpa;
use crate::error::AppError;
use crate::models::GradedSubject;

/// Trimester numbering advances after each save, capped here.
pub const MAX_TRIMESTER: u8 = 6;

#[derive(Debug, Clone, Serialize)]
pub struct CalculatorState {
    pub trimester_no: u8,
    pub subjects: Vec<GradedSubject>,
}

impl CalculatorState {
    fn new() -> Self {
        Self {
            trimester_no: 1,
            subjects: Vec::new(),
        }
    }

    pub fn trimester_label(&self) -> String {
        format!("Trimester {}", self.trimester_no)
    }
}

/// Per-user GPA calculator working sets.
///
/// A working set exists only for the lifetime of the process and is owned by
/// `AppState`, passed into handlers explicitly. It is flushed to the trimester
/// store only by an explicit save.
#[derive(Default)]
pub struct CalculatorSessions {
    inner: Mutex<HashMap<i64, CalculatorState>>,
}

impl CalculatorSessions {
    pub async fn snapshot(&self, user_id: i64) -> CalculatorState {
        let mut sessions = self.inner.lock().await;
        sessions.entry(user_id).or_insert_with(CalculatorState::new).clone()
    }

    /// Adds a subject to the working set, ungraded. A catalog subject may
    /// appear at most once per set.
    pub async fn add_subject(
        &self,
        user_id: i64,
        subject: GradedSubject,
    ) -> Result<CalculatorState, AppError> {
        if subject.credit_hours <= 0 {
            return Err(AppError::BadRequest(
                "credit hours must be a positive integer".to_string(),
            ));
        }

        let mut sessions = self.inner.lock().await;
        let state = sessions.entry(user_id).or_insert_with(CalculatorState::new);

        if let Some(id) = subject.subject_id {
            if state.subjects.iter().any(|s| s.subject_id == Some(id)) {
                return Err(AppError::Conflict(
                    "subject is already in the calculator".to_string(),
                ));
            }
        }

        state.subjects.push(subject);
        Ok(state.clone())
    }

    /// Assigns or clears the letter grade at `index`. An empty grade means
    /// "not yet graded"; anything else must be on the grade scale.
    pub async fn set_grade(
        &self,
        user_id: i64,
        index: usize,
        grade: &str,
    ) -> Result<CalculatorState, AppError> {
        let grade = grade.trim();
        if !grade.is_empty() && gpa::grade_points(grade).is_none() {
            return Err(AppError::BadRequest(format!("unknown grade letter: {grade}")));
        }

        let mut sessions = self.inner.lock().await;
        let state = sessions.entry(user_id).or_insert_with(CalculatorState::new);
        let subject = state.subjects.get_mut(index).ok_or(AppError::NotFound)?;

        subject.grade = if grade.is_empty() {
            None
        } else {
            Some(grade.to_string())
        };
        Ok(state.clone())
    }

    pub async fn remove_subject(
        &self,
        user_id: i64,
        index: usize,
    ) -> Result<CalculatorState, AppError> {
        let mut sessions = self.inner.lock().await;
        let state = sessions.entry(user_id).or_insert_with(CalculatorState::new);

        if index >= state.subjects.len() {
            return Err(AppError::NotFound);
        }
        state.subjects.remove(index);
        Ok(state.clone())
    }

    /// Validates the working set for a save without touching it: every
    /// subject must carry a recognized grade. Returns the trimester label and
    /// a copy of the subjects on success.
    pub async fn checked_for_save(
        &self,
        user_id: i64,
    ) -> Result<(String, Vec<GradedSubject>), AppError> {
        let mut sessions = self.inner.lock().await;
        let state = sessions.entry(user_id).or_insert_with(CalculatorState::new);

        if state.subjects.is_empty() {
            return Err(AppError::Unprocessable(
                "add at least one subject before saving".to_string(),
            ));
        }

        let ungraded = state
            .subjects
            .iter()
            .filter(|s| s.grade.as_deref().and_then(gpa::grade_points).is_none())
            .count();
        if ungraded > 0 {
            return Err(AppError::Unprocessable(format!(
                "{ungraded} subject(s) still need a grade before saving"
            )));
        }

        Ok((state.trimester_label(), state.subjects.clone()))
    }

    /// Called after the record is persisted: clears the working set and
    /// advances the trimester number, capped at `MAX_TRIMESTER`.
    pub async fn finish_save(&self, user_id: i64) -> CalculatorState {
        let mut sessions = self.inner.lock().await;
        let state = sessions.entry(user_id).or_insert_with(CalculatorState::new);

        state.subjects.clear();
        state.trimester_no = (state.trimester_no + 1).min(MAX_TRIMESTER);
        state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: Option<i64>, grade: Option<&str>) -> GradedSubject {
        GradedSubject {
            subject_id: id,
            name: "Mathematics I".to_string(),
            credit_hours: 4,
            grade: grade.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn working_sets_are_per_user() {
        let sessions = CalculatorSessions::default();
        sessions.add_subject(1, subject(Some(1), None)).await.unwrap();

        assert_eq!(sessions.snapshot(1).await.subjects.len(), 1);
        assert!(sessions.snapshot(2).await.subjects.is_empty());
    }

    #[tokio::test]
    async fn duplicate_catalog_subject_is_rejected() {
        let sessions = CalculatorSessions::default();
        sessions.add_subject(1, subject(Some(7), None)).await.unwrap();

        let err = sessions.add_subject(1, subject(Some(7), None)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(sessions.snapshot(1).await.subjects.len(), 1);
    }

    #[tokio::test]
    async fn unknown_grade_letter_is_rejected() {
        let sessions = CalculatorSessions::default();
        sessions.add_subject(1, subject(Some(1), None)).await.unwrap();

        let err = sessions.set_grade(1, 0, "Z").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let state = sessions.set_grade(1, 0, "A-").await.unwrap();
        assert_eq!(state.subjects[0].grade.as_deref(), Some("A-"));

        // empty clears the grade again
        let state = sessions.set_grade(1, 0, "").await.unwrap();
        assert!(state.subjects[0].grade.is_none());
    }

    #[tokio::test]
    async fn save_is_refused_while_any_subject_is_ungraded() {
        let sessions = CalculatorSessions::default();
        sessions.add_subject(1, subject(Some(1), Some("A"))).await.unwrap();
        sessions.add_subject(1, subject(Some(2), None)).await.unwrap();

        let err = sessions.checked_for_save(1).await.unwrap_err();
        assert!(matches!(err, AppError::Unprocessable(_)));

        // working set is untouched by the failed save
        assert_eq!(sessions.snapshot(1).await.subjects.len(), 2);

        sessions.set_grade(1, 1, "B+").await.unwrap();
        let (label, subjects) = sessions.checked_for_save(1).await.unwrap();
        assert_eq!(label, "Trimester 1");
        assert_eq!(subjects.len(), 2);
    }

    #[tokio::test]
    async fn empty_working_set_cannot_be_saved() {
        let sessions = CalculatorSessions::default();
        let err = sessions.checked_for_save(1).await.unwrap_err();
        assert!(matches!(err, AppError::Unprocessable(_)));
    }

    #[tokio::test]
    async fn trimester_number_advances_and_caps_at_six() {
        let sessions = CalculatorSessions::default();

        for expected in 2..=7u8 {
            let state = sessions.finish_save(1).await;
            assert!(state.subjects.is_empty());
            assert_eq!(state.trimester_no, expected.min(MAX_TRIMESTER));
        }
        assert_eq!(sessions.snapshot(1).await.trimester_no, MAX_TRIMESTER);
    }
}
