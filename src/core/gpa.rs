use serde::Serialize;

use crate::models::{GradedSubject, TrimesterRecord};

/// Letter grades and their grade-point values, in descending order.
pub const GRADE_SCALE: [(&str, f64); 12] = [
    ("A+", 4.00),
    ("A", 4.00),
    ("A-", 3.67),
    ("B+", 3.33),
    ("B", 3.00),
    ("B-", 2.67),
    ("C+", 2.33),
    ("C", 2.00),
    ("C-", 1.67),
    ("D+", 1.33),
    ("D", 1.00),
    ("F", 0.00),
];

/// Grade-point value for a letter grade, `None` if the letter is not on the
/// scale. Surrounding whitespace is ignored; letters are case-sensitive.
pub fn grade_points(letter: &str) -> Option<f64> {
    let letter = letter.trim();
    GRADE_SCALE
        .iter()
        .find(|(symbol, _)| *symbol == letter)
        .map(|(_, points)| *points)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GpaSummary {
    pub gpa: f64,
    pub total_credits: i64,
    pub total_grade_points: f64,
    pub graded_count: usize,
    pub ungraded_count: usize,
}

/// Computes a trimester GPA over a working set of subjects.
///
/// Subjects with an empty or unrecognized grade are counted as ungraded and
/// excluded from the sums. Total function: an empty or all-ungraded list
/// yields a zero summary. No rounding is applied here; display rounding is a
/// presentation concern.
pub fn trimester_gpa(subjects: &[GradedSubject]) -> GpaSummary {
    let mut summary = GpaSummary::default();

    for subject in subjects {
        let points = subject.grade.as_deref().and_then(grade_points);
        match points {
            Some(points) => {
                summary.graded_count += 1;
                summary.total_credits += subject.credit_hours;
                summary.total_grade_points += subject.credit_hours as f64 * points;
            }
            None => summary.ungraded_count += 1,
        }
    }

    if summary.total_credits > 0 {
        summary.gpa = summary.total_grade_points / summary.total_credits as f64;
    }
    summary
}

/// Cumulative GPA across saved trimesters: total grade points over total
/// credits. Order-independent; 0.0 when no credits have been earned.
pub fn cumulative_gpa(records: &[TrimesterRecord]) -> f64 {
    let credits: i64 = records.iter().map(|r| r.total_credits).sum();
    if credits == 0 {
        return 0.0;
    }
    let points: f64 = records.iter().map(|r| r.total_grade_points).sum();
    points / credits as f64
}
