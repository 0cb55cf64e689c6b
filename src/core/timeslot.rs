use crate::models::TimetableEntry;

/// Parses a clock time such as `9`, `9:30`, `11:00 AM` or `2:15 pm` into
/// minutes since midnight. A missing meridiem suffix is read as AM, so
/// `12 AM` and `12:00` are both midnight and `12 PM` is noon. Returns `None`
/// when the text does not decompose into integer hour/minute parts.
pub fn parse_clock_time(text: &str) -> Option<u32> {
    let upper = text.trim().to_ascii_uppercase();

    let (clock, is_pm) = if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), true)
    } else if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), false)
    } else {
        (upper.as_str(), false)
    };

    let (hour_text, minute_text) = match clock.split_once(':') {
        Some((hour, minute)) => (hour, minute),
        None => (clock, "0"),
    };

    let hour: u32 = hour_text.trim().parse().ok()?;
    let minute: u32 = minute_text.trim().parse().ok()?;

    let mut total = hour * 60 + minute;
    if is_pm && hour != 12 {
        total += 12 * 60;
    } else if !is_pm && hour == 12 {
        total -= 12 * 60;
    }
    Some(total)
}

/// True iff both endpoints parse and the end is strictly later than the
/// start. Equal times are rejected.
pub fn is_valid_range(start: &str, end: &str) -> bool {
    match (parse_clock_time(start), parse_clock_time(end)) {
        (Some(start), Some(end)) => end > start,
        _ => false,
    }
}

/// The canonical slot label a timetable entry is keyed by.
pub fn format_slot(start: &str, end: &str) -> String {
    format!("{} - {}", start.trim(), end.trim())
}

/// True iff the user already holds an entry with the identical slot label on
/// that day. Comparison is by exact label, not by time range, so slots that
/// overlap in wall-clock time under different labels are not flagged.
pub fn slot_conflicts(
    user_id: i64,
    day: i64,
    candidate: &str,
    existing: &[TimetableEntry],
) -> bool {
    existing
        .iter()
        .any(|e| e.user_id == user_id && e.day == day && e.time_slot == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user_id: i64, day: i64, slot: &str) -> TimetableEntry {
        TimetableEntry {
            id: 0,
            user_id,
            day,
            time_slot: slot.to_string(),
            subject_id: 1,
            task: None,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn parses_plain_hours_as_am() {
        assert_eq!(parse_clock_time("9"), Some(540));
        assert_eq!(parse_clock_time("9:30"), Some(570));
    }

    #[test]
    fn parses_meridiem_suffixes() {
        assert_eq!(parse_clock_time("9:00 AM"), Some(540));
        assert_eq!(parse_clock_time("2:15 pm"), Some(855));
        assert_eq!(parse_clock_time("  11:00 Am "), Some(660));
    }

    #[test]
    fn twelve_am_is_midnight_and_twelve_pm_is_noon() {
        assert_eq!(parse_clock_time("12:00 AM"), Some(0));
        assert_eq!(parse_clock_time("12:00 PM"), Some(720));
        assert_eq!(parse_clock_time("12:30 AM"), Some(30));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_clock_time("garbage"), None);
        assert_eq!(parse_clock_time(""), None);
        assert_eq!(parse_clock_time("9:xx"), None);
        assert_eq!(parse_clock_time(":30"), None);
    }

    #[test]
    fn range_requires_strictly_later_end() {
        assert!(is_valid_range("9:00 AM", "11:00 AM"));
        assert!(!is_valid_range("11:00 AM", "9:00 AM"));
        assert!(!is_valid_range("2:00 PM", "2:00 PM"));
        assert!(!is_valid_range("garbage", "11:00 AM"));
    }

    #[test]
    fn conflict_is_exact_label_match_per_user_and_day() {
        let existing = vec![entry(1, 2, "9:00 AM - 10:00 AM")];

        assert!(slot_conflicts(1, 2, "9:00 AM - 10:00 AM", &existing));
        // different day or user, same label
        assert!(!slot_conflicts(1, 3, "9:00 AM - 10:00 AM", &existing));
        assert!(!slot_conflicts(2, 2, "9:00 AM - 10:00 AM", &existing));
        // overlapping wall-clock range under a different label is not flagged
        assert!(!slot_conflicts(1, 2, "9:30 AM - 10:30 AM", &existing));
    }

    #[test]
    fn slot_labels_are_trimmed_on_format() {
        assert_eq!(format_slot(" 9:00 AM", "10:00 AM "), "9:00 AM - 10:00 AM");
    }
}
