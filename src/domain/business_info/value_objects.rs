use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opening hours for a single weekday
///
/// A closed day carries `closed: true`; open/close times are free-form
/// strings ("09:00") and may be absent on closed days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

/// Working hours keyed by weekday name
///
/// Stored as JSON: `{"monday": {"open": "09:00", "close": "17:00", "closed": false}, ...}`
pub type WorkingHours = HashMap<String, DayHours>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_hours_defaults_to_open_with_no_times() {
        let day: DayHours = serde_json::from_str("{}").unwrap();
        assert_eq!(day.open, None);
        assert_eq!(day.close, None);
        assert!(!day.closed);
    }

    #[test]
    fn closed_day_without_times() {
        let day: DayHours = serde_json::from_str(r#"{"closed": true}"#).unwrap();
        assert!(day.closed);
        assert_eq!(day.open, None);
    }

    #[test]
    fn working_hours_map_parses_weekdays() {
        let raw = r#"{
            "monday": {"open": "09:00", "close": "17:00", "closed": false},
            "sunday": {"closed": true}
        }"#;
        let hours: WorkingHours = serde_json::from_str(raw).unwrap();
        assert_eq!(hours.len(), 2);
        assert_eq!(hours["monday"].open.as_deref(), Some("09:00"));
        assert!(hours["sunday"].closed);
    }
}
