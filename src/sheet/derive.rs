//! Pure schedule arithmetic. Total functions over their domain — malformed
//! input degrades to an empty string, never an error, so one bad scene cannot
//! abort a whole document.

use crate::models::Scene;

/// Compute a scene's end time from its start time and estimated duration.
///
/// Returns `""` when the start time is missing/empty, when the duration is
/// missing or zero (a zero-minute scene deliberately reports no end time),
/// or when the start time does not parse as `HH:MM`. A shoot crossing
/// midnight wraps to the next day's clock time with no rollover indicator.
pub fn calculate_end_time(start_time: Option<&str>, estimated_minutes: Option<i32>) -> String {
    let Some(start) = start_time.filter(|s| !s.is_empty()) else {
        return String::new();
    };
    let minutes = match estimated_minutes {
        Some(m) if m > 0 => m,
        _ => return String::new(),
    };

    let mut parts = start.splitn(2, ':');
    let (Some(hour_part), Some(minute_part)) = (parts.next(), parts.next()) else {
        return String::new();
    };
    let (Ok(hours), Ok(mins)) = (hour_part.parse::<i32>(), minute_part.parse::<i32>()) else {
        return String::new();
    };

    let total = hours * 60 + mins + minutes;
    let end_hours = (total / 60) % 24;
    let end_minutes = total % 60;
    format!("{end_hours:02}:{end_minutes:02}")
}

/// Sum of all scene durations, treating absent as zero.
pub fn total_shooting_minutes(scenes: &[Scene]) -> i64 {
    scenes
        .iter()
        .map(|s| s.estimated_time.unwrap_or(0) as i64)
        .sum()
}

/// Display form of a minute total: `"3h 0m"`, or just `"45m"` when the hour
/// component is zero.
pub fn format_total_minutes(total: i64) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Latest end time across all scenes, or `"-"` when no scene yields one.
///
/// The comparison is lexicographic on zero-padded `"HH:MM"` strings — correct
/// within one day, knowingly not across the midnight wrap. Both renderers go
/// through this single implementation so their outputs always agree.
pub fn shooting_end_time(scenes: &[Scene]) -> String {
    let mut latest = String::new();
    for scene in scenes {
        let end = calculate_end_time(scene.start_time.as_deref(), scene.estimated_time);
        if !end.is_empty() && end > latest {
            latest = end;
        }
    }
    if latest.is_empty() {
        "-".to_string()
    } else {
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(start: Option<&str>, minutes: Option<i32>) -> Scene {
        Scene {
            id:             String::new(),
            call_sheet_id:  String::new(),
            ord:            0,
            scene_number:   "S#1".to_string(),
            description:    None,
            location_type:  None,
            location_name:  None,
            day_night:      None,
            pages:          None,
            estimated_time: minutes,
            start_time:     start.map(str::to_string),
            cast:           None,
            notes:          None,
        }
    }

    #[test]
    fn end_time_basic() {
        assert_eq!(calculate_end_time(Some("09:00"), Some(90)), "10:30");
        assert_eq!(calculate_end_time(Some("14:15"), Some(45)), "15:00");
    }

    #[test]
    fn end_time_wraps_past_midnight() {
        assert_eq!(calculate_end_time(Some("23:30"), Some(45)), "00:15");
        assert_eq!(calculate_end_time(Some("23:00"), Some(1500)), "00:00");
    }

    #[test]
    fn end_time_missing_inputs() {
        assert_eq!(calculate_end_time(None, Some(90)), "");
        assert_eq!(calculate_end_time(Some(""), Some(90)), "");
        assert_eq!(calculate_end_time(Some("09:00"), None), "");
    }

    #[test]
    fn end_time_zero_duration_is_absent() {
        // A zero-minute scene reports no end time, matching the form layer.
        assert_eq!(calculate_end_time(Some("09:00"), Some(0)), "");
    }

    #[test]
    fn end_time_malformed_start() {
        assert_eq!(calculate_end_time(Some("bad"), Some(30)), "");
        assert_eq!(calculate_end_time(Some("ab:cd"), Some(30)), "");
        assert_eq!(calculate_end_time(Some("09"), Some(30)), "");
    }

    #[test]
    fn totals_and_display() {
        let scenes = vec![scene(Some("08:00"), Some(60)), scene(Some("10:00"), Some(120))];
        assert_eq!(total_shooting_minutes(&scenes), 180);
        assert_eq!(format_total_minutes(180), "3h 0m");
        assert_eq!(format_total_minutes(45), "45m");
        assert_eq!(format_total_minutes(0), "0m");
    }

    #[test]
    fn latest_end_time_is_lexicographic_max() {
        let scenes = vec![scene(Some("08:00"), Some(60)), scene(Some("10:00"), Some(120))];
        assert_eq!(shooting_end_time(&scenes), "12:00");
    }

    #[test]
    fn latest_end_time_defaults_to_dash() {
        assert_eq!(shooting_end_time(&[]), "-");
        let scenes = vec![scene(None, Some(60)), scene(Some("10:00"), None)];
        assert_eq!(shooting_end_time(&scenes), "-");
    }

    #[test]
    fn absent_durations_count_as_zero() {
        let scenes = vec![scene(Some("08:00"), None), scene(Some("09:00"), Some(30))];
        assert_eq!(total_shooting_minutes(&scenes), 30);
        assert_eq!(shooting_end_time(&scenes), "09:30");
    }
}
