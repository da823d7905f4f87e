//! Formatting helpers for presenting attendance data.

/// Renders a `"HH:MM:SS"` scan time as `"H:MM AM/PM"`. Empty or unparsable
/// input renders as the absence marker.
pub fn format_time_ampm(raw: &str) -> String {
    if raw.is_empty() {
        return "-".to_string();
    }

    let mut parts = raw.split(':');
    let hour = match parts.next().and_then(|h| h.parse::<u32>().ok()) {
        Some(hour) if hour < 24 => hour,
        _ => return "-".to_string(),
    };
    let minute = parts.next().unwrap_or("00");

    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute} {suffix}")
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morning_times_render_am() {
        assert_eq!(format_time_ampm("08:15:00"), "8:15 AM");
        assert_eq!(format_time_ampm("00:05:00"), "12:05 AM");
    }

    #[test]
    fn afternoon_times_render_pm() {
        assert_eq!(format_time_ampm("12:30:00"), "12:30 PM");
        assert_eq!(format_time_ampm("15:59:01"), "3:59 PM");
    }

    #[test]
    fn junk_times_render_absence_marker() {
        assert_eq!(format_time_ampm(""), "-");
        assert_eq!(format_time_ampm("not-a-time"), "-");
        assert_eq!(format_time_ampm("99:00:00"), "-");
    }
}
