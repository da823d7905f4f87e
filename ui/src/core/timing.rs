//! Timers and calendar helpers shared by the scan and refresh loops.

use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;

    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

fn now_local() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    match UtcOffset::current_local_offset() {
        Ok(offset) => now.to_offset(offset),
        Err(_) => now,
    }
}

/// The local calendar day, used to seed an empty roster for "today".
pub fn today_local() -> Date {
    now_local().date()
}

/// `"HH:MM:SS"` wall-clock stamp for status messages.
pub fn now_local_hms() -> String {
    now_local()
        .time()
        .format(&format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "00:00:00".to_string())
}

pub fn format_date(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "0000-00-00".to_string())
}

/// Parses a `"YYYY-MM-DD"` date; `None` for anything else.
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw, &format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_round_trip() {
        let parsed = parse_date("2024-06-01").expect("valid date");
        assert_eq!(format_date(parsed), "2024-06-01");
    }

    #[test]
    fn bad_dates_parse_to_none() {
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("").is_none());
    }
}
