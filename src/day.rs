use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(String);

impl DayKey {
    pub fn today() -> Self {
        Self::from_date(today_date())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DayKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

pub fn today_date() -> NaiveDate {
    Local::now().date_naive()
}

/// Local midnight starting the day after `now`, plus a one second margin.
pub fn next_rollover_at<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let tomorrow = now.date_naive() + Duration::days(1);
    let target = tomorrow.and_hms_opt(0, 0, 1).unwrap_or_default();

    // Midnight can fall inside a DST gap; take the first valid instant after it.
    let mut candidate = target;
    for _ in 0..4 {
        if let Some(at) = tz.from_local_datetime(&candidate).earliest() {
            return at;
        }
        candidate += Duration::minutes(30);
    }
    now.clone() + Duration::days(1)
}

pub fn until_next_rollover<Tz: TimeZone>(now: &DateTime<Tz>) -> std::time::Duration {
    (next_rollover_at(now) - now.clone())
        .to_std()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    #[test]
    fn day_key_formats_as_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(DayKey::from_date(date).as_str(), "2026-03-07");
    }

    #[test]
    fn day_key_serializes_as_plain_string() {
        let key = DayKey::from("2026-01-05");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2026-01-05\"");
        let back: DayKey = serde_json::from_str("\"not-a-date\"").unwrap();
        assert_eq!(back.as_str(), "not-a-date");
    }

    #[test]
    fn next_rollover_is_one_second_after_next_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 22, 30, 0).unwrap();
        let at = next_rollover_at(&now);
        assert_eq!(at.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 6).unwrap());
        assert_eq!((at.hour(), at.minute(), at.second()), (0, 0, 1));
        assert_eq!(until_next_rollover(&now).as_secs(), 90 * 60 + 1);
    }

    #[test]
    fn next_rollover_from_just_after_midnight_targets_following_day() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap();
        let at = next_rollover_at(&now);
        assert_eq!(at.date_naive(), NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
        assert_eq!(until_next_rollover(&now).as_secs(), 24 * 3600 + 1);
    }
}
