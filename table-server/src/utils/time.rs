//! Time helpers - business time zone conversion
//!
//! Storage and the repository layer only ever see `i64` Unix millis;
//! calendar reasoning (day boundaries, day keys) happens here.

use chrono::{Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;

/// Parse an IANA zone name, falling back to UTC
pub fn parse_timezone(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or_else(|e| {
        tracing::warn!("Invalid BUSINESS_TIMEZONE '{}': {}, falling back to UTC", name, e);
        Tz::UTC
    })
}

/// Local midnight of `date` in `tz` as Unix millis
///
/// DST gap fallback: if local midnight does not exist, UTC midnight is used.
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Calendar date of a Unix millis timestamp in `tz`
pub fn local_date(millis: i64, tz: Tz) -> NaiveDate {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

/// `YYYY-MM-DD` key of a Unix millis timestamp in `tz`
pub fn day_key(millis: i64, tz: Tz) -> String {
    local_date(millis, tz).format("%Y-%m-%d").to_string()
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// January 1st of the year containing `date`
pub fn year_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Kolkata"), chrono_tz::Asia::Kolkata);
        assert_eq!(parse_timezone("Mars/Olympus"), Tz::UTC);
    }

    #[test]
    fn test_day_start_in_zone() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        // 2024-03-15T00:00:00+05:30 == 2024-03-14T18:30:00Z
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 14, 18, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(day_start_millis(date, chrono_tz::Asia::Kolkata), expected);
        assert_eq!(
            day_start_millis(date, Tz::UTC),
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap().timestamp_millis()
        );
    }

    #[test]
    fn test_day_key_uses_business_zone() {
        // 20:00 UTC is already the next day in Kolkata
        let millis = Utc
            .with_ymd_and_hms(2024, 3, 15, 20, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(day_key(millis, Tz::UTC), "2024-03-15");
        assert_eq!(day_key(millis, chrono_tz::Asia::Kolkata), "2024-03-16");
    }

    #[test]
    fn test_period_starts() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 19).unwrap();
        assert_eq!(month_start(date), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(year_start(date), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
