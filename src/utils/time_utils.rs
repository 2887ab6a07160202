use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const S_IN_MIN: i64 = 60;
    pub const S_IN_H: i64 = Self::S_IN_MIN * 60;
    pub const S_IN_D: i64 = Self::S_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    /// Short axis label format (e.g. `2021-03`)
    pub const AXIS_TIME_FORMAT: &str = "%Y-%m";
}

/// Parse a `YYYY-MM-DD` string. Used by the CLI and the config loader.
pub fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text.trim(), TimeUtils::STANDARD_TIME_FORMAT)
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", text, e))
}

/// Midnight UTC of `date` as epoch seconds.
pub fn date_to_epoch_sec(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Calendar date of an epoch timestamp once shifted by the exchange's UTC offset.
pub fn epoch_sec_to_exchange_date(epoch_sec: i64, gmt_offset_sec: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(epoch_sec + gmt_offset_sec, 0).map(|dt| dt.date_naive())
}

/// Days since the Unix epoch. Plot x coordinates are expressed in these units.
pub fn date_to_epoch_days(date: NaiveDate) -> f64 {
    (date_to_epoch_sec(date) / TimeUtils::S_IN_D) as f64
}

pub fn epoch_days_to_date(days: f64) -> Option<NaiveDate> {
    DateTime::from_timestamp(days.round() as i64 * TimeUtils::S_IN_D, 0).map(|dt| dt.date_naive())
}

/// First-of-month dates inside `[first, last]`, spaced so there are at most
/// about `divisions` of them. Steps of 12 months or more land on January.
pub fn date_ticks(first: NaiveDate, last: NaiveDate, divisions: usize) -> Vec<NaiveDate> {
    if last <= first || divisions == 0 {
        return vec![first];
    }
    let month_index = |d: NaiveDate| d.year() as i64 * 12 + d.month0() as i64;
    let span_months = month_index(last) - month_index(first);
    let step = [1, 2, 3, 6, 12, 24, 36, 60, 120]
        .into_iter()
        .find(|s| span_months / s <= divisions as i64)
        .unwrap_or(120);

    let from = month_index(first) + if first.day() == 1 { 0 } else { 1 };
    let aligned = (from + step - 1) / step * step;
    (aligned..=month_index(last))
        .step_by(step as usize)
        .filter_map(|m| NaiveDate::from_ymd_opt((m / 12) as i32, (m % 12) as u32 + 1, 1))
        .collect()
}

pub fn local_now_as_timestamp_ms() -> i64 {
    let now_local = Local::now();
    now_local.timestamp_millis()
}

pub fn how_many_seconds_ago(past_timestamp_ms: i64) -> i64 {
    // How many seconds ago was the event described by `past_timestamp_ms` ?
    let now_timestamp_ms = local_now_as_timestamp_ms();
    (now_timestamp_ms - past_timestamp_ms) / 1000
}

pub fn utc_now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2016-01-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        assert!(parse_date("01/01/2016").is_err());
    }

    #[test]
    fn test_exchange_date_uses_offset() {
        // 2024-03-04 04:30 UTC is still 2024-03-03 in New York (UTC-5)
        let ts = date_to_epoch_sec(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()) + 4 * 3600 + 1800;
        let date = epoch_sec_to_exchange_date(ts, -5 * 3600).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn test_date_ticks_land_on_years() {
        let first = NaiveDate::from_ymd_opt(2017, 1, 3).unwrap();
        let last = NaiveDate::from_ymd_opt(2025, 10, 17).unwrap();
        let ticks = date_ticks(first, last, 5);
        let expected: Vec<NaiveDate> = [2018, 2020, 2022, 2024]
            .iter()
            .map(|y| NaiveDate::from_ymd_opt(*y, 1, 1).unwrap())
            .collect();
        assert_eq!(ticks, expected);
    }

    #[test]
    fn test_date_ticks_short_span() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let ticks = date_ticks(first, last, 5);
        assert_eq!(ticks.len(), 4);
        assert_eq!(ticks[0], first);
        assert!(ticks.iter().all(|d| d.day() == 1 && *d <= last));
    }

    #[test]
    fn test_epoch_days_round_trip() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        assert_eq!(epoch_days_to_date(date_to_epoch_days(date)), Some(date));
    }
}
