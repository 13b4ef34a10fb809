use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::America::New_York;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use super::NOT_AVAILABLE;
use crate::errors::StockDeskError;
use crate::models::category::Granularity;
use crate::models::records::Dated;

pub const INVALID_DATE: &str = "Invalid Date";

/// 分时时间戳换算到美东时间的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasternClock {
    /// UTC 时间固定加 5 小时并标记为 EST，不考虑夏令时
    #[default]
    FixedOffset,
    /// 按 America/New_York 时区换算，夏令时标记为 EDT
    Calendar,
}

impl FromStr for EasternClock {
    type Err = StockDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "fixed_offset" | "fixed-offset" => Ok(EasternClock::FixedOffset),
            "calendar" | "tz" => Ok(EasternClock::Calendar),
            other => Err(StockDeskError::ConfigError(format!("Unknown eastern clock: {}", other))),
        }
    }
}

// 固定的 UTC -> 美东换算小时数
const EASTERN_SHIFT_HOURS: i64 = 5;

// 依次尝试的无时区格式
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// 解析时间戳，没有时区信息的一律按 UTC 处理
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 格式化日期，分时数据使用默认的固定 5 小时换算
pub fn format_date(raw: Option<&str>, granularity: Granularity) -> String {
    format_date_with(raw, granularity, EasternClock::FixedOffset)
}

/// 缺失或空字符串返回 N/A，无法解析的返回 Invalid Date
///
/// - 日线：`Jan 5, 2024`
/// - 分时：`Jan 5, 2024, 02:30 PM EST`
pub fn format_date_with(raw: Option<&str>, granularity: Granularity, clock: EasternClock) -> String {
    let raw = match raw.filter(|r| !r.is_empty()) {
        Some(raw) => raw,
        None => return NOT_AVAILABLE.to_string(),
    };
    let instant = match parse_timestamp(raw) {
        Some(instant) => instant,
        // 日期和时间两处都显示 Invalid Date，分时数据照样带 EST 后缀
        None => {
            return match granularity {
                Granularity::Daily => INVALID_DATE.to_string(),
                Granularity::Intraday => format!("{}, {} EST", INVALID_DATE, INVALID_DATE),
            }
        }
    };

    match granularity {
        Granularity::Daily => instant.format("%b %-d, %Y").to_string(),
        Granularity::Intraday => match clock {
            EasternClock::FixedOffset => {
                let shifted = instant + Duration::hours(EASTERN_SHIFT_HOURS);
                format!("{} EST", shifted.format("%b %-d, %Y, %I:%M %p"))
            }
            EasternClock::Calendar => instant
                .with_timezone(&New_York)
                .format("%b %-d, %Y, %I:%M %p %Z")
                .to_string(),
        },
    }
}

/// 有效日期升序，无法解析（或缺失）的日期排在所有有效日期之后
pub fn chronological_cmp(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.and_then(parse_timestamp);
    let b = b.and_then(parse_timestamp);
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 按日期从旧到新排序，返回副本，原序列保持不变（稳定排序）
pub fn sort_chronologically<T: Dated + Clone>(records: &[T]) -> Vec<T> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| chronological_cmp(a.date(), b.date()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::IntradayBar;

    fn bar(date: Option<&str>, close: f64) -> IntradayBar {
        IntradayBar {
            date: date.map(str::to_string),
            close: Some(close),
            ..Default::default()
        }
    }

    #[test]
    fn absent_and_invalid() {
        assert_eq!(format_date(None, Granularity::Daily), "N/A");
        assert_eq!(format_date(Some(""), Granularity::Intraday), "N/A");
        assert_eq!(format_date(Some("yesterday"), Granularity::Daily), "Invalid Date");
    }

    #[test]
    fn invalid_intraday_keeps_est_suffix() {
        assert_eq!(
            format_date(Some("garbage"), Granularity::Intraday),
            "Invalid Date, Invalid Date EST"
        );
        assert_eq!(
            format_date_with(Some("garbage"), Granularity::Intraday, EasternClock::Calendar),
            "Invalid Date, Invalid Date EST"
        );
    }

    #[test]
    fn daily_is_date_only() {
        assert_eq!(format_date(Some("2024-01-05"), Granularity::Daily), "Jan 5, 2024");
        assert_eq!(format_date(Some("2024-01-05 15:30:00"), Granularity::Daily), "Jan 5, 2024");
        assert_eq!(format_date(Some("2023-12-31T23:59:59Z"), Granularity::Daily), "Dec 31, 2023");
    }

    #[test]
    fn intraday_shifts_five_hours() {
        assert_eq!(
            format_date(Some("2024-01-05 09:30:00"), Granularity::Intraday),
            "Jan 5, 2024, 02:30 PM EST"
        );
        // 跨日
        assert_eq!(
            format_date(Some("2024-07-01 21:15:00"), Granularity::Intraday),
            "Jul 2, 2024, 02:15 AM EST"
        );
    }

    #[test]
    fn calendar_clock_follows_dst() {
        assert_eq!(
            format_date_with(Some("2024-01-05T15:00:00Z"), Granularity::Intraday, EasternClock::Calendar),
            "Jan 5, 2024, 10:00 AM EST"
        );
        assert_eq!(
            format_date_with(Some("2024-07-05T15:00:00Z"), Granularity::Intraday, EasternClock::Calendar),
            "Jul 5, 2024, 11:00 AM EDT"
        );
    }

    #[test]
    fn parses_common_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 8)
            .and_then(|d| d.and_hms_opt(14, 5, 0))
            .map(|n| n.and_utc());
        assert_eq!(parse_timestamp("2024-03-08 14:05:00"), expected);
        assert_eq!(parse_timestamp("2024-03-08T14:05"), expected);
        assert_eq!(parse_timestamp("2024-03-08T09:05:00-05:00"), expected);
        assert!(parse_timestamp("08/03/2024").is_none());
    }

    #[test]
    fn sort_puts_unparseable_last_and_is_stable() {
        let input = vec![
            bar(Some("2024-01-03"), 3.0),
            bar(None, 10.0),
            bar(Some("garbage"), 11.0),
            bar(Some("2024-01-01"), 1.0),
            bar(Some("2024-01-02"), 2.0),
        ];
        let sorted = sort_chronologically(&input);
        let closes: Vec<f64> = sorted.iter().filter_map(|b| b.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0, 10.0, 11.0]);
        // 原始序列不变
        assert_eq!(input[0].close, Some(3.0));
    }

    #[test]
    fn clock_parsing() {
        assert_eq!("calendar".parse::<EasternClock>().unwrap(), EasternClock::Calendar);
        assert_eq!("FIXED".parse::<EasternClock>().unwrap(), EasternClock::FixedOffset);
        assert!("utc".parse::<EasternClock>().is_err());
    }
}
