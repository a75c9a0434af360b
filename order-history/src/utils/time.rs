//! 时间工具函数 - 业务时区转换
//!
//! 快照中的时间一律为 Unix millis，只有渲染时才转换到业务时区。

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// 历史展示使用的时间格式
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// `DateTime<Utc>` → Unix millis
pub fn to_millis(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// Unix millis → `dd/mm/YYYY HH:MM` (业务时区)
///
/// 超出 chrono 可表示范围时返回 `None`。
pub fn format_millis(ts: i64, tz: Tz) -> Option<String> {
    DateTime::from_timestamp_millis(ts)
        .map(|dt| dt.with_timezone(&tz).format(DISPLAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_millis_in_business_timezone() {
        // 2024-03-15 18:30 UTC = 12:30 in Mexico City (UTC-6, no DST)
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
        let formatted = format_millis(to_millis(&ts), chrono_tz::America::Mexico_City);
        assert_eq!(formatted.as_deref(), Some("15/03/2024 12:30"));
    }

    #[test]
    fn test_format_millis_out_of_range() {
        assert_eq!(format_millis(i64::MAX, chrono_tz::UTC), None);
    }
}
