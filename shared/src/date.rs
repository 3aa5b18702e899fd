//! 时间展示模块
//!
//! 后端返回的是不带时区的 `LocalDateTime` 字符串
//! （如 `2024-01-05T10:20:30.123456`），直接按 `NaiveDateTime` 解析。

use chrono::NaiveDateTime;

/// 格式化为 `Jan 5, 2024`
pub fn format_date(value: &NaiveDateTime) -> String {
    value.format("%b %-d, %Y").to_string()
}

/// 格式化为 `Jan 5, 2024 10:20`
pub fn format_date_time(value: &NaiveDateTime) -> String {
    value.format("%b %-d, %Y %H:%M").to_string()
}

/// 解析后端时间字符串，失败返回 None
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_local_date_time() {
        let dt = parse("2024-01-05T10:20:30.123456").unwrap();
        assert_eq!(format_date(&dt), "Jan 5, 2024");
        assert_eq!(format_date_time(&dt), "Jan 5, 2024 10:20");
    }

    #[test]
    fn parses_without_fraction() {
        let dt = parse("2023-12-31T23:59:59").unwrap();
        assert_eq!(format_date(&dt), "Dec 31, 2023");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_none());
    }
}
