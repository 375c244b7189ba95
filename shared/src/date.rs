//! 时间显示模块
//!
//! 服务端全部以 ISO 8601 字符串传输时间；这里只做
//! 纯字符串的展示格式化，可在任意平台测试。

// =========================================================
// 格式化 - 纯字符串处理
// =========================================================

/// 将 ISO 时间格式化为 `YYYY-MM-DD HH:MM`
///
/// 输入不是合法 ISO 时直接原样返回，不做猜测
pub fn format_datetime(iso: &str) -> String {
    let Some((date, time)) = iso.split_once('T') else {
        return iso.to_string();
    };
    if date.len() != 10 {
        return iso.to_string();
    }
    let hhmm: String = time.chars().take(5).collect();
    if hhmm.len() < 5 {
        return iso.to_string();
    }
    format!("{date} {hhmm}")
}

/// 只取日期部分 `YYYY-MM-DD`
pub fn format_date(iso: &str) -> String {
    let date = iso.split('T').next().unwrap_or(iso);
    if date.len() == 10 {
        date.to_string()
    } else {
        iso.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_truncates_to_minutes() {
        assert_eq!(
            format_datetime("2025-03-01T08:15:42.123Z"),
            "2025-03-01 08:15"
        );
        assert_eq!(format_datetime("2025-03-01T08:15:42"), "2025-03-01 08:15");
    }

    #[test]
    fn malformed_input_passes_through() {
        assert_eq!(format_datetime("昨天"), "昨天");
        assert_eq!(format_datetime(""), "");
        assert_eq!(format_date("n/a"), "n/a");
    }

    #[test]
    fn date_only_keeps_date() {
        assert_eq!(format_date("2025-12-31T23:59:59Z"), "2025-12-31");
        assert_eq!(format_date("2025-12-31"), "2025-12-31");
    }
}
