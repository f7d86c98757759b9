//! Human-readable renderings of sizes, timestamps and hosts.

use chrono::{DateTime, Local, TimeZone};
use url::{Host, Url};

/// Shown instead of a date for missing timestamps.
pub const NOT_AVAILABLE: &str = "N/A";

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// `1536` becomes `1.5 KB`. At most two decimals, trailing zeros dropped.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut unit = 0;
    while unit + 1 < UNITS.len() && bytes >= 1u64 << (10 * (unit + 1)) {
        unit += 1;
    }
    let value = bytes as f64 / (1u64 << (10 * unit)) as f64;
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

fn to_datetime<Tz: TimeZone>(timestamp: Option<i64>, tz: &Tz) -> Option<DateTime<Tz>> {
    let ts = timestamp.filter(|&t| t != 0)?;
    tz.timestamp_opt(ts, 0).single()
}

/// Calendar date, e.g. `2024/1/5`. Zero and `None` mean unknown.
pub fn format_timestamp_in<Tz: TimeZone>(timestamp: Option<i64>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match to_datetime(timestamp, tz) {
        Some(dt) => dt.format("%Y/%-m/%-d").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Date and 24h time, e.g. `2024/01/05 13:04:05`. Zero and `None` mean unknown.
pub fn timestamp_to_date_in<Tz: TimeZone>(timestamp: Option<i64>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match to_datetime(timestamp, tz) {
        Some(dt) => dt.format("%Y/%m/%d %H:%M:%S").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_timestamp(timestamp: Option<i64>) -> String {
    format_timestamp_in(timestamp, &Local)
}

pub fn timestamp_to_date(timestamp: Option<i64>) -> String {
    timestamp_to_date_in(timestamp, &Local)
}

/// Registrable-looking part of a URL's host: the last two labels.
///
/// IP literals and hosts of at most two labels come back unchanged. Public
/// suffixes are not consulted, so `foo.co.uk` yields `co.uk`. Input that does
/// not parse as a URL is returned as is.
pub fn extract_domain(input: &str) -> String {
    let Ok(url) = Url::parse(input) else {
        return input.to_string();
    };
    let host = match url.host() {
        None => return String::new(),
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => return url.host_str().unwrap_or_default().to_string(),
        Some(Host::Domain(domain)) => domain,
    };
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return host.to_string();
    }
    labels[labels.len() - 2..].join(".")
}

/// Page size choices of list views; `-1` shows everything.
pub const PAGE_SIZE_OPTIONS: [(&str, i32); 5] =
    [("5", 5), ("10", 10), ("20", 20), ("50", 50), ("All", -1)];

pub fn page_title(items_per_page: i32) -> String {
    if items_per_page < 0 {
        "♾️".to_string()
    } else {
        items_per_page.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1), "1 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 * 1024 * 3 / 2), "1.5 MB");
        assert_eq!(format_bytes(1234567890), "1.15 GB");
        assert_eq!(format_bytes(5 << 40), "5 TB");
        assert_eq!(format_bytes(2048 << 40), "2048 TB");
    }

    #[test]
    fn test_timestamps() {
        assert_eq!(format_timestamp_in(None, &Utc), "N/A");
        assert_eq!(format_timestamp_in(Some(0), &Utc), "N/A");
        assert_eq!(timestamp_to_date_in(Some(0), &Utc), "N/A");
        assert_eq!(format_timestamp(None), "N/A");

        let ts = Some(1_704_459_845); // 2024-01-05T13:04:05Z
        assert_eq!(format_timestamp_in(ts, &Utc), "2024/1/5");
        assert_eq!(timestamp_to_date_in(ts, &Utc), "2024/01/05 13:04:05");

        let cst = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(timestamp_to_date_in(ts, &cst), "2024/01/05 21:04:05");
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("http://sub.example.com/path"), "example.com");
        assert_eq!(extract_domain("https://a.b.c.example.org:8443"), "example.org");
        assert_eq!(extract_domain("https://example.com"), "example.com");
        assert_eq!(extract_domain("http://localhost:9090"), "localhost");
        assert_eq!(extract_domain("http://192.168.0.1"), "192.168.0.1");
        assert_eq!(extract_domain("http://[::1]:9090/ui"), "[::1]");
        assert_eq!(extract_domain("http://foo.co.uk"), "co.uk");
        assert_eq!(extract_domain("not a url"), "not a url");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title(-1), "♾️");
        assert_eq!(page_title(20), "20");
        assert!(PAGE_SIZE_OPTIONS.iter().any(|(title, n)| *title == "All" && *n < 0));
    }
}
