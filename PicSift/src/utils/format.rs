///! Formatting helpers for the presentation layer

const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

/// Human-readable byte size
///
/// Base 1024, capped at GB. Values below 10 in KB and above keep one decimal.
///
/// # Examples
/// ```
/// use picsift::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(2048), "2.0 KB");
/// assert_eq!(format_bytes(13 * 1024 * 1024), "13 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let decimals = if value < 10.0 && unit > 0 { 1 } else { 0 };
    format!("{:.*} {}", decimals, value, UNITS[unit])
}

/// Gallery count label, e.g. `"1 image"` or `"3 images"`
pub fn format_count(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{} image{}", count, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_first_tier() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(5), "5 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1023), "1023 B");
    }

    #[test]
    fn test_format_bytes_one_decimal_below_ten() {
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }

    #[test]
    fn test_format_bytes_no_decimal_from_ten() {
        assert_eq!(format_bytes(10 * 1024), "10 KB");
        assert_eq!(format_bytes(13 * 1024 * 1024), "13 MB");
        assert_eq!(format_bytes(700 * 1024 * 1024), "700 MB");
    }

    #[test]
    fn test_format_bytes_caps_at_gb() {
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0 images");
        assert_eq!(format_count(1), "1 image");
        assert_eq!(format_count(42), "42 images");
    }
}
