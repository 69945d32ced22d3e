use chrono::{DateTime, NaiveDateTime};

/// Round and clamp a backend percentage into 0..=100.
pub fn clamp_percentage(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Render a backend timestamp for display.
///
/// Accepts RFC 3339 and naive ISO-8601 (no offset). Anything else is shown
/// unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%b %-d, %Y %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}

pub fn format_optional_timestamp(raw: Option<&str>) -> String {
    raw.map(format_timestamp).unwrap_or_else(|| "--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_percentage() {
        assert_eq!(clamp_percentage(-5.0), 0);
        assert_eq!(clamp_percentage(49.4), 49);
        assert_eq!(clamp_percentage(49.5), 50);
        assert_eq!(clamp_percentage(250.0), 100);
        assert_eq!(clamp_percentage(f64::NAN), 0);
    }

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(format_timestamp("2026-03-05T14:07:00Z"), "Mar 5, 2026 14:07");
    }

    #[test]
    fn test_format_naive_iso() {
        assert_eq!(
            format_timestamp("2026-03-05T14:07:09.123456"),
            "Mar 5, 2026 14:07"
        );
    }

    #[test]
    fn test_format_unparseable_passthrough() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_optional_timestamp(None), "--");
    }
}
