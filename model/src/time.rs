/// Shown wherever a time or headway doesn't exist.
pub const NOT_APPLICABLE: &str = "N/A";

/// Seconds since midnight as zero-padded HH:MM:SS. GTFS times past
/// midnight keep their extended hour, so a last run at 93240 reads
/// 25:54:00. Zero, negative, or missing means there's nothing to show.
pub fn fmt_clock(seconds: Option<i64>) -> String {
    match seconds {
        Some(s) if s > 0 => {
            format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
        }
        _ => NOT_APPLICABLE.to_string(),
    }
}

/// A headway in minutes, the way riders read one.
pub fn fmt_headway(minutes: Option<f64>) -> String {
    match minutes {
        Some(m) if m > 0.0 => format!("every {} min", m.round() as i64),
        _ => NOT_APPLICABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_clock() {
        assert_eq!(fmt_clock(Some(3661)), "01:01:01");
        assert_eq!(fmt_clock(Some(59)), "00:00:59");
        assert_eq!(fmt_clock(Some(18000)), "05:00:00");
        // Past-midnight trips keep the extended hour
        assert_eq!(fmt_clock(Some(93240)), "25:54:00");

        assert_eq!(fmt_clock(None), "N/A");
        assert_eq!(fmt_clock(Some(0)), "N/A");
        assert_eq!(fmt_clock(Some(-5)), "N/A");
    }

    #[test]
    fn test_fmt_headway() {
        assert_eq!(fmt_headway(Some(12.4)), "every 12 min");
        assert_eq!(fmt_headway(Some(0.6)), "every 1 min");
        assert_eq!(fmt_headway(None), "N/A");
        assert_eq!(fmt_headway(Some(0.0)), "N/A");
    }
}
