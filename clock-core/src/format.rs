//! Turns remaining milliseconds into clock text.

/// Shown by a timer that ran out of time.
pub const EXHAUSTED_TEXT: &str = "0.0";

/// Timers below this are flagged urgent (shown in red by the UI).
pub const URGENT_BELOW_MS: i64 = 10_000;

const MS_PER_SEC: u64 = 1000;
const MS_PER_MIN: u64 = 60 * MS_PER_SEC;
const MS_PER_HOUR: u64 = 60 * MS_PER_MIN;

/// Format signed remaining time for a clock face.
///
/// Hours only appear when non-zero, as "HH:", and minutes as "MM:" when
/// either is non-zero. The seconds field depends on the minutes alone: with
/// no minutes left a non-negative value shows tenths ("9.0", "0.5") and a
/// negative one whole seconds, even under a full hour ("01:00:5.4"). The
/// minus sign only appears from -1000 ms down, so anything in -999..=-1
/// still reads "0".
///
/// With `allow_negative` off the value is clamped at zero first.
pub fn format_clock(remaining_ms: i64, allow_negative: bool) -> String {
    let remaining_ms = if allow_negative {
        remaining_ms
    } else {
        remaining_ms.max(0)
    };

    let mut millis = remaining_ms.unsigned_abs();
    let hours = millis / MS_PER_HOUR;
    millis -= hours * MS_PER_HOUR;
    let min = millis / MS_PER_MIN;
    millis -= min * MS_PER_MIN;
    let sec = millis / MS_PER_SEC;
    millis -= sec * MS_PER_SEC;

    let mut out = String::with_capacity(10);
    if remaining_ms <= -1000 {
        out.push('-');
    }
    if hours > 0 {
        out.push_str(&format!("{:02}:", hours));
    }
    if hours > 0 || min > 0 {
        out.push_str(&format!("{:02}:", min));
    }

    if min > 0 {
        out.push_str(&format!("{:02}", sec));
    } else if sec < 10 && remaining_ms >= 0 {
        out.push_str(&format!("{}.{}", sec, millis / 100));
    } else if sec < 10 {
        out.push_str(&format!("{}", sec));
    } else {
        out.push_str(&format!("{:02}", sec));
    }
    out
}

pub fn is_urgent(remaining_ms: i64) -> bool {
    remaining_ms < URGENT_BELOW_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(format_clock(650_000, false), "10:50");
        assert_eq!(format_clock(60_000, false), "01:00");
        assert_eq!(format_clock(61_999, false), "01:01");
    }

    #[test]
    fn test_hours() {
        assert_eq!(format_clock(3_723_000, false), "01:02:03");
        // zero minutes: seconds follow the near-zero rules
        assert_eq!(format_clock(3_605_400, false), "01:00:5.4");
        assert_eq!(format_clock(3_612_000, false), "01:00:12");
        assert_eq!(format_clock(36_000_000, false), "10:00:0.0");
        assert_eq!(format_clock(-3_605_400, true), "-01:00:5");
    }

    #[test]
    fn test_tenths_near_zero() {
        assert_eq!(format_clock(9000, false), "9.0");
        assert_eq!(format_clock(9_999, false), "9.9");
        assert_eq!(format_clock(3_250, false), "3.2");
        assert_eq!(format_clock(500, false), "0.5");
        assert_eq!(format_clock(0, false), "0.0");
        assert_eq!(format_clock(0, true), "0.0");
    }

    #[test]
    fn test_two_digit_seconds() {
        assert_eq!(format_clock(10_000, false), "10");
        assert_eq!(format_clock(59_999, false), "59");
    }

    #[test]
    fn test_negative_grace_zone() {
        assert_eq!(format_clock(-1, true), "0");
        assert_eq!(format_clock(-500, true), "0");
        assert_eq!(format_clock(-999, true), "0");
        assert_eq!(format_clock(-1000, true), "-1");
        assert_eq!(format_clock(-1200, true), "-1");
    }

    #[test]
    fn test_negative_larger_values() {
        assert_eq!(format_clock(-9_900, true), "-9");
        assert_eq!(format_clock(-12_000, true), "-12");
        assert_eq!(format_clock(-65_000, true), "-01:05");
        assert!(format_clock(i64::MIN, true).starts_with('-'));
    }

    #[test]
    fn test_negative_clamped_when_not_allowed() {
        assert_eq!(format_clock(-500, false), "0.0");
        assert_eq!(format_clock(-5_000, false), "0.0");
    }

    #[test]
    fn test_deterministic() {
        for ms in [-70_000, -1000, -1, 0, 1, 9_999, 10_000, 3_600_000] {
            assert_eq!(format_clock(ms, true), format_clock(ms, true));
        }
    }

    #[test]
    fn test_is_urgent() {
        assert!(!is_urgent(10_000));
        assert!(is_urgent(9_999));
        assert!(is_urgent(0));
        assert!(is_urgent(-3_000));
    }
}
