// src/time_ctrl/format.rs
//! Текст на циферблате.
//!
//! - от минуты и выше: `H:MM:SS` / `M:SS` по модулю остатка;
//! - меньше 10 секунд и не в минусе: секунды с одним знаком после точки (`7.3`);
//! - в минусе до минуты: целые секунды без дробной части (`0`, `-3`);
//! - минус ставится, только когда остаток `<= -1000` мс.

use crate::domain::DurationMs;

const MS_PER_SEC: u64 = 1000;
const MS_PER_MIN: u64 = 60 * MS_PER_SEC;
const MS_PER_HOUR: u64 = 60 * MS_PER_MIN;

/// Что рисовать на часах с истёкшим временем.
pub const EXPIRED_DISPLAY: &str = "0.0";

pub fn format_remaining(remaining_ms: DurationMs) -> String {
    let mut millis = remaining_ms.unsigned_abs();

    let hours = millis / MS_PER_HOUR;
    millis -= hours * MS_PER_HOUR;
    let minutes = millis / MS_PER_MIN;
    millis -= minutes * MS_PER_MIN;
    let secs = millis / MS_PER_SEC;
    millis -= secs * MS_PER_SEC;

    let mut out = String::new();
    if remaining_ms <= -(MS_PER_SEC as DurationMs) {
        out.push('-');
    }

    if hours > 0 {
        out.push_str(&format!("{}:{:02}:", hours, minutes));
    } else if minutes > 0 {
        out.push_str(&format!("{}:", minutes));
    }

    if hours == 0 && minutes == 0 && secs < 10 {
        if remaining_ms >= 0 {
            let value = secs as f64 + millis as f64 / 1000.0;
            out.push_str(&format!("{:.1}", value));
        } else {
            out.push_str(&secs.to_string());
        }
    } else {
        out.push_str(&format!("{:02}", secs));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_minutes_seconds() {
        assert_eq!(format_remaining(3_725_000), "1:02:05");
        assert_eq!(format_remaining(300_000), "5:00");
        assert_eq!(format_remaining(65_000), "1:05");
        assert_eq!(format_remaining(60_000), "1:00");
    }

    #[test]
    fn under_a_minute() {
        assert_eq!(format_remaining(59_999), "59");
        assert_eq!(format_remaining(10_000), "10");
        assert_eq!(format_remaining(7_300), "7.3");
        assert_eq!(format_remaining(0), "0.0");
    }

    #[test]
    fn negative_time() {
        assert_eq!(format_remaining(-1), "0");
        assert_eq!(format_remaining(-500), "0");
        assert_eq!(format_remaining(-999), "0");
        assert_eq!(format_remaining(-1_000), "-1");
        assert_eq!(format_remaining(-3_400), "-3");
        assert_eq!(format_remaining(-3_900), "-3");
        assert_eq!(format_remaining(-15_000), "-15");
        assert_eq!(format_remaining(-65_000), "-1:05");
    }
}
