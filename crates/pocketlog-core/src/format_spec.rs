//! Single-value, culture-aware formatting
//!
//! Supports the standard numeric specs (`D`, `N`, `F`, `X`, `P`, `E`, each with
//! an optional precision), custom digit patterns built from `0 # , .`, and
//! custom date/time patterns. Every function returns `None` when the spec is
//! not understood for the value, letting the caller fall back to the value's
//! default log string.

use crate::culture::Culture;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::time::Duration;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A parsed standard numeric spec such as `N2` or `x8`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Standard {
    letter: char,
    precision: Option<usize>,
}

fn parse_standard(spec: &str) -> Option<Standard> {
    let mut chars = spec.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_alphabetic() {
        return None;
    }
    let rest = chars.as_str();
    if rest.is_empty() {
        return Some(Standard {
            letter,
            precision: None,
        });
    }
    if rest.len() > 2 || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(Standard {
        letter,
        precision: rest.parse().ok(),
    })
}

fn is_digit_pattern(spec: &str) -> bool {
    spec.chars().all(|c| matches!(c, '0' | '#' | ',' | '.'))
        && spec.chars().any(|c| c == '0' || c == '#')
}

/// Format an integer value.
pub fn format_integer(value: i128, spec: &str, culture: &Culture) -> Option<String> {
    if is_digit_pattern(spec) {
        return Some(digit_pattern(value < 0, &value.unsigned_abs().to_string(), "", spec, culture));
    }
    let standard = parse_standard(spec)?;
    match standard.letter {
        'D' | 'd' => {
            let digits = value.unsigned_abs().to_string();
            let width = standard.precision.unwrap_or(0);
            let sign = if value < 0 { "-" } else { "" };
            Some(format!("{}{:0>width$}", sign, digits, width = width))
        }
        'X' | 'x' => {
            // Negative values render in two's complement, as 64-bit.
            let bits = if value < 0 {
                value as i64 as u64 as u128
            } else {
                value as u128
            };
            let hex = if standard.letter == 'X' {
                format!("{:X}", bits)
            } else {
                format!("{:x}", bits)
            };
            let width = standard.precision.unwrap_or(0);
            Some(format!("{:0>width$}", hex, width = width))
        }
        'N' | 'n' | 'F' | 'f' => {
            let decimals = standard.precision.unwrap_or(2);
            let grouped = matches!(standard.letter, 'N' | 'n');
            Some(fixed(
                value < 0,
                &value.unsigned_abs().to_string(),
                &"0".repeat(decimals),
                grouped,
                culture,
            ))
        }
        'P' | 'p' | 'E' | 'e' => format_float(value as f64, spec, culture),
        _ => None,
    }
}

/// Text for NaN and the infinities, shared by every float rendering
pub(crate) fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() {
        Some(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        None
    }
}

/// Format a floating point value.
pub fn format_float(value: f64, spec: &str, culture: &Culture) -> Option<String> {
    if let Some(text) = non_finite(value) {
        return Some(text.to_string());
    }
    if is_digit_pattern(spec) {
        let max_frac = spec
            .split_once('.')
            .map(|(_, frac)| frac.chars().filter(|c| *c == '0' || *c == '#').count())
            .unwrap_or(0);
        let (int_part, frac_part) = split_fixed(value.abs(), max_frac);
        return Some(digit_pattern(value < 0.0, &int_part, &frac_part, spec, culture));
    }
    let standard = parse_standard(spec)?;
    match standard.letter {
        'N' | 'n' | 'F' | 'f' => {
            let decimals = standard.precision.unwrap_or(2);
            let (int_part, frac_part) = split_fixed(value.abs(), decimals);
            let grouped = matches!(standard.letter, 'N' | 'n');
            let negative = is_negative(value, &int_part, &frac_part);
            Some(fixed(negative, &int_part, &frac_part, grouped, culture))
        }
        'P' | 'p' => {
            let decimals = standard.precision.unwrap_or(2);
            let scaled = value * 100.0;
            let (int_part, frac_part) = split_fixed(scaled.abs(), decimals);
            let negative = is_negative(scaled, &int_part, &frac_part);
            let number = fixed(negative, &int_part, &frac_part, true, culture);
            Some(format!("{} %", number))
        }
        'E' | 'e' => {
            let decimals = standard.precision.unwrap_or(6);
            let raw = format!("{:.*e}", decimals, value);
            let (mantissa, exponent) = raw.split_once('e')?;
            let exponent: i32 = exponent.parse().ok()?;
            let mantissa = mantissa.replace('.', &culture.decimal_separator.to_string());
            let sign = if exponent < 0 { '-' } else { '+' };
            Some(format!(
                "{}{}{}{:03}",
                mantissa,
                standard.letter,
                sign,
                exponent.unsigned_abs()
            ))
        }
        _ => None,
    }
}

fn is_negative(value: f64, int_part: &str, frac_part: &str) -> bool {
    value < 0.0 && (int_part.bytes().any(|b| b != b'0') || frac_part.bytes().any(|b| b != b'0'))
}

fn split_fixed(abs: f64, decimals: usize) -> (String, String) {
    let text = format!("{:.*}", decimals, abs);
    match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), frac_part.to_string()),
        None => (text, String::new()),
    }
}

fn group(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

fn fixed(
    negative: bool,
    int_part: &str,
    frac_part: &str,
    grouped: bool,
    culture: &Culture,
) -> String {
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if grouped {
        out.push_str(&group(int_part, culture.group_separator));
    } else {
        out.push_str(int_part);
    }
    if !frac_part.is_empty() {
        out.push(culture.decimal_separator);
        out.push_str(frac_part);
    }
    out
}

/// Apply a custom pattern such as `00`, `#,##0.00` or `0.##`.
fn digit_pattern(
    negative: bool,
    int_digits: &str,
    frac_digits: &str,
    pattern: &str,
    culture: &Culture,
) -> String {
    let (int_pattern, frac_pattern) = pattern.split_once('.').unwrap_or((pattern, ""));
    let min_int = int_pattern.chars().filter(|c| *c == '0').count();
    let min_frac = frac_pattern.chars().filter(|c| *c == '0').count();
    let grouped = int_pattern.contains(',');

    let mut int_part = int_digits.trim_start_matches('0').to_string();
    if int_part.len() < min_int {
        int_part = format!("{:0>width$}", int_part, width = min_int);
    }

    let mut frac_part = frac_digits.to_string();
    while frac_part.len() > min_frac && frac_part.ends_with('0') {
        frac_part.pop();
    }
    while frac_part.len() < min_frac {
        frac_part.push('0');
    }

    let nonzero = int_part.bytes().any(|b| b != b'0') || frac_part.bytes().any(|b| b != b'0');
    fixed(negative && nonzero, &int_part, &frac_part, grouped, culture)
}

/// Format a UTC timestamp.
///
/// Single-letter specs `o`, `s` and `u` select round-trip, sortable and
/// universal-sortable layouts; anything longer is a custom pattern.
pub fn format_timestamp(value: &DateTime<Utc>, spec: &str, culture: &Culture) -> Option<String> {
    match spec {
        "o" | "O" => return format_timestamp(value, "yyyy-MM-ddTHH:mm:ss.fffffffZ", culture),
        "s" => return format_timestamp(value, "yyyy-MM-ddTHH:mm:ss", culture),
        "u" => return format_timestamp(value, "yyyy-MM-dd HH:mm:ssZ", culture),
        _ if spec.chars().count() == 1 => return None,
        _ => {}
    }

    let mut out = String::new();
    for (ch, count) in runs(spec) {
        match ch {
            'y' if count <= 2 => out.push_str(&format!("{:02}", value.year().rem_euclid(100))),
            'y' => out.push_str(&format!("{:0>width$}", value.year(), width = count)),
            'M' => match count {
                1 => out.push_str(&value.month().to_string()),
                2 => out.push_str(&format!("{:02}", value.month())),
                3 => out.push_str(&MONTHS[value.month0() as usize][..3]),
                _ => out.push_str(MONTHS[value.month0() as usize]),
            },
            'd' => match count {
                1 => out.push_str(&value.day().to_string()),
                2 => out.push_str(&format!("{:02}", value.day())),
                3 => out.push_str(&DAYS[value.weekday().num_days_from_monday() as usize][..3]),
                _ => out.push_str(DAYS[value.weekday().num_days_from_monday() as usize]),
            },
            'H' => pad(&mut out, value.hour(), count),
            'h' => pad(&mut out, value.hour12().1, count),
            'm' => pad(&mut out, value.minute(), count),
            's' => pad(&mut out, value.second(), count),
            'f' => {
                let nanos = format!("{:09}", value.nanosecond() % 1_000_000_000);
                out.push_str(&nanos[..count.min(9)]);
            }
            't' => {
                let designator = if value.hour12().0 {
                    &culture.pm_designator
                } else {
                    &culture.am_designator
                };
                let take = if count == 1 { 1 } else { usize::MAX };
                out.extend(designator.chars().take(take));
            }
            _ => (0..count).for_each(|_| out.push(ch)),
        }
    }
    Some(out)
}

/// Format a duration with `d`, `h`, `m`, `s` and `f` fields.
///
/// `c` renders the constant layout `hh:mm:ss.fffffff` (days prefixed when
/// present). Besides the fields, a pattern may hold `:`, `.`, `-`, spaces
/// and backslash-escaped characters; anything else is unsupported.
pub fn format_duration(value: Duration, spec: &str) -> Option<String> {
    let total = value.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    let nanos = format!("{:09}", value.subsec_nanos());

    if spec == "c" {
        let mut out = String::new();
        if days > 0 {
            out.push_str(&format!("{}.", days));
        }
        out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
        if value.subsec_nanos() > 0 {
            out.push('.');
            out.push_str(&nanos[..7]);
        }
        return Some(out);
    }
    // (character, run length, literal)
    let mut parts: Vec<(char, usize, bool)> = Vec::new();
    let mut chars = spec.chars();
    while let Some(ch) = chars.next() {
        let (ch, literal) = match ch {
            '\\' => (chars.next()?, true),
            'd' | 'h' | 'm' | 's' | 'f' => (ch, false),
            ':' | '.' | '-' | ' ' => (ch, true),
            _ => return None,
        };
        match parts.last_mut() {
            Some((last, count, false)) if !literal && *last == ch => *count += 1,
            _ => parts.push((ch, 1, literal)),
        }
    }

    let mut out = String::new();
    for (ch, count, literal) in parts {
        match ch {
            _ if literal => out.push(ch),
            'd' => out.push_str(&format!("{:0>width$}", days, width = count)),
            'h' => out.push_str(&format!("{:0>width$}", hours, width = count)),
            'm' => out.push_str(&format!("{:0>width$}", minutes, width = count)),
            's' => out.push_str(&format!("{:0>width$}", seconds, width = count)),
            _ => out.push_str(&nanos[..count.min(9)]),
        }
    }
    Some(out)
}

fn pad(out: &mut String, value: u32, count: usize) {
    if count == 1 {
        out.push_str(&value.to_string());
    } else {
        out.push_str(&format!("{:02}", value));
    }
}

/// Split a pattern into runs of identical characters.
fn runs(spec: &str) -> Vec<(char, usize)> {
    let mut out: Vec<(char, usize)> = Vec::new();
    for ch in spec.chars() {
        match out.last_mut() {
            Some((last, count)) if *last == ch => *count += 1,
            _ => out.push((ch, 1)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn inv() -> Culture {
        Culture::invariant()
    }

    #[test]
    fn test_zero_padding_pattern() {
        assert_eq!(format_integer(5, "00", &inv()).as_deref(), Some("05"));
        assert_eq!(format_integer(123, "00", &inv()).as_deref(), Some("123"));
        assert_eq!(format_integer(-5, "000", &inv()).as_deref(), Some("-005"));
    }

    #[test]
    fn test_standard_integer_specs() {
        assert_eq!(format_integer(1234567, "N0", &inv()).as_deref(), Some("1,234,567"));
        assert_eq!(format_integer(1234, "N", &inv()).as_deref(), Some("1,234.00"));
        assert_eq!(format_integer(42, "D5", &inv()).as_deref(), Some("00042"));
        assert_eq!(format_integer(255, "X", &inv()).as_deref(), Some("FF"));
        assert_eq!(format_integer(255, "x4", &inv()).as_deref(), Some("00ff"));
        assert_eq!(format_integer(-1, "X", &inv()).as_deref(), Some("FFFFFFFFFFFFFFFF"));
        assert_eq!(format_integer(7, "F1", &inv()).as_deref(), Some("7.0"));
    }

    #[test]
    fn test_float_specs() {
        assert_eq!(format_float(1234.5678, "N2", &inv()).as_deref(), Some("1,234.57"));
        assert_eq!(format_float(0.256, "P1", &inv()).as_deref(), Some("25.6 %"));
        assert_eq!(format_float(1234.5678, "E2", &inv()).as_deref(), Some("1.23E+003"));
        assert_eq!(format_float(0.00012, "e1", &inv()).as_deref(), Some("1.2e-004"));
        assert_eq!(format_float(f64::NAN, "N2", &inv()).as_deref(), Some("NaN"));
    }

    #[test]
    fn test_custom_float_patterns() {
        assert_eq!(format_float(3.5, "0.00", &inv()).as_deref(), Some("3.50"));
        assert_eq!(format_float(3.5, "0.##", &inv()).as_deref(), Some("3.5"));
        assert_eq!(format_float(1234567.891, "#,##0.0", &inv()).as_deref(), Some("1,234,567.9"));
        assert_eq!(format_float(0.5, "#.##", &inv()).as_deref(), Some(".5"));
    }

    #[test]
    fn test_culture_separators() {
        let de = Culture::by_name("de-DE").unwrap();
        assert_eq!(format_float(1234.5, "N1", &de).as_deref(), Some("1.234,5"));
    }

    #[test]
    fn test_unknown_specs_are_rejected() {
        assert_eq!(format_integer(1, "Q", &inv()), None);
        assert_eq!(format_integer(1, "N123", &inv()), None);
        assert_eq!(format_float(1.0, "D2", &inv()), None);
        assert_eq!(format_float(1.0, "0 apples", &inv()), None);
    }

    #[test]
    fn test_timestamp_patterns() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            format_timestamp(&ts, "yyyy-MM-dd HH:mm:ss", &inv()).as_deref(),
            Some("2024-03-09 14:05:07")
        );
        assert_eq!(format_timestamp(&ts, "hh tt", &inv()).as_deref(), Some("02 PM"));
        assert_eq!(format_timestamp(&ts, "ddd, MMM d", &inv()).as_deref(), Some("Sat, Mar 9"));
        assert_eq!(format_timestamp(&ts, "s", &inv()).as_deref(), Some("2024-03-09T14:05:07"));
        assert_eq!(format_timestamp(&ts, "G", &inv()), None);
    }

    #[test]
    fn test_duration_patterns() {
        let d = Duration::from_millis(3_723_450);
        assert_eq!(format_duration(d, "hh\\:mm\\:ss").as_deref(), Some("01:02:03"));
        assert_eq!(format_duration(d, "c").as_deref(), Some("01:02:03.4500000"));
        assert_eq!(format_duration(d, "ss.fff").as_deref(), Some("03.450"));
        assert_eq!(format_duration(d, "Q"), None);
    }

    #[test]
    fn test_duration_rejects_foreign_patterns() {
        let d = Duration::from_millis(3_723_450);
        assert_eq!(format_duration(d, "N2"), None);
        assert_eq!(format_duration(d, "yyyy"), None);
        assert_eq!(format_duration(d, "hh\\"), None);
        assert_eq!(format_duration(d, "d\\.hh:mm").as_deref(), Some("0.01:02"));
        assert_eq!(format_duration(d, "h\\h m\\m").as_deref(), Some("1h 2m"));
    }
}
