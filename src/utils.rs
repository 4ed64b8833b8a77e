use crate::Penalty;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Compiled regexes for time entry parsing
static TIME_MIN_SEC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)m\s*(\d+)s$").unwrap());
static TIME_COLON_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2})$").unwrap());
static TIME_SEC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)s$").unwrap());
static TIME_COLON_FRACTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2})\.(\d{1,3})$").unwrap());
static TIME_SEC_FRACTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.(\d{1,3})$").unwrap());
static DNF_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)dnf(?:\s*\((.*)\))?$").unwrap());

/// Time parsing error types for better error handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    EmptyInput,
    InvalidFormat(String),
    InvalidMinutes,
    InvalidSeconds(u32),
    InvalidFraction,
    Overflow,
}

impl std::fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeParseError::EmptyInput => write!(f, "Time cannot be empty"),
            TimeParseError::InvalidFormat(hint) => write!(f, "Invalid time format. {}", hint),
            TimeParseError::InvalidMinutes => write!(f, "Invalid minutes value"),
            TimeParseError::InvalidSeconds(s) => write!(f, "Invalid seconds: {} (must be 0-59)", s),
            TimeParseError::InvalidFraction => write!(f, "Invalid fractional seconds value"),
            TimeParseError::Overflow => write!(f, "Time is too large"),
        }
    }
}

impl std::error::Error for TimeParseError {}

/// A manually typed solve result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub time: u32,
    pub penalty: Option<Penalty>,
}

// Components are capped at u32 so the millisecond arithmetic below cannot overflow u64.
fn parse_number(digits: &str, err: TimeParseError) -> Result<u64, TimeParseError> {
    digits.parse::<u32>().map(u64::from).map_err(|_| err)
}

/// Scale a 1-3 digit fraction to milliseconds: "4" → 400, "43" → 430, "432" → 432.
fn fraction_to_ms(digits: &str) -> Result<u64, TimeParseError> {
    let value = parse_number(digits, TimeParseError::InvalidFraction)?;
    Ok(match digits.len() {
        1 => value * 100,
        2 => value * 10,
        _ => value,
    })
}

fn checked_seconds(digits: &str) -> Result<u64, TimeParseError> {
    let seconds = parse_number(digits, TimeParseError::InvalidSeconds(0))?;
    if seconds > 59 {
        return Err(TimeParseError::InvalidSeconds(seconds as u32));
    }
    Ok(seconds)
}

fn to_ms(total: u64) -> Result<u32, TimeParseError> {
    u32::try_from(total).map_err(|_| TimeParseError::Overflow)
}

/// Parse a duration string in various formats to milliseconds.
///
/// Supported formats:
/// - Pure number: "12340" (interpreted as milliseconds)
/// - Seconds with fraction: "12.34"
/// - Minutes:seconds with fraction: "1:05.43"
/// - Colon format: "2:30" (minutes:seconds)
/// - Minutes and seconds: "2m 30s" or "2m30s"
/// - Seconds only: "150s"
///
/// # Examples
/// ```
/// use cube_timer::utils::parse_time_to_ms;
/// assert_eq!(parse_time_to_ms("1:05.43"), Ok(65_430));
/// assert_eq!(parse_time_to_ms("12.34"), Ok(12_340));
/// assert_eq!(parse_time_to_ms("2m30s"), Ok(150_000));
/// assert_eq!(parse_time_to_ms("150000"), Ok(150_000));
/// ```
pub fn parse_time_to_ms(input: &str) -> Result<u32, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::EmptyInput);
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return to_ms(parse_number(trimmed, TimeParseError::Overflow)?);
    }

    if let Some(captures) = TIME_SEC_FRACTION_REGEX.captures(trimmed) {
        let seconds = parse_number(&captures[1], TimeParseError::Overflow)?;
        let fraction = fraction_to_ms(&captures[2])?;
        return to_ms(seconds * 1_000 + fraction);
    }

    if let Some(captures) = TIME_COLON_FRACTION_REGEX.captures(trimmed) {
        let minutes = parse_number(&captures[1], TimeParseError::InvalidMinutes)?;
        let seconds = checked_seconds(&captures[2])?;
        let fraction = fraction_to_ms(&captures[3])?;
        return to_ms(minutes * 60_000 + seconds * 1_000 + fraction);
    }

    if let Some(captures) = TIME_COLON_REGEX.captures(trimmed) {
        let minutes = parse_number(&captures[1], TimeParseError::InvalidMinutes)?;
        let seconds = checked_seconds(&captures[2])?;
        return to_ms(minutes * 60_000 + seconds * 1_000);
    }

    if let Some(captures) = TIME_MIN_SEC_REGEX.captures(trimmed) {
        let minutes = parse_number(&captures[1], TimeParseError::InvalidMinutes)?;
        let seconds = checked_seconds(&captures[2])?;
        return to_ms(minutes * 60_000 + seconds * 1_000);
    }

    if let Some(captures) = TIME_SEC_REGEX.captures(trimmed) {
        let seconds = parse_number(&captures[1], TimeParseError::Overflow)?;
        return to_ms(seconds * 1_000);
    }

    Err(TimeParseError::InvalidFormat(
        "Use: 12.34, 1:05.43, 2:30, 2m30s, 150s or 150000".to_string(),
    ))
}

/// Parse a typed solve result, including its penalty.
///
/// A trailing `+` marks a +2 (the time is taken as the raw solve time, the
/// way `format_time` renders it). `DNF` alone, or `DNF(<time>)`, marks a DNF.
pub fn parse_time_entry(input: &str) -> Result<TimeEntry, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::EmptyInput);
    }

    if let Some(captures) = DNF_REGEX.captures(trimmed) {
        let time = match captures.get(1) {
            Some(inner) if !inner.as_str().trim().is_empty() => parse_time_to_ms(inner.as_str())?,
            _ => 0,
        };
        return Ok(TimeEntry { time, penalty: Some(Penalty::Dnf) });
    }

    if let Some(raw) = trimmed.strip_suffix('+') {
        let time = parse_time_to_ms(raw)?;
        return Ok(TimeEntry { time, penalty: Some(Penalty::PlusTwo) });
    }

    let time = parse_time_to_ms(trimmed)?;
    Ok(TimeEntry { time, penalty: None })
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Opaque identifier: a random base-36 part followed by the base-36 epoch millis.
pub fn generate_id() -> String {
    let random: u64 = rand::rng().random();
    let now_ms = chrono::Utc::now().timestamp_millis().max(0) as u64;
    format!("{}{}", to_base36(random), to_base36(now_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_plain_forms() {
        assert_eq!(parse_time_to_ms("12.34"), Ok(12_340));
        assert_eq!(parse_time_to_ms("9.5"), Ok(9_500));
        assert_eq!(parse_time_to_ms("9.512"), Ok(9_512));
        assert_eq!(parse_time_to_ms("1:05.43"), Ok(65_430));
        assert_eq!(parse_time_to_ms("2:30"), Ok(150_000));
        assert_eq!(parse_time_to_ms("2m 30s"), Ok(150_000));
        assert_eq!(parse_time_to_ms("45s"), Ok(45_000));
        assert_eq!(parse_time_to_ms(" 65432 "), Ok(65_432));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(parse_time_to_ms("  "), Err(TimeParseError::EmptyInput));
        assert_eq!(parse_time_to_ms("1:75.00"), Err(TimeParseError::InvalidSeconds(75)));
        assert!(matches!(parse_time_to_ms("abc"), Err(TimeParseError::InvalidFormat(_))));
        assert_eq!(parse_time_to_ms("99999999999"), Err(TimeParseError::Overflow));
    }

    #[test]
    fn test_parse_entry_penalties() {
        assert_eq!(
            parse_time_entry("5.43+"),
            Ok(TimeEntry { time: 5_430, penalty: Some(Penalty::PlusTwo) })
        );
        assert_eq!(
            parse_time_entry("dnf"),
            Ok(TimeEntry { time: 0, penalty: Some(Penalty::Dnf) })
        );
        assert_eq!(
            parse_time_entry("DNF(12.34)"),
            Ok(TimeEntry { time: 12_340, penalty: Some(Penalty::Dnf) })
        );
        assert_eq!(
            parse_time_entry("1:05.43"),
            Ok(TimeEntry { time: 65_430, penalty: None })
        );
    }

    #[test]
    fn test_entry_round_trips_formatted_time() {
        let shown = crate::format_time(65_430, Some(Penalty::PlusTwo));
        let entry = parse_time_entry(&shown).unwrap();
        assert_eq!(entry.time, 65_430);
        assert_eq!(entry.penalty, Some(Penalty::PlusTwo));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.bytes().all(|b| b.is_ascii_alphanumeric())));
    }
}
