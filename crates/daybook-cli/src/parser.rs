use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use chrono_english::{parse_date_string, Dialect};
use daybook_core::calendar::MonthCursor;

/// Parses a date given as `YYYY-MM-DD` or in natural language ("tomorrow",
/// "next friday") relative to now.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    parse_date_relative(input, Local::now())
}

pub fn parse_date_relative<Tz: TimeZone>(input: &str, now: DateTime<Tz>) -> Result<NaiveDate>
where
    Tz::Offset: Copy,
{
    let input = input.trim();
    if looks_like_iso_date(input) {
        return NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map_err(|e| anyhow!("Invalid date '{}': {}", input, e));
    }
    parse_date_string(input, now, Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))
}

fn looks_like_iso_date(input: &str) -> bool {
    let parts: Vec<&str> = input.split('-').collect();
    parts.len() == 3
        && parts[0].len() == 4
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Parses a `YYYY-MM` month.
pub fn parse_month(input: &str) -> Result<MonthCursor> {
    input
        .trim()
        .parse::<MonthCursor>()
        .map_err(|e| anyhow!("{}", e))
}
