//! `<date>` and `<time>` formatting.
//!
//! Three format styles are accepted:
//!
//! 1. A **named** format from the fixed vocabulary below.
//! 2. A **strftime** template (anything containing `%`).
//! 3. A **named-placeholder** template (`YYYY-MM-DD`, `HH:MM`), translated
//!    to strftime. `MM` means month in a date format and minutes in a time
//!    format.
//!
//! Unknown format names fall back to the defaults: "Month D, YYYY" for
//! dates and "H:MM AM/PM" for times. Several time names (`kitchen`,
//! `stamp`, `unixnano`) mirror the layout vocabulary of the system golem
//! grew up on.

use chrono::{DateTime, Datelike, Local, Timelike};

const DEFAULT_DATE: &str = "%B %-d, %Y";
const DEFAULT_TIME: &str = "%-I:%M %p";

/// Render a `<date>` format.
pub fn format_date(now: DateTime<Local>, format: Option<&str>) -> String {
    let Some(format) = format.map(str::trim).filter(|f| !f.is_empty()) else {
        return now.format(DEFAULT_DATE).to_string();
    };

    match format.to_ascii_lowercase().as_str() {
        "short" => now.format("%m/%d/%y").to_string(),
        "long" => now.format("%A, %B %-d, %Y").to_string(),
        "iso" => now.format("%Y-%m-%d").to_string(),
        "us" => now.format("%B %-d, %Y").to_string(),
        "european" => now.format("%-d %B %Y").to_string(),
        "day" => now.day().to_string(),
        "month" => now.month().to_string(),
        "year" => now.year().to_string(),
        "dayofyear" => now.ordinal().to_string(),
        "weekday" => now.weekday().num_days_from_sunday().to_string(),
        "week" => now.iso_week().week().to_string(),
        "quarter" => format!("Q{}", (now.month() - 1) / 3 + 1),
        "leapyear" => yes_no(is_leap_year(now.year())),
        "daysinmonth" => days_in_month(now.year(), now.month()).to_string(),
        "daysinyear" => if is_leap_year(now.year()) { "366" } else { "365" }.to_string(),
        _ => {
            if format.contains('%') {
                try_strftime(now, format, DEFAULT_DATE)
            } else if let Some(translated) = translate_date_placeholders(format) {
                try_strftime(now, &translated, DEFAULT_DATE)
            } else {
                now.format(DEFAULT_DATE).to_string()
            }
        }
    }
}

/// Render a `<time>` format.
pub fn format_time(now: DateTime<Local>, format: Option<&str>) -> String {
    let Some(format) = format.map(str::trim).filter(|f| !f.is_empty()) else {
        return now.format(DEFAULT_TIME).to_string();
    };

    match format.to_ascii_lowercase().as_str() {
        "12" => now.format("%-I:%M %p").to_string(),
        "24" => now.format("%H:%M").to_string(),
        "iso" => now.format("%H:%M:%S").to_string(),
        "hour" => now.hour().to_string(),
        "minute" => now.minute().to_string(),
        "second" => now.second().to_string(),
        "millisecond" => now.timestamp_subsec_millis().to_string(),
        "timezone" => now.format("%Z").to_string(),
        "offset" => now.format("%z").to_string(),
        "unix" => now.timestamp().to_string(),
        "unixmilli" => now.timestamp_millis().to_string(),
        "unixnano" => now
            .timestamp_nanos_opt()
            .map(|n| n.to_string())
            .unwrap_or_else(|| now.timestamp_millis().to_string()),
        "rfc3339" => now.to_rfc3339(),
        "rfc822" => now.format("%a, %d %b %y %H:%M:%S %z").to_string(),
        "kitchen" => now.format("%-I:%M%p").to_string(),
        "stamp" => now.format("%b %e %H:%M:%S").to_string(),
        "stampmilli" => now.format("%b %e %H:%M:%S%.3f").to_string(),
        "stampmicro" => now.format("%b %e %H:%M:%S%.6f").to_string(),
        "stampnano" => now.format("%b %e %H:%M:%S%.9f").to_string(),
        _ => {
            if format.contains('%') {
                try_strftime(now, format, DEFAULT_TIME)
            } else if let Some(translated) = translate_time_placeholders(format) {
                try_strftime(now, &translated, DEFAULT_TIME)
            } else {
                now.format(DEFAULT_TIME).to_string()
            }
        }
    }
}

/// Render a caller-supplied strftime template; an invalid specifier falls
/// back to the default instead of propagating chrono's format failure.
fn try_strftime(now: DateTime<Local>, format: &str, default: &str) -> String {
    use std::fmt::Write;
    let mut out = String::new();
    match write!(out, "{}", now.format(format)) {
        Ok(()) => out,
        Err(_) => now.format(default).to_string(),
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

/// `YYYY-MM-DD` style → strftime; `None` when nothing translated.
fn translate_date_placeholders(format: &str) -> Option<String> {
    translate(format, &[("YYYY", "%Y"), ("YY", "%y"), ("MM", "%m"), ("DD", "%d")])
}

/// `HH:MM:SS` style → strftime.
fn translate_time_placeholders(format: &str) -> Option<String> {
    translate(format, &[("HH", "%H"), ("MM", "%M"), ("SS", "%S")])
}

fn translate(format: &str, table: &[(&str, &str)]) -> Option<String> {
    let mut out = format.to_string();
    let mut hit = false;
    for (placeholder, strftime) in table {
        if out.contains(placeholder) {
            out = out.replace(placeholder, strftime);
            hit = true;
        }
    }
    hit.then_some(out)
}
