//! Date helper functions

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Long display format, e.g. "January 15, 2024"
pub const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// Format a date in ISO 8601 for `datetime` attributes
pub fn date_xml<T: TimeZone>(date: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Format a date for display, in the given timezone when one is set
pub fn display_date(date: &DateTime<Utc>, tz: Option<Tz>) -> String {
    match tz {
        Some(tz) => date.with_timezone(&tz).format(LONG_DATE_FORMAT).to_string(),
        None => date.format(LONG_DATE_FORMAT).to_string(),
    }
}

/// Generate a <time> HTML element
pub fn time_tag(date: &DateTime<Utc>, tz: Option<Tz>, class: Option<&str>) -> String {
    let class_attr = class
        .map(|c| format!(r#" class="{}""#, c))
        .unwrap_or_default();
    let datetime = match tz {
        Some(tz) => date_xml(&date.with_timezone(&tz)),
        None => date_xml(date),
    };
    format!(
        r#"<time{} datetime="{}">{}</time>"#,
        class_attr,
        datetime,
        display_date(date, tz)
    )
}
