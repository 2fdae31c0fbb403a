// --- File: crates/calpeek_widget/src/format.rs ---
use calpeek_common::models::BusyInterval;
use chrono::{DateTime, Locale, Utc};
use chrono_tz::Tz;

/// The locale's own date and time layouts, e.g. `01/02/2024, 03:00:00 PM` for
/// `en_US` and `02.01.2024, 15:00:00` for `de_DE`.
pub const LOCALE_DATE_TIME: &str = "%x, %X";

/// Separator placed between the two ends of an interval.
pub const RANGE_SEPARATOR: &str = " – ";

/// Viewer locale and time zone used to render instants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayOptions {
    pub locale: Locale,
    pub time_zone: Tz,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            time_zone: Tz::UTC,
        }
    }
}

/// One busy interval as shown to the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedInterval {
    pub start: String,
    pub end: String,
}

impl FormattedInterval {
    pub fn label(&self) -> String {
        format!("{}{}{}", self.start, RANGE_SEPARATOR, self.end)
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

pub fn format_instant(raw: &str, options: &DisplayOptions) -> String {
    match parse_instant(raw) {
        Some(instant) => instant
            .with_timezone(&options.time_zone)
            .format_localized(LOCALE_DATE_TIME, options.locale)
            .to_string(),
        None => raw.to_string(),
    }
}

/// Orders intervals by start instant, ascending. Entries sharing a start keep
/// their order; entries whose start does not parse go last, in their
/// original order.
pub fn sort_busy(mut busy: Vec<BusyInterval>) -> Vec<BusyInterval> {
    busy.sort_by_key(|interval| match parse_instant(&interval.start) {
        Some(start) => (false, Some(start)),
        None => (true, None),
    });
    busy
}

/// Sorts and renders `busy` for display.
pub fn format_busy(busy: Vec<BusyInterval>, options: &DisplayOptions) -> Vec<FormattedInterval> {
    sort_busy(busy)
        .iter()
        .map(|interval| FormattedInterval {
            start: format_instant(&interval.start, options),
            end: format_instant(&interval.end, options),
        })
        .collect()
}
