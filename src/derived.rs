use chrono::NaiveDate;

use crate::locale::Locale;
use crate::model::ReportData;
use crate::text::format_one_decimal;

/// Fills the computed fields that are still missing on `data`.
///
/// Per-day rates divide by `days` floored to 1. The inclusive day count and
/// the joined date range are only set when both endpoints parse as calendar
/// dates.
pub fn apply_derived(data: &mut ReportData, locale: Locale) {
    let days = data.days.max(1);

    if data.sessions_per_day.is_none() {
        data.sessions_per_day = Some(per_day(data.total_sessions, days));
    }
    if data.messages_per_day.is_none() {
        data.messages_per_day = Some(per_day(data.total_messages, days));
    }

    if data.date_from.is_empty() || data.date_to.is_empty() {
        return;
    }

    if data.total_days.is_none() {
        data.total_days = inclusive_days(&data.date_from, &data.date_to);
    }
    if data.date_range.is_none() {
        data.date_range = Some(date_range(&data.date_from, &data.date_to, locale));
    }
}

pub fn per_day(total: u64, days: u64) -> String {
    format_one_decimal(total as f64 / days.max(1) as f64)
}

/// Days covered by `from..=to`; `None` when either side is not a date.
pub fn inclusive_days(from: &str, to: &str) -> Option<u64> {
    let from = NaiveDate::parse_from_str(from, "%Y-%m-%d").ok()?;
    let to = NaiveDate::parse_from_str(to, "%Y-%m-%d").ok()?;
    let span = (to - from).num_days() + 1;
    u64::try_from(span).ok()
}

pub fn date_range(from: &str, to: &str, locale: Locale) -> String {
    format!("{from}{}{to}", locale.dictionary().date_separator)
}
