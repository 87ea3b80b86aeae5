use crate::locale::Locale;

/// Parses a display count such as `1,234` or `+500`.
///
/// Thousands separators are dropped and only the leading digit run is read,
/// so trailing units (`42 files`) are ignored. Anything without a leading
/// digit yields 0.
pub fn parse_count(raw: &str) -> u64 {
    let cleaned = raw.trim().replace(',', "");
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(index, _)| index)
        .unwrap_or(digits.len());

    digits[..end].parse::<u64>().unwrap_or(0)
}

/// Reads the leading decimal number of `raw` (`12.5s` -> 12.5), 0.0 otherwise.
pub fn parse_decimal(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let mut end = 0usize;
    let mut seen_dot = false;

    for (index, ch) in trimmed.char_indices() {
        if ch.is_ascii_digit() {
            end = index + 1;
        } else if ch == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }

    trimmed[..end].parse::<f64>().unwrap_or(0.0)
}

/// Groups thousands the way the locale's number formatter does.
pub fn format_count(value: u64, locale: Locale) -> String {
    let separator = locale.dictionary().group_separator;
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }

    grouped
}

/// One decimal place, halves rounded away from zero (`0.25` -> `0.3`).
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Formats seconds the way the report prints them: `3` for whole values,
/// `12.5` otherwise.
pub fn format_seconds(value: f64) -> String {
    format!("{value}")
}

pub fn unescape_html(raw: &str) -> String {
    raw.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
}
