use std::f64::consts::PI;

use crate::locale::Locale;
use crate::model::ChartBar;
use crate::text::{format_count, format_one_decimal};

const DONUT_SIZE: f64 = 120.0;
const DONUT_STROKE: u32 = 16;
const DONUT_SEGMENTS: usize = 6;
const PALETTE: [&str; 8] = [
    "#2f81f7", "#388bfd", "#39d2c0", "#3fb950", "#f0883e", "#db61a2", "#d29922", "#8b5cf6",
];
const DAY_PART_COLOR: &str = "#8b5cf6";
const SIDEBAR_ROWS: usize = 5;

/// Percent of the largest value, with a zero maximum treated as 1.
pub fn bar_widths(values: &[u64]) -> Vec<f64> {
    let max = values.iter().copied().max().filter(|max| *max > 0).unwrap_or(1) as f64;
    values
        .iter()
        .map(|value| *value as f64 / max * 100.0)
        .collect()
}

pub fn no_data(locale: Locale) -> String {
    format!(
        r#"<div style="color:var(--text-dim);font-size:12px;">{}</div>"#,
        locale.dictionary().no_data
    )
}

/// Horizontal bar rows with translated labels; widths are recomputed from the
/// values rather than trusted from the snapshot.
pub fn bar_rows(bars: &[ChartBar], locale: Locale) -> String {
    if bars.is_empty() {
        return no_data(locale);
    }

    let values = bars.iter().map(|bar| bar.value).collect::<Vec<u64>>();
    bars.iter()
        .zip(bar_widths(&values))
        .map(|(bar, width)| {
            bar_row(
                locale.translate(&bar.label),
                width,
                &bar.color,
                &format_count(bar.value, locale),
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Time-of-day rows; always one row per bucket even when every count is zero.
pub fn day_part_rows(buckets: &[(&str, u64)], locale: Locale) -> String {
    let values = buckets.iter().map(|(_, count)| *count).collect::<Vec<u64>>();
    buckets
        .iter()
        .zip(bar_widths(&values))
        .map(|((label, count), width)| {
            bar_row(label, width, DAY_PART_COLOR, &format_count(*count, locale))
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn bar_row(label: &str, width: f64, color: &str, value: &str) -> String {
    format!(
        "      <div class=\"bar-row\">\n        <div class=\"bar-label\">{label}</div>\n        <div class=\"bar-track\"><div class=\"bar-fill\" style=\"width:{}%;background:{color}\"></div></div>\n        <div class=\"bar-value\">{value}</div>\n      </div>",
        format_one_decimal(width)
    )
}

/// Ring chart of the first six bars plus legend. Shares are taken against the
/// total of all bars, so a long tail leaves part of the ring empty.
pub fn donut(bars: &[ChartBar], locale: Locale) -> String {
    let total = bars.iter().map(|bar| bar.value).sum::<u64>();
    if total == 0 {
        return String::new();
    }

    let center = DONUT_SIZE / 2.0;
    let radius = center - 8.0;
    let circumference = 2.0 * PI * radius;
    let shown = &bars[..bars.len().min(DONUT_SEGMENTS)];

    let mut offset = 0.0f64;
    let mut segments = Vec::with_capacity(shown.len());
    for (index, bar) in shown.iter().enumerate() {
        let dash = bar.value as f64 / total as f64 * circumference;
        let gap = circumference - dash;
        segments.push(format!(
            r#"<circle cx="{center}" cy="{center}" r="{radius}" fill="none" stroke="{}" stroke-width="{DONUT_STROKE}" stroke-dasharray="{dash} {gap}" stroke-dashoffset="{}" transform="rotate(-90 {center} {center})"/>"#,
            palette_color(index),
            0.0 - offset
        ));
        offset += dash;
    }

    let svg = format!(
        "<svg width=\"{DONUT_SIZE}\" height=\"{DONUT_SIZE}\" viewBox=\"0 0 {DONUT_SIZE} {DONUT_SIZE}\">\n    <circle cx=\"{center}\" cy=\"{center}\" r=\"{radius}\" fill=\"none\" stroke=\"rgba(255,255,255,0.05)\" stroke-width=\"{DONUT_STROKE}\"/>\n    {}\n    <text x=\"{center}\" y=\"{}\" text-anchor=\"middle\" fill=\"#f0f6fc\" font-size=\"18\" font-weight=\"700\">{}</text>\n    <text x=\"{center}\" y=\"{}\" text-anchor=\"middle\" fill=\"#8b949e\" font-size=\"10\">{}</text>\n  </svg>",
        segments.join("\n    "),
        center - 4.0,
        format_count(total, locale),
        center + 14.0,
        locale.dictionary().total
    );

    let legend = shown
        .iter()
        .enumerate()
        .map(|(index, bar)| {
            format!(
                r#"<div class="legend-item"><span class="legend-dot" style="background:{}"></span>{} {} ({}%)</div>"#,
                palette_color(index),
                bar.label,
                format_count(bar.value, locale),
                format_one_decimal(bar.value as f64 / total as f64 * 100.0)
            )
        })
        .collect::<Vec<String>>()
        .join("\n      ");

    format!(
        "<div class=\"donut-wrap\">\n    {svg}\n    <div class=\"donut-legend\">\n      {legend}\n    </div>\n  </div>"
    )
}

fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn sidebar_stats(bars: &[ChartBar], locale: Locale) -> String {
    bars.iter()
        .take(SIDEBAR_ROWS)
        .map(|bar| {
            format!(
                r#"      <div class="sidebar-stat"><span class="sidebar-stat-label">{}</span><span class="sidebar-stat-value">{}</span></div>"#,
                bar.label,
                format_count(bar.value, locale)
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(label: &str, value: u64) -> ChartBar {
        ChartBar {
            label: label.to_string(),
            width: 0.0,
            color: "#2f81f7".to_string(),
            value,
        }
    }

    #[test]
    fn widths_are_relative_to_the_largest_value() {
        assert_eq!(bar_widths(&[10, 5, 3]), vec![100.0, 50.0, 30.0]);
        assert_eq!(bar_widths(&[0, 0]), vec![0.0, 0.0]);
        assert!(bar_widths(&[]).is_empty());
    }

    #[test]
    fn max_bar_is_full_width_and_labels_are_translated() {
        let html = bar_rows(&[bar("Debugging", 1200), bar("Exploration", 400)], Locale::Ko);

        assert_eq!(html.matches("class=\"bar-row\"").count(), 2);
        assert!(html.contains("width:100.0%"));
        assert!(html.contains("width:33.3%"));
        assert!(html.contains(">디버깅<"));
        assert!(html.contains(">1,200<"));
    }

    #[test]
    fn half_percent_shares_round_up() {
        let bars = [bar("Rust", 16), bar("Go", 1)];

        assert!(bar_rows(&bars, Locale::En).contains("width:6.3%"));
        let html = donut(&[bar("Rust", 15), bar("Go", 1)], Locale::En);
        assert!(html.contains("Go 1 (6.3%)"));
    }

    #[test]
    fn empty_bars_render_localized_placeholder() {
        assert_eq!(
            bar_rows(&[], Locale::En),
            r#"<div style="color:var(--text-dim);font-size:12px;">No data</div>"#
        );
        assert!(bar_rows(&[], Locale::Ko).contains("데이터 없음"));
    }

    #[test]
    fn day_part_rows_keep_zero_buckets() {
        let html = day_part_rows(&[("Morning (6-12)", 0), ("Night (0-6)", 0)], Locale::En);
        assert_eq!(html.matches("background:#8b5cf6").count(), 2);
        assert_eq!(html.matches("width:0.0%").count(), 2);
    }

    #[test]
    fn donut_uses_first_six_and_total_of_all() {
        let bars = (1..=8).map(|i| bar(&format!("L{i}"), 10)).collect::<Vec<ChartBar>>();
        let html = donut(&bars, Locale::En);

        assert_eq!(html.matches("stroke-dasharray").count(), 6);
        assert_eq!(html.matches("legend-item").count(), 6);
        assert!(html.contains(">80</text>"));
        assert!(html.contains(">Total</text>"));
        assert!(html.contains("L1 10 (12.5%)"));
        assert!(html.contains(r#"stroke-dashoffset="0""#));
        assert!(!html.contains("L7"));
    }

    #[test]
    fn donut_of_zero_total_is_empty() {
        assert_eq!(donut(&[], Locale::En), "");
        assert_eq!(donut(&[bar("Rust", 0)], Locale::Ko), "");
    }

    #[test]
    fn sidebar_lists_top_five() {
        let bars = (1..=7).map(|i| bar(&format!("T{i}"), i)).collect::<Vec<ChartBar>>();
        let html = sidebar_stats(&bars, Locale::En);

        assert_eq!(html.lines().count(), 5);
        assert!(html.contains("sidebar-stat-label\">T5<"));
        assert!(!html.contains("T6"));
    }
}
