use std::collections::BTreeMap;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, warn};

use crate::model::ReportData;
use crate::text::parse_count;

/// Compiled patterns for every recognized region of `report.html`.
///
/// Each scanner in `sections.rs` reads the document independently, so a
/// region that fails to match only leaves its own fields at their defaults.
#[derive(Debug)]
pub struct ReportParser {
    pub(super) subtitle: Regex,
    pub(super) message_count: Regex,
    pub(super) session_count: Regex,
    pub(super) date_span: Regex,
    pub(super) stat_pair: Regex,
    pub(super) line_delta: Regex,
    pub(super) glance_section: Regex,
    pub(super) glance_heading: Regex,
    pub(super) glance_text: Regex,
    pub(super) chart_title: Regex,
    pub(super) chart_bar: Regex,
    pub(super) big_win: Regex,
    pub(super) friction: Regex,
    pub(super) list_item: Regex,
    pub(super) feature: Regex,
    pub(super) horizon: Regex,
    pub(super) narrative: Regex,
    pub(super) paragraph: Regex,
    pub(super) key_insight: Regex,
    pub(super) hour_literal: Regex,
    pub(super) median_response: Regex,
    pub(super) average_response: Regex,
    pub(super) overlap_badge: Regex,
    pub(super) fun_headline: Regex,
    pub(super) fun_detail: Regex,
    pub(super) project_area: Regex,
    pub(super) wins_intro: Regex,
    pub(super) friction_intro: Regex,
    pub(super) horizon_intro: Regex,
    pub(super) tag: Regex,
}

impl ReportParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            subtitle: Regex::new(r#"<p class="subtitle">(.*?)</p>"#)
                .context("failed to compile subtitle regex")?,
            message_count: Regex::new(r"([\d,]+)\s*messages")
                .context("failed to compile message count regex")?,
            session_count: Regex::new(r"([\d,]+)\s*sessions")
                .context("failed to compile session count regex")?,
            date_span: Regex::new(r"(\d{4}-\d{2}-\d{2})\s*to\s*(\d{4}-\d{2}-\d{2})")
                .context("failed to compile date span regex")?,
            stat_pair: Regex::new(
                r#"<div class="stat-value">(.*?)</div>\s*<div class="stat-label">(.*?)</div>"#,
            )
            .context("failed to compile stat pair regex")?,
            line_delta: Regex::new(r"\+?([\d,]+)\s*/\s*-?([\d,]+)")
                .context("failed to compile lines changed regex")?,
            glance_section: Regex::new(r#"(?s)<div class="glance-section">.*?</div>"#)
                .context("failed to compile glance section regex")?,
            glance_heading: Regex::new(r"<strong>(.*?)</strong>")
                .context("failed to compile glance heading regex")?,
            glance_text: Regex::new(r"(?s)</strong>(.*?)(?:<a |$)")
                .context("failed to compile glance text regex")?,
            chart_title: Regex::new(r#"<div class="chart-title"[^>]*>"#)
                .context("failed to compile chart title regex")?,
            chart_bar: Regex::new(
                r#"(?s)<div class="bar-label">([^\n]*?)</div>.*?width:([\d.]+)%.*?background:(#[0-9a-fA-F]+).*?<div class="bar-value">([\d,]+)</div>"#,
            )
            .context("failed to compile chart bar regex")?,
            big_win: Regex::new(
                r#"(?s)<div class="big-win-title">([^\n]*?)</div>\s*<div class="big-win-desc">(.*?)</div>"#,
            )
            .context("failed to compile big win regex")?,
            friction: Regex::new(
                r#"(?s)<div class="friction-title">([^\n]*?)</div>\s*<div class="friction-desc">(.*?)</div>\s*(?:<ul class="friction-examples">(.*?)</ul>)?"#,
            )
            .context("failed to compile friction regex")?,
            list_item: Regex::new(r"(?s)<li>(.*?)</li>")
                .context("failed to compile list item regex")?,
            feature: Regex::new(
                r#"(?s)<div class="feature-title">([^\n]*?)</div>\s*<div class="feature-oneliner">(.*?)</div>\s*<div class="feature-why">(.*?)</div>"#,
            )
            .context("failed to compile feature regex")?,
            horizon: Regex::new(
                r#"(?s)<div class="horizon-title">([^\n]*?)</div>\s*<div class="horizon-possible">(.*?)</div>\s*<div class="horizon-tip">(.*?)</div>"#,
            )
            .context("failed to compile horizon regex")?,
            narrative: Regex::new(
                r#"(?s)<div class="narrative">(.*?)</div>\s*(?:<div class="key-insight">|$)"#,
            )
            .context("failed to compile narrative regex")?,
            paragraph: Regex::new(r"(?s)<p>(.*?)</p>")
                .context("failed to compile paragraph regex")?,
            key_insight: Regex::new(r#"(?s)<div class="key-insight">(.*?)</div>"#)
                .context("failed to compile key insight regex")?,
            hour_literal: Regex::new(r"rawHourCounts\s*=\s*(\{[^}]+\})")
                .context("failed to compile hour counts regex")?,
            median_response: Regex::new(r"Median:\s*([\d.]+)s")
                .context("failed to compile median response regex")?,
            average_response: Regex::new(r"Average:\s*([\d.]+)s")
                .context("failed to compile average response regex")?,
            overlap_badge: Regex::new(
                r#"<div style="font-size: 24px; font-weight: 700; color: #7c3aed;">([\d,%]+)</div>\s*<div[^>]*>(.*?)</div>"#,
            )
            .context("failed to compile overlap badge regex")?,
            fun_headline: Regex::new(r#"(?s)<div class="fun-headline">(.*?)</div>"#)
                .context("failed to compile fun headline regex")?,
            fun_detail: Regex::new(r#"(?s)<div class="fun-detail">(.*?)</div>"#)
                .context("failed to compile fun detail regex")?,
            project_area: Regex::new(
                r#"(?s)<span class="area-name">([^\n]*?)</span>\s*<span class="area-count">([^\n]*?)</span>.*?<div class="area-desc">(.*?)</div>"#,
            )
            .context("failed to compile project area regex")?,
            wins_intro: section_intro_regex("section-wins")?,
            friction_intro: section_intro_regex("section-friction")?,
            horizon_intro: section_intro_regex("section-horizon")?,
            tag: Regex::new(r"<[^>]+>").context("failed to compile tag regex")?,
        })
    }

    /// Recovers a [`ReportData`] from the report markup.
    ///
    /// Unmatched regions leave their fields at the defaults. The only error is
    /// an embedded hour histogram that is present but not valid JSON.
    pub fn parse(&self, html: &str) -> Result<ReportData> {
        let summary = self.summary(html);
        let stats = self.stats(html);
        let lines = self.lines_changed(&stats);
        let responses = self.response_times(html);

        let data = ReportData {
            total_messages: summary.total_messages,
            total_sessions: summary.total_sessions,
            date_from: summary.date_from,
            date_to: summary.date_to,
            lines_added: lines.added,
            lines_removed: lines.removed,
            files_changed: stat_count(&stats, "files"),
            days: stat_count(&stats, "days"),
            stats,
            glance: self.glance(html),
            charts: self.charts(html),
            big_wins: self.big_wins(html),
            frictions: self.frictions(html),
            features: self.features(html),
            horizons: self.horizons(html),
            narrative: self.narrative_text(html),
            key_insight: self.block_text(&self.key_insight, html),
            raw_hour_counts: self.hour_counts(html)?,
            median_response_time: responses.median,
            avg_response_time: responses.average,
            multi_clauding: self.multi_clauding(html),
            fun_ending: self.fun_ending(html),
            project_areas: self.project_areas(html),
            wins_intro: self.first_capture(&self.wins_intro, html),
            friction_intro: self.first_capture(&self.friction_intro, html),
            horizon_intro: self.first_capture(&self.horizon_intro, html),
            ..ReportData::default()
        };

        log_coverage(&data);
        Ok(data)
    }
}

fn section_intro_regex(section_id: &str) -> Result<Regex> {
    Regex::new(&format!(
        r#"(?s)<h2 id="{section_id}">.*?<p class="section-intro">(.*?)</p>"#
    ))
    .with_context(|| format!("failed to compile section intro regex for {section_id}"))
}

fn stat_count(stats: &BTreeMap<String, String>, key: &str) -> u64 {
    stats.get(key).map(|value| parse_count(value)).unwrap_or(0)
}

fn log_coverage(data: &ReportData) {
    debug!(
        stats = data.stats.len(),
        glance = data.glance.len(),
        charts = data.charts.len(),
        big_wins = data.big_wins.len(),
        frictions = data.frictions.len(),
        features = data.features.len(),
        horizons = data.horizons.len(),
        project_areas = data.project_areas.len(),
        hours = data.raw_hour_counts.len(),
        "extracted report sections"
    );

    let empty_sections = [
        ("summary", data.total_messages == 0 && data.total_sessions == 0),
        ("stats", data.stats.is_empty()),
        ("glance", data.glance.is_empty()),
        ("charts", data.charts.is_empty()),
        ("big_wins", data.big_wins.is_empty()),
        ("frictions", data.frictions.is_empty()),
        ("narrative", data.narrative.is_empty()),
        ("hour_counts", data.raw_hour_counts.is_empty()),
    ]
    .into_iter()
    .filter(|(_, empty)| *empty)
    .map(|(name, _)| name)
    .collect::<Vec<&str>>();

    if !empty_sections.is_empty() {
        warn!(
            sections = %empty_sections.join(","),
            "report sections matched nothing; layout may have drifted"
        );
    }
}
