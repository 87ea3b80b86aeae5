use std::collections::BTreeMap;

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use tracing::warn;

use super::parser::ReportParser;
use crate::model::{
    BigWin, ChartBar, Feature, Friction, FunEnding, Horizon, MultiClauding, ProjectArea,
};
use crate::text::{parse_count, parse_decimal, unescape_html};

#[derive(Debug, Default, PartialEq)]
pub(super) struct Summary {
    pub(super) total_messages: u64,
    pub(super) total_sessions: u64,
    pub(super) date_from: String,
    pub(super) date_to: String,
}

#[derive(Debug, Default, PartialEq)]
pub(super) struct LinesChanged {
    pub(super) added: u64,
    pub(super) removed: u64,
}

#[derive(Debug, Default, PartialEq)]
pub(super) struct ResponseTimes {
    pub(super) median: f64,
    pub(super) average: f64,
}

impl ReportParser {
    pub(super) fn summary(&self, html: &str) -> Summary {
        let Some(line) = self.subtitle.captures(html).and_then(|c| c.get(1)) else {
            return Summary::default();
        };
        let line = line.as_str();

        let (date_from, date_to) = self
            .date_span
            .captures(line)
            .map(|c| (group(&c, 1), group(&c, 2)))
            .unwrap_or_default();

        Summary {
            total_messages: first_count(&self.message_count, line),
            total_sessions: first_count(&self.session_count, line),
            date_from,
            date_to,
        }
    }

    /// Stat tiles keyed by lowercase label; a repeated label keeps the last value.
    pub(super) fn stats(&self, html: &str) -> BTreeMap<String, String> {
        self.stat_pair
            .captures_iter(html)
            .map(|c| (group(&c, 2).to_lowercase(), group(&c, 1)))
            .collect()
    }

    pub(super) fn lines_changed(&self, stats: &BTreeMap<String, String>) -> LinesChanged {
        let raw = stats.get("lines").map(String::as_str).unwrap_or("+0/-0");
        self.line_delta
            .captures(raw)
            .map(|c| LinesChanged {
                added: parse_count(&group(&c, 1)),
                removed: parse_count(&group(&c, 2)),
            })
            .unwrap_or_default()
    }

    pub(super) fn glance(&self, html: &str) -> BTreeMap<String, String> {
        let mut glance = BTreeMap::new();

        for section in self.glance_section.find_iter(html) {
            let section = section.as_str();
            let Some(heading) = self.glance_heading.captures(section).and_then(|c| c.get(1))
            else {
                continue;
            };

            let heading = heading.as_str();
            let key = heading
                .strip_suffix(':')
                .unwrap_or(heading)
                .trim()
                .to_lowercase();
            let text = self
                .glance_text
                .captures(section)
                .and_then(|c| c.get(1))
                .map(|m| self.strip_tags(m.as_str()).trim().to_string())
                .unwrap_or_default();

            glance.insert(key, text);
        }

        glance
    }

    /// Bar charts keyed by title. Charts without a single recognizable bar are
    /// left out so renderers show their "no data" placeholder.
    pub(super) fn charts(&self, html: &str) -> BTreeMap<String, Vec<ChartBar>> {
        let mut charts = BTreeMap::new();

        for segment in self.chart_title.split(html).skip(1) {
            let (title, rest) = match segment.find("</div>") {
                Some(end) => (segment[..end].trim(), &segment[end..]),
                None => ("", segment),
            };

            let bars = self
                .chart_bar
                .captures_iter(rest)
                .map(|c| ChartBar {
                    label: group(&c, 1),
                    width: parse_decimal(&group(&c, 2)),
                    color: group(&c, 3),
                    value: parse_count(&group(&c, 4)),
                })
                .collect::<Vec<ChartBar>>();

            if !bars.is_empty() {
                charts.insert(title.to_string(), bars);
            }
        }

        charts
    }

    pub(super) fn big_wins(&self, html: &str) -> Vec<BigWin> {
        self.big_win
            .captures_iter(html)
            .map(|c| BigWin {
                title: group(&c, 1),
                desc: group(&c, 2),
            })
            .collect()
    }

    pub(super) fn frictions(&self, html: &str) -> Vec<Friction> {
        self.friction
            .captures_iter(html)
            .map(|c| Friction {
                title: group(&c, 1),
                desc: group(&c, 2),
                examples: c
                    .get(3)
                    .map(|list| {
                        self.list_item
                            .captures_iter(list.as_str())
                            .map(|item| group(&item, 1))
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect()
    }

    pub(super) fn features(&self, html: &str) -> Vec<Feature> {
        self.feature
            .captures_iter(html)
            .map(|c| Feature {
                title: group(&c, 1),
                desc: group(&c, 2),
                why: group(&c, 3),
            })
            .collect()
    }

    pub(super) fn horizons(&self, html: &str) -> Vec<Horizon> {
        self.horizon
            .captures_iter(html)
            .map(|c| Horizon {
                title: group(&c, 1),
                desc: group(&c, 2),
                tip: group(&c, 3),
            })
            .collect()
    }

    pub(super) fn narrative_text(&self, html: &str) -> String {
        let Some(block) = self.narrative.captures(html).and_then(|c| c.get(1)) else {
            return String::new();
        };

        self.paragraph
            .captures_iter(block.as_str())
            .map(|c| self.strip_tags(&group(&c, 1)).trim().to_string())
            .collect::<Vec<String>>()
            .join("\n\n")
    }

    pub(super) fn block_text(&self, pattern: &Regex, html: &str) -> String {
        pattern
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| self.strip_tags(m.as_str()).trim().to_string())
            .unwrap_or_default()
    }

    pub(super) fn first_capture(&self, pattern: &Regex, html: &str) -> String {
        pattern
            .captures(html)
            .map(|c| group(&c, 1))
            .unwrap_or_default()
    }

    /// The inline `rawHourCounts = {...}` literal. Absent means empty; present
    /// but not parsable as JSON is an error.
    ///
    /// Keys read their leading digit run as the hour and counts round to whole
    /// messages. Entries with a non-numeric key or a negative or non-numeric
    /// count are dropped.
    pub(super) fn hour_counts(&self, html: &str) -> Result<BTreeMap<u32, u64>> {
        let Some(literal) = self.hour_literal.captures(html).and_then(|c| c.get(1)) else {
            return Ok(BTreeMap::new());
        };

        let entries: Map<String, Value> = serde_json::from_str(literal.as_str())
            .with_context(|| {
                format!(
                    "embedded rawHourCounts literal is not valid JSON: {}",
                    literal.as_str()
                )
            })?;

        let mut hours = BTreeMap::new();
        for (key, value) in &entries {
            match (leading_hour(key), whole_count(value)) {
                (Some(hour), Some(count)) => *hours.entry(hour).or_insert(0) += count,
                _ => warn!(key = %key, value = %value, "skipping unusable hour count"),
            }
        }
        Ok(hours)
    }

    pub(super) fn response_times(&self, html: &str) -> ResponseTimes {
        ResponseTimes {
            median: first_decimal(&self.median_response, html),
            average: first_decimal(&self.average_response, html),
        }
    }

    /// Overlap badges share one style and are told apart by their caption.
    /// The first badge per caption keyword wins.
    pub(super) fn multi_clauding(&self, html: &str) -> MultiClauding {
        let mut overlap_events = None;
        let mut sessions_involved = None;
        let mut pct_messages = None;

        for c in self.overlap_badge.captures_iter(html) {
            let caption = group(&c, 2);
            let value = parse_count(&group(&c, 1).replace('%', ""));

            let slot = if caption.contains("Overlap") {
                &mut overlap_events
            } else if caption.contains("Sessions") {
                &mut sessions_involved
            } else if caption.contains("Messages") {
                &mut pct_messages
            } else {
                continue;
            };
            slot.get_or_insert(value);
        }

        MultiClauding {
            overlap_events: overlap_events.unwrap_or(0),
            sessions_involved: sessions_involved.unwrap_or(0),
            pct_messages: pct_messages.unwrap_or(0),
        }
    }

    pub(super) fn fun_ending(&self, html: &str) -> FunEnding {
        FunEnding {
            headline: self.block_text(&self.fun_headline, html),
            detail: self.block_text(&self.fun_detail, html),
        }
    }

    pub(super) fn project_areas(&self, html: &str) -> Vec<ProjectArea> {
        self.project_area
            .captures_iter(html)
            .map(|c| ProjectArea {
                name: unescape_html(&group(&c, 1)),
                count: group(&c, 2),
                desc: group(&c, 3),
            })
            .collect()
    }

    pub(super) fn strip_tags(&self, raw: &str) -> String {
        self.tag.replace_all(raw, "").into_owned()
    }
}

fn group(captures: &Captures<'_>, index: usize) -> String {
    captures
        .get(index)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn first_count(pattern: &Regex, text: &str) -> u64 {
    pattern
        .captures(text)
        .map(|c| parse_count(&group(&c, 1)))
        .unwrap_or(0)
}

fn first_decimal(pattern: &Regex, text: &str) -> f64 {
    pattern
        .captures(text)
        .map(|c| parse_decimal(&group(&c, 1)))
        .unwrap_or(0.0)
}

fn leading_hour(key: &str) -> Option<u32> {
    let trimmed = key.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(index, _)| index)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<u32>().ok()
}

fn whole_count(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    let count = value.as_f64()?;
    (count.is_finite() && count >= 0.0).then(|| count.round() as u64)
}
