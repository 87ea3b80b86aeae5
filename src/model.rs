use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Everything recovered from one `report.html`, plus the derived rates.
///
/// Field names follow the JSON snapshot format shared by the dashboard
/// renderer and the video timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportData {
    pub total_messages: u64,
    pub total_sessions: u64,
    pub date_from: String,
    pub date_to: String,
    pub stats: BTreeMap<String, String>,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub files_changed: u64,
    pub days: u64,
    pub glance: BTreeMap<String, String>,
    pub charts: BTreeMap<String, Vec<ChartBar>>,
    pub big_wins: Vec<BigWin>,
    pub frictions: Vec<Friction>,
    pub features: Vec<Feature>,
    pub horizons: Vec<Horizon>,
    pub narrative: String,
    pub key_insight: String,
    pub raw_hour_counts: BTreeMap<u32, u64>,
    pub median_response_time: f64,
    pub avg_response_time: f64,
    pub multi_clauding: MultiClauding,
    pub fun_ending: FunEnding,
    pub project_areas: Vec<ProjectArea>,
    pub wins_intro: String,
    pub friction_intro: String,
    pub horizon_intro: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions_per_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages_per_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_days: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
}

impl ReportData {
    pub fn chart(&self, title: &str) -> &[ChartBar] {
        self.charts.get(title).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn glance_text(&self, key: &str) -> &str {
        self.glance.get(key).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartBar {
    pub label: String,
    pub width: f64,
    pub color: String,
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BigWin {
    pub title: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Friction {
    pub title: String,
    pub desc: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub title: String,
    pub desc: String,
    pub why: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Horizon {
    pub title: String,
    pub desc: String,
    pub tip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiClauding {
    pub overlap_events: u64,
    pub sessions_involved: u64,
    pub pct_messages: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunEnding {
    pub headline: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectArea {
    pub name: String,
    pub count: String,
    pub desc: String,
}

/// Well-known chart titles emitted by the report generator.
pub mod chart_titles {
    pub const TOP_TOOLS: &str = "Top Tools Used";
    pub const LANGUAGES: &str = "Languages";
    pub const SESSION_TYPES: &str = "Session Types";
    pub const WHAT_WANTED: &str = "What You Wanted";
    pub const WHAT_HELPED: &str = "What Helped Most (Claude's Capabilities)";
    pub const OUTCOMES: &str = "Outcomes";
    pub const FRICTION_TYPES: &str = "Primary Friction Types";
    pub const SATISFACTION: &str = "Inferred Satisfaction (model-estimated)";
    pub const TOOL_ERRORS: &str = "Tool Errors Encountered";
    pub const RESPONSE_TIME: &str = "User Response Time Distribution";
}

/// Keys of the "at a glance" sections after heading normalization.
pub mod glance_keys {
    pub const WORKING: &str = "what's working";
    pub const HINDERING: &str = "what's hindering you";
    pub const QUICK_WINS: &str = "quick wins to try";
    pub const AMBITIOUS: &str = "ambitious workflows";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_uses_camel_case_and_omits_underived_fields() {
        let data = ReportData {
            total_messages: 3,
            ..ReportData::default()
        };
        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value["totalMessages"], 3);
        assert!(value.get("multiClauding").is_some());
        assert!(value["multiClauding"].get("overlapEvents").is_some());
        assert!(value.get("sessionsPerDay").is_none());
        assert!(value.get("dateRange").is_none());
    }

    #[test]
    fn partial_snapshot_deserializes_with_defaults() {
        let raw = r#"
        {
          "totalMessages": 10,
          "rawHourCounts": {"0": 1, "13": 4},
          "charts": {"Languages": [{"label": "Rust", "value": 7}]}
        }
        "#;

        let data: ReportData = serde_json::from_str(raw).expect("partial snapshot should load");
        assert_eq!(data.total_messages, 10);
        assert_eq!(data.raw_hour_counts.get(&13), Some(&4));
        assert_eq!(data.chart("Languages")[0].value, 7);
        assert!(data.chart("Outcomes").is_empty());
        assert_eq!(data.glance_text(glance_keys::WORKING), "");
        assert!(data.sessions_per_day.is_none());
    }
}
