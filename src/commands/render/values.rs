use crate::dayparts::localized_buckets;
use crate::derived::date_range;
use crate::model::{ReportData, chart_titles, glance_keys};
use crate::settings::RenderSettings;
use crate::text::{format_count, format_seconds};

use super::charts::{bar_rows, day_part_rows, donut, sidebar_stats};
use super::template::{BlockItem, Scope};

/// Bar-chart markers and the chart title each one draws.
const CHART_MARKERS: [(&str, &str); 10] = [
    ("CHART_TOOLS", chart_titles::TOP_TOOLS),
    ("CHART_LANGUAGES", chart_titles::LANGUAGES),
    ("CHART_SESSION_TYPES", chart_titles::SESSION_TYPES),
    ("CHART_WHAT_WANTED", chart_titles::WHAT_WANTED),
    ("CHART_WHAT_HELPED", chart_titles::WHAT_HELPED),
    ("CHART_OUTCOMES", chart_titles::OUTCOMES),
    ("CHART_FRICTION_TYPES", chart_titles::FRICTION_TYPES),
    ("CHART_SATISFACTION", chart_titles::SATISFACTION),
    ("CHART_TOOL_ERRORS", chart_titles::TOOL_ERRORS),
    ("CHART_RESPONSE_TIME", chart_titles::RESPONSE_TIME),
];

const FRICTION_EXAMPLE_SEPARATOR: &str = "\n            ";

pub fn build_scope(data: &ReportData, settings: &RenderSettings) -> Scope {
    let locale = settings.locale;
    let count = |value: u64| format_count(value, locale);
    let mut scope = Scope::default();

    scope.set("LANG", locale.as_str());
    scope.set("TOTAL_MESSAGES", count(data.total_messages));
    scope.set("TOTAL_SESSIONS", count(data.total_sessions));
    scope.set("DATE_FROM", data.date_from.as_str());
    scope.set("DATE_TO", data.date_to.as_str());
    scope.set("DATE_RANGE", localized_range(data, settings));
    scope.set(
        "TOTAL_DAYS",
        data.total_days.filter(|days| *days > 0).unwrap_or(data.days).to_string(),
    );
    scope.set("LINES_ADDED", count(data.lines_added));
    scope.set("LINES_REMOVED", count(data.lines_removed));
    scope.set("FILES_CHANGED", count(data.files_changed));
    scope.set("SESSIONS_PER_DAY", data.sessions_per_day.clone().unwrap_or_default());
    scope.set("MESSAGES_PER_DAY", data.messages_per_day.clone().unwrap_or_default());
    scope.set("MEDIAN_RESPONSE", format_seconds(data.median_response_time));
    scope.set("AVG_RESPONSE", format_seconds(data.avg_response_time));
    scope.set("MULTI_OVERLAP", count(data.multi_clauding.overlap_events));
    scope.set("MULTI_SESSIONS", count(data.multi_clauding.sessions_involved));
    scope.set("MULTI_PCT", data.multi_clauding.pct_messages.to_string());

    scope.set("NARRATIVE", data.narrative.as_str());
    scope.set("KEY_INSIGHT", data.key_insight.as_str());
    scope.set("WINS_INTRO", data.wins_intro.as_str());
    scope.set("FRICTION_INTRO", data.friction_intro.as_str());
    scope.set("HORIZON_INTRO", data.horizon_intro.as_str());
    scope.set("FUN_HEADLINE", data.fun_ending.headline.as_str());
    scope.set("FUN_DETAIL", data.fun_ending.detail.as_str());

    scope.set("GLANCE_WORKING", data.glance_text(glance_keys::WORKING));
    scope.set("GLANCE_HINDERING", data.glance_text(glance_keys::HINDERING));
    scope.set("GLANCE_QUICKWINS", data.glance_text(glance_keys::QUICK_WINS));
    scope.set("GLANCE_AMBITIOUS", data.glance_text(glance_keys::AMBITIOUS));

    for (marker, title) in CHART_MARKERS {
        scope.set(marker, bar_rows(data.chart(title), locale));
    }
    let buckets = localized_buckets(&data.raw_hour_counts, settings);
    scope.set("CHART_TIME_OF_DAY", day_part_rows(&buckets, locale));

    let tools = data.chart(chart_titles::TOP_TOOLS);
    let languages = data.chart(chart_titles::LANGUAGES);
    scope.set("DONUT_TOOLS", donut(tools, locale));
    scope.set("DONUT_LANGUAGES", donut(languages, locale));
    scope.set("SIDEBAR_TOP_TOOLS", sidebar_stats(tools, locale));
    scope.set("SIDEBAR_LANGUAGES", sidebar_stats(languages, locale));
    scope.set("TOTAL_TOOL_CALLS", count(tools.iter().map(|bar| bar.value).sum()));

    set_blocks(&mut scope, data);
    scope
}

/// The snapshot's own range may have been joined for another locale, so it is
/// only used when the endpoints are missing.
fn localized_range(data: &ReportData, settings: &RenderSettings) -> String {
    if data.date_from.is_empty() || data.date_to.is_empty() {
        return data.date_range.clone().unwrap_or_default();
    }
    date_range(&data.date_from, &data.date_to, settings.locale)
}

fn set_blocks(scope: &mut Scope, data: &ReportData) {
    scope.set_block(
        "EACH_BIG_WIN",
        data.big_wins
            .iter()
            .map(|win| item([("WIN_TITLE", &win.title), ("WIN_DESC", &win.desc)]))
            .collect(),
    );

    scope.set_block(
        "EACH_FRICTION",
        data.frictions
            .iter()
            .map(|friction| {
                let examples = friction
                    .examples
                    .iter()
                    .map(|example| format!("<li>{example}</li>"))
                    .collect::<Vec<String>>()
                    .join(FRICTION_EXAMPLE_SEPARATOR);
                item([
                    ("FRICTION_TITLE", &friction.title),
                    ("FRICTION_DESC", &friction.desc),
                    ("FRICTION_EXAMPLES", &examples),
                ])
            })
            .collect(),
    );

    scope.set_block(
        "EACH_FEATURE",
        data.features
            .iter()
            .map(|feature| {
                item([
                    ("FEATURE_TITLE", &feature.title),
                    ("FEATURE_DESC", &feature.desc),
                    ("FEATURE_WHY", &feature.why),
                ])
            })
            .collect(),
    );

    scope.set_block(
        "EACH_HORIZON",
        data.horizons
            .iter()
            .map(|horizon| {
                item([
                    ("HORIZON_TITLE", &horizon.title),
                    ("HORIZON_DESC", &horizon.desc),
                    ("HORIZON_TIP", &horizon.tip),
                ])
            })
            .collect(),
    );

    scope.set_block(
        "EACH_PROJECT_AREA",
        data.project_areas
            .iter()
            .map(|area| {
                item([
                    ("AREA_NAME", &area.name),
                    ("AREA_COUNT", &area.count),
                    ("AREA_DESC", &area.desc),
                ])
            })
            .collect(),
    );
}

fn item<const N: usize>(fields: [(&'static str, &String); N]) -> BlockItem {
    fields
        .into_iter()
        .map(|(name, value)| (name, value.clone()))
        .collect()
}
