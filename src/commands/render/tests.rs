use std::fs;
use std::path::{Path, PathBuf};

use super::run::{render_report, template_path, write_report};
use crate::commands::extract::extract_report;
use crate::locale::Locale;
use crate::model::{BigWin, ReportData};
use crate::settings::RenderSettings;
use crate::util::parse_json;

const EN_TEMPLATE: &str = include_str!("../../../templates/report-en-template.html");
const KO_TEMPLATE: &str = include_str!("../../../templates/report-ko-template.html");

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("report.html")
}

fn fixture_data() -> ReportData {
    extract_report(&fixture_path(), Locale::En).expect("fixture should extract")
}

fn render(source: &str, data: &ReportData, settings: RenderSettings) -> String {
    render_report(source, data, &settings).expect("template should render")
}

#[test]
fn extracted_snapshot_survives_json_and_renders_scalars() {
    let data = fixture_data();
    let raw = serde_json::to_string_pretty(&data).unwrap();
    let reloaded: ReportData = parse_json(&raw, "round trip").unwrap();
    assert_eq!(reloaded, data);

    let html = render(
        "{{TOTAL_MESSAGES}}|{{TOTAL_SESSIONS}}|{{SESSIONS_PER_DAY}}|{{MESSAGES_PER_DAY}}|{{TOTAL_DAYS}}|{{DATE_RANGE}}|{{LINES_ADDED}}|{{MEDIAN_RESPONSE}}|{{AVG_RESPONSE}}|{{MULTI_PCT}}|{{TOTAL_TOOL_CALLS}}",
        &reloaded,
        RenderSettings::from(Locale::En),
    );

    assert_eq!(
        html,
        "1,234|56|1.8|39.8|31|2024-01-01 to 2024-01-31|500|12.5|30|15|1,800"
    );
}

#[test]
fn shipped_templates_resolve_every_marker() {
    let data = fixture_data();

    for (source, locale) in [(EN_TEMPLATE, Locale::En), (KO_TEMPLATE, Locale::Ko)] {
        let html = render(source, &data, RenderSettings::from(locale));
        assert!(!html.contains("{{"), "unresolved marker in {} template", locale.as_str());
        assert!(html.contains("Shipped the parser"));
        assert!(html.contains("<li>Rewrote it with regexes</li>"));
    }
}

#[test]
fn korean_render_localizes_range_labels_and_day_parts() {
    let data = fixture_data();
    let html = render(
        "{{DATE_RANGE}}\n{{CHART_TIME_OF_DAY}}\n{{CHART_SESSION_TYPES}}",
        &data,
        RenderSettings::from(Locale::Ko),
    );

    assert!(html.starts_with("2024-01-01 ~ 2024-01-31"));
    assert!(html.contains(">디버깅<"));
    // Hours 0, 6, 12, 18 shift by 17 to 17, 23, 5, 11.
    assert!(html.contains("<div class=\"bar-label\">오전 (6-12)</div>\n        <div class=\"bar-track\"><div class=\"bar-fill\" style=\"width:100.0%"));
    assert!(html.contains("<div class=\"bar-label\">오후 (12-18)</div>\n        <div class=\"bar-track\"><div class=\"bar-fill\" style=\"width:25.0%"));
    assert!(html.contains("<div class=\"bar-label\">저녁 (18-24)</div>\n        <div class=\"bar-track\"><div class=\"bar-fill\" style=\"width:50.0%"));
}

#[test]
fn explicit_offset_overrides_locale_default() {
    let data = fixture_data();
    let html = render(
        "{{CHART_TIME_OF_DAY}}",
        &data,
        RenderSettings::new(Locale::Ko, Some(0)),
    );

    // Unshifted: Night 1, Morning 2, Afternoon 3, Evening 4.
    assert!(html.contains("<div class=\"bar-label\">저녁 (18-24)</div>\n        <div class=\"bar-track\"><div class=\"bar-fill\" style=\"width:100.0%"));
    assert!(html.contains("<div class=\"bar-value\">1</div>"));
}

#[test]
fn missing_charts_render_placeholder_and_empty_blocks_collapse() {
    let data = ReportData::default();
    let html = render(
        "<ul>{{#EACH_BIG_WIN}}<li>{{WIN_TITLE}}</li>{{/EACH_BIG_WIN}}</ul>{{CHART_OUTCOMES}}{{DONUT_TOOLS}}",
        &data,
        RenderSettings::from(Locale::Ko),
    );

    assert_eq!(
        html,
        r#"<ul></ul><div style="color:var(--text-dim);font-size:12px;">데이터 없음</div>"#
    );
}

#[test]
fn block_items_render_in_order() {
    let data = ReportData {
        big_wins: vec![
            BigWin {
                title: "First".to_string(),
                desc: "a".to_string(),
            },
            BigWin {
                title: "Second".to_string(),
                desc: "b".to_string(),
            },
        ],
        ..ReportData::default()
    };
    let html = render(
        "{{#EACH_BIG_WIN}}<b>{{WIN_TITLE}}</b>{{WIN_DESC}}{{/EACH_BIG_WIN}}",
        &data,
        RenderSettings::from(Locale::En),
    );

    assert_eq!(html, "<b>First</b>a\n<b>Second</b>b");
}

#[test]
fn values_containing_markers_are_not_expanded() {
    let data = ReportData {
        narrative: "literally {{TOTAL_MESSAGES}}".to_string(),
        total_messages: 9,
        ..ReportData::default()
    };
    let html = render("{{NARRATIVE}} {{UNKNOWN}}", &data, RenderSettings::from(Locale::En));
    assert_eq!(html, "literally {{TOTAL_MESSAGES}} {{UNKNOWN}}");
}

#[test]
fn write_report_requires_template() {
    let out_dir = PathBuf::from("target").join("render_tests");
    let err = write_report(
        &ReportData::default(),
        &out_dir.join("no-templates"),
        &RenderSettings::from(Locale::En),
        &out_dir.join("report-en.html"),
    )
    .unwrap_err();

    assert!(err.to_string().contains("report-en-template.html"));
    assert!(err.to_string().contains("Template not found"));
}

#[test]
fn write_report_renders_shipped_template_to_disk() {
    let out_path = PathBuf::from("target").join("render_tests").join("report-ko.html");
    let templates_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
    assert!(template_path(&templates_dir, Locale::Ko).is_file());

    write_report(
        &fixture_data(),
        &templates_dir,
        &RenderSettings::from(Locale::Ko),
        &out_path,
    )
    .expect("render should succeed");

    let html = fs::read_to_string(&out_path).unwrap();
    assert!(html.contains("lang=\"ko\""));
    assert!(html.contains("1,234"));
}
