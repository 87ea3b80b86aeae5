use anyhow::{Result, bail};
use serde::Serialize;

use super::anim::{Ease, Interpolation, SpringConfig, interpolate, spring};
use super::timeline::{FPS, SceneKind, TOTAL_FRAMES, Transition, scene_at, transition};
use crate::model::{ReportData, chart_titles};
use crate::text::format_one_decimal;

const TOP_TOOLS: usize = 6;
const TOP_LANGUAGES: usize = 6;
const TOP_WINS: usize = 3;
const WIN_DESC_CHARS: usize = 140;
/// Slices narrower than this many degrees are not drawn yet.
const MIN_VISIBLE_SWEEP: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameState {
    pub frame: u32,
    pub local_frame: u32,
    pub transition: Transition,
    pub content: SceneContent,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "scene", rename_all = "camelCase")]
pub enum SceneContent {
    NoData {
        message: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    Title {
        date_from: String,
        date_to: String,
        zoom: f64,
    },
    Stats {
        counters: Vec<Counter>,
    },
    Tools {
        bars: Vec<ToolBar>,
    },
    Languages {
        rotation: f64,
        sweep: f64,
        slices: Vec<LanguageSlice>,
    },
    Wins {
        cards: Vec<WinCard>,
    },
    Insight {
        text: String,
        scale: f64,
        opacity: f64,
    },
    #[serde(rename_all = "camelCase")]
    Ending {
        headline: String,
        detail: String,
        text_opacity: f64,
        badge_opacity: f64,
        zoom: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Counter {
    pub label: &'static str,
    pub value: u64,
    pub shown: u64,
    pub pop: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolBar {
    pub label: String,
    pub value: u64,
    pub shown: u64,
    pub width_pct: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSlice {
    pub label: String,
    pub value: u64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub visible: bool,
    pub pct: String,
    pub legend_progress: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WinCard {
    pub title: String,
    pub desc: String,
    pub progress: f64,
}

/// Describes what the video shows at `frame`. A snapshot with no messages
/// gets the placeholder card on every frame.
pub fn evaluate_frame(data: &ReportData, frame: u32) -> Result<FrameState> {
    let Some((scene, local_frame)) = scene_at(frame) else {
        bail!("frame {frame} is outside the {TOTAL_FRAMES}-frame timeline");
    };

    let content = if data.total_messages == 0 {
        SceneContent::NoData {
            message: "No data provided. Pass an insights JSON snapshot.",
        }
    } else {
        scene_content(data, scene.kind, f64::from(local_frame))
    };

    Ok(FrameState {
        frame,
        local_frame,
        transition: transition(local_frame, scene.duration),
        content,
    })
}

fn scene_content(data: &ReportData, kind: SceneKind, frame: f64) -> SceneContent {
    match kind {
        SceneKind::Title => SceneContent::Title {
            date_from: data.date_from.clone(),
            date_to: data.date_to.clone(),
            zoom: eased_out(frame, 120.0, [1.1, 1.0]),
        },
        SceneKind::Stats => SceneContent::Stats {
            counters: counters(data, frame),
        },
        SceneKind::Tools => SceneContent::Tools {
            bars: tool_bars(data, frame),
        },
        SceneKind::Languages => languages(data, frame),
        SceneKind::Wins => SceneContent::Wins {
            cards: win_cards(data, frame),
        },
        SceneKind::Insight => SceneContent::Insight {
            text: data.key_insight.clone(),
            scale: eased_out(frame, 90.0, [0.95, 1.0]),
            opacity: settle(frame - 5.0, SpringConfig::damping(20.0)),
        },
        SceneKind::Ending => SceneContent::Ending {
            headline: data.fun_ending.headline.clone(),
            detail: data.fun_ending.detail.clone(),
            text_opacity: settle(frame - 5.0, SpringConfig::damping(15.0)),
            badge_opacity: settle(frame - 35.0, SpringConfig::default()),
            zoom: eased_out(frame, 90.0, [1.0, 1.05]),
        },
    }
}

fn settle(frame: f64, config: SpringConfig) -> f64 {
    spring(frame, f64::from(FPS), config)
}

fn eased_out(frame: f64, length: f64, range: [f64; 2]) -> f64 {
    interpolate(
        frame,
        [0.0, length],
        range,
        Interpolation::default().clamp_right().eased(Ease::OutCubic),
    )
}

fn counters(data: &ReportData, frame: f64) -> Vec<Counter> {
    let items = [
        ("Messages", data.total_messages),
        ("Sessions", data.total_sessions),
        ("Files", data.files_changed),
        ("Days", data.days),
    ];

    items
        .into_iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let delay = index as f64 * 6.0;
            let progress = settle(frame - delay - 15.0, SpringConfig::damping(30.0).with_mass(0.8));
            Counter {
                label,
                value,
                shown: scaled(value, progress.min(1.0)),
                pop: settle(
                    frame - delay - 5.0,
                    SpringConfig::damping(10.0).with_mass(0.5).with_stiffness(200.0),
                ),
            }
        })
        .collect()
}

/// Bars are scaled against the first tool, which the report lists as the
/// most used.
fn tool_bars(data: &ReportData, frame: f64) -> Vec<ToolBar> {
    let tools = data.chart(chart_titles::TOP_TOOLS);
    let tools = &tools[..tools.len().min(TOP_TOOLS)];
    let leader = tools.first().map(|tool| tool.value).unwrap_or(1).max(1) as f64;

    tools
        .iter()
        .enumerate()
        .map(|(index, tool)| {
            let progress = settle(
                frame - 8.0 - index as f64 * 5.0,
                SpringConfig::damping(18.0).with_stiffness(120.0),
            );
            ToolBar {
                label: tool.label.clone(),
                value: tool.value,
                shown: scaled(tool.value, progress),
                width_pct: tool.value as f64 / leader * 100.0 * progress,
            }
        })
        .collect()
}

fn languages(data: &ReportData, frame: f64) -> SceneContent {
    let langs = data.chart(chart_titles::LANGUAGES);
    let langs = &langs[..langs.len().min(TOP_LANGUAGES)];
    let total = langs.iter().map(|lang| lang.value).sum::<u64>();
    let sweep = settle(frame - 5.0, SpringConfig::damping(20.0).with_mass(1.5));

    let mut slices = Vec::with_capacity(langs.len());
    if total > 0 {
        let mut start_angle = -90.0;
        for (index, lang) in langs.iter().enumerate() {
            let angle = lang.value as f64 / total as f64 * 360.0;
            let sweep_angle = angle * sweep;
            slices.push(LanguageSlice {
                label: lang.label.clone(),
                value: lang.value,
                start_angle,
                sweep_angle,
                visible: sweep_angle >= MIN_VISIBLE_SWEEP,
                pct: format_one_decimal(lang.value as f64 / total as f64 * 100.0),
                legend_progress: settle(
                    frame - 15.0 - index as f64 * 5.0,
                    SpringConfig::damping(15.0),
                ),
            });
            start_angle += angle;
        }
    }

    SceneContent::Languages {
        rotation: eased_out(frame, 150.0, [-10.0, 0.0]),
        sweep,
        slices,
    }
}

fn win_cards(data: &ReportData, frame: f64) -> Vec<WinCard> {
    data.big_wins
        .iter()
        .take(TOP_WINS)
        .enumerate()
        .map(|(index, win)| WinCard {
            title: win.title.clone(),
            desc: format!("{}...", win.desc.chars().take(WIN_DESC_CHARS).collect::<String>()),
            progress: settle(
                frame - 10.0 - index as f64 * 12.0,
                SpringConfig::damping(14.0).with_stiffness(120.0),
            ),
        })
        .collect()
}

fn scaled(value: u64, progress: f64) -> u64 {
    (value as f64 * progress).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BigWin, ChartBar};

    fn bar(label: &str, value: u64) -> ChartBar {
        ChartBar {
            label: label.to_string(),
            value,
            ..ChartBar::default()
        }
    }

    fn sample() -> ReportData {
        let mut data = ReportData {
            total_messages: 1234,
            total_sessions: 56,
            files_changed: 42,
            days: 31,
            date_from: "2024-01-01".to_string(),
            date_to: "2024-01-31".to_string(),
            key_insight: "Small loops win.".to_string(),
            big_wins: (0..5)
                .map(|i| BigWin {
                    title: format!("Win {i}"),
                    desc: "x".repeat(200),
                })
                .collect(),
            ..ReportData::default()
        };
        data.charts.insert(
            chart_titles::TOP_TOOLS.to_string(),
            (1..=8).rev().map(|i| bar(&format!("T{i}"), i * 100)).collect(),
        );
        data.charts.insert(
            chart_titles::LANGUAGES.to_string(),
            vec![bar("Rust", 75), bar("TypeScript", 25)],
        );
        data
    }

    #[test]
    fn empty_snapshot_shows_placeholder() {
        let state = evaluate_frame(&ReportData::default(), 300).unwrap();
        assert!(matches!(state.content, SceneContent::NoData { .. }));
    }

    #[test]
    fn frames_past_the_end_are_rejected() {
        let err = evaluate_frame(&sample(), TOTAL_FRAMES).unwrap_err();
        assert!(err.to_string().contains("900"));
    }

    #[test]
    fn counters_start_at_zero_and_reach_totals() {
        let data = sample();

        let SceneContent::Stats { counters } = evaluate_frame(&data, 120).unwrap().content else {
            panic!("expected stats scene");
        };
        assert!(counters.iter().all(|counter| counter.shown == 0));

        let SceneContent::Stats { counters } = evaluate_frame(&data, 269).unwrap().content else {
            panic!("expected stats scene");
        };
        let shown = counters.iter().map(|counter| counter.shown).collect::<Vec<u64>>();
        assert_eq!(shown, vec![1234, 56, 42, 31]);
    }

    #[test]
    fn tool_bars_take_top_six_scaled_to_leader() {
        let SceneContent::Tools { bars } = evaluate_frame(&sample(), 449).unwrap().content else {
            panic!("expected tools scene");
        };

        assert_eq!(bars.len(), 6);
        assert_eq!(bars[0].label, "T8");
        assert!((bars[0].width_pct - 100.0).abs() < 0.5);
        assert!((bars[4].width_pct - 50.0).abs() < 0.5);
    }

    #[test]
    fn language_slices_cover_the_circle() {
        let SceneContent::Languages { slices, sweep, .. } =
            evaluate_frame(&sample(), 599).unwrap().content
        else {
            panic!("expected languages scene");
        };

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].start_angle, -90.0);
        assert_eq!(slices[1].start_angle, 180.0);
        assert_eq!(slices[0].pct, "75.0");
        assert!((sweep - 1.0).abs() < 0.01);
        assert!(slices.iter().all(|slice| slice.visible));
    }

    #[test]
    fn wins_show_three_truncated_cards() {
        let SceneContent::Wins { cards } = evaluate_frame(&sample(), 650).unwrap().content else {
            panic!("expected wins scene");
        };

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].desc.chars().count(), WIN_DESC_CHARS + 3);
        assert!(cards[0].desc.ends_with("..."));
    }

    #[test]
    fn frame_state_serializes_with_scene_tag() {
        let state = evaluate_frame(&sample(), 10).unwrap();
        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(value["content"]["scene"], "title");
        assert_eq!(value["content"]["dateFrom"], "2024-01-01");
        assert_eq!(value["localFrame"], 10);
    }
}
