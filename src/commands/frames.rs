use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::FramesArgs;
use crate::model::ReportData;
use crate::util::{parse_json, read_required, read_stdin, write_json_pretty, write_json_stdout};
use crate::video::{FPS, FrameState, HEIGHT, SCENES, TOTAL_FRAMES, WIDTH, evaluate_frame};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FramesReport {
    fps: u32,
    width: u32,
    height: u32,
    total_frames: u32,
    frames: Vec<FrameState>,
}

pub fn run(args: FramesArgs) -> Result<()> {
    let data: ReportData = match args.data.as_deref() {
        Some(path) => parse_json(
            &read_required(path, "Run `insights-ui extract --out <path>` first.")?,
            &path.display().to_string(),
        )?,
        None => parse_json(&read_stdin()?, "standard input")?,
    };

    let requested: Vec<u32> = if args.frames.is_empty() {
        SCENES.iter().map(|scene| scene.midpoint()).collect()
    } else {
        args.frames
    };

    let frames = requested
        .into_iter()
        .map(|frame| evaluate_frame(&data, frame))
        .collect::<Result<Vec<FrameState>>>()?;

    let report = FramesReport {
        fps: FPS,
        width: WIDTH,
        height: HEIGHT,
        total_frames: TOTAL_FRAMES,
        frames,
    };

    match args.out {
        Some(out_path) => {
            write_json_pretty(&out_path, &report)?;
            info!(path = %out_path.display(), frames = report.frames.len(), "wrote frame states");
        }
        None => write_json_stdout(&report)?,
    }

    Ok(())
}
