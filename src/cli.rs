use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::locale::Locale;

#[derive(Parser, Debug)]
#[command(
    name = "insights-ui",
    version,
    about = "Turn an insights report.html into JSON, a localized dashboard, or video frames"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse report.html into the JSON snapshot.
    Extract(ExtractArgs),
    /// Render a JSON snapshot into the localized dashboard.
    Render(RenderArgs),
    /// Extract and render in one step.
    Build(BuildArgs),
    /// Evaluate video timeline frames for a JSON snapshot.
    Frames(FramesArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Directory holding report.html (defaults to ~/.claude/usage-data).
    #[arg(long)]
    pub usage_dir: Option<PathBuf>,

    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Write JSON here instead of standard output.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Locale used for the derived date range.
    #[arg(long, value_enum, default_value_t = Locale::En)]
    pub lang: Locale,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(long)]
    pub usage_dir: Option<PathBuf>,

    /// JSON snapshot to render; standard input when omitted.
    #[arg(long)]
    pub data: Option<PathBuf>,

    #[arg(long, default_value = "templates")]
    pub templates_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Locale::En)]
    pub lang: Locale,

    /// Hours added to histogram keys before day-part bucketing.
    #[arg(long, allow_negative_numbers = true)]
    pub hour_offset: Option<i32>,

    /// Output path (defaults to <usage-dir>/report-<lang>.html).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[arg(long)]
    pub usage_dir: Option<PathBuf>,

    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long, default_value = "templates")]
    pub templates_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Locale::En)]
    pub lang: Locale,

    #[arg(long, allow_negative_numbers = true)]
    pub hour_offset: Option<i32>,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FramesArgs {
    /// JSON snapshot; standard input when omitted.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Frame to evaluate; repeatable. Defaults to the midpoint of every scene.
    #[arg(long = "frame")]
    pub frames: Vec<u32>,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_accepts_negative_offset_and_locale() {
        let cli = Cli::try_parse_from([
            "insights-ui",
            "render",
            "--lang",
            "ko",
            "--hour-offset",
            "-8",
        ])
        .expect("render args should parse");

        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.lang, Locale::Ko);
        assert_eq!(args.hour_offset, Some(-8));
        assert!(args.data.is_none());
    }

    #[test]
    fn unsupported_locale_is_rejected() {
        let result = Cli::try_parse_from(["insights-ui", "render", "--lang", "fr"]);
        assert!(result.is_err());
    }

    #[test]
    fn frames_collects_repeated_flags() {
        let cli = Cli::try_parse_from(["insights-ui", "frames", "--frame", "0", "--frame", "130"])
            .expect("frames args should parse");
        let Commands::Frames(args) = cli.command else {
            panic!("expected frames command");
        };
        assert_eq!(args.frames, vec![0, 130]);
    }
}
