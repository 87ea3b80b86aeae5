use anyhow::Result;

use crate::cli::BuildArgs;
use crate::commands::extract::{extract_report, report_path};
use crate::commands::render::{default_output_path, write_report};
use crate::settings::RenderSettings;
use crate::util::resolve_usage_dir;

/// Extract and render without writing the intermediate snapshot.
pub fn run(args: BuildArgs) -> Result<()> {
    let settings = RenderSettings::new(args.lang, args.hour_offset);
    let usage_dir = resolve_usage_dir(args.usage_dir.as_deref())?;

    let data = extract_report(&report_path(&usage_dir, args.input), settings.locale)?;
    let out_path = args
        .out
        .unwrap_or_else(|| default_output_path(&usage_dir, settings.locale));

    write_report(&data, &args.templates_dir, &settings, &out_path)
}
