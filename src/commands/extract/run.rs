use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use super::parser::ReportParser;
use crate::cli::ExtractArgs;
use crate::derived::apply_derived;
use crate::locale::Locale;
use crate::model::ReportData;
use crate::util::{read_required, resolve_usage_dir, write_json_pretty, write_json_stdout};

const MISSING_REPORT_HINT: &str = "Run /insights first.";

pub fn run(args: ExtractArgs) -> Result<()> {
    let usage_dir = resolve_usage_dir(args.usage_dir.as_deref())?;
    let input_path = report_path(&usage_dir, args.input);

    let data = extract_report(&input_path, args.lang)?;

    match args.out {
        Some(out_path) => {
            write_json_pretty(&out_path, &data)?;
            info!(path = %out_path.display(), "extracted report snapshot");
        }
        None => write_json_stdout(&data)?,
    }

    Ok(())
}

/// Reads `report.html`, extracts it and fills the derived fields.
pub fn extract_report(input_path: &Path, locale: Locale) -> Result<ReportData> {
    let html = read_required(input_path, MISSING_REPORT_HINT)?;
    info!(path = %input_path.display(), bytes = html.len(), "parsing report");

    let parser = ReportParser::new()?;
    let mut data = parser.parse(&html)?;
    apply_derived(&mut data, locale);

    info!(
        messages = data.total_messages,
        sessions = data.total_sessions,
        charts = data.charts.len(),
        "report extracted"
    );
    Ok(data)
}

pub(crate) fn report_path(usage_dir: &Path, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| usage_dir.join("report.html"))
}
