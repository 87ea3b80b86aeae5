use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use super::template::Template;
use super::values::build_scope;
use crate::cli::RenderArgs;
use crate::derived::apply_derived;
use crate::locale::Locale;
use crate::model::ReportData;
use crate::settings::RenderSettings;
use crate::util::{parse_json, read_required, read_stdin, resolve_usage_dir, write_text};

const MISSING_TEMPLATE_HINT: &str = "Template not found; pass --templates-dir pointing at the report templates.";
const MISSING_DATA_HINT: &str = "Run `insights-ui extract --out <path>` first.";

pub fn run(args: RenderArgs) -> Result<()> {
    let settings = RenderSettings::new(args.lang, args.hour_offset);

    let mut data = match args.data.as_deref() {
        Some(path) => {
            let raw = read_required(path, MISSING_DATA_HINT)?;
            parse_json::<ReportData>(&raw, &path.display().to_string())?
        }
        None => parse_json::<ReportData>(&read_stdin()?, "standard input")?,
    };
    apply_derived(&mut data, settings.locale);

    let out_path = match args.out {
        Some(path) => path,
        None => default_output_path(&resolve_usage_dir(args.usage_dir.as_deref())?, settings.locale),
    };

    write_report(&data, &args.templates_dir, &settings, &out_path)
}

/// Renders `data` through the locale's template and writes the page.
pub fn write_report(
    data: &ReportData,
    templates_dir: &Path,
    settings: &RenderSettings,
    out_path: &Path,
) -> Result<()> {
    let template_path = template_path(templates_dir, settings.locale);
    let source = read_required(&template_path, MISSING_TEMPLATE_HINT)?;
    debug!(path = %template_path.display(), "loaded template");

    let html = render_report(&source, data, settings)?;
    write_text(out_path, &html)?;

    info!(
        path = %out_path.display(),
        lang = settings.locale.as_str(),
        hour_offset = settings.hour_offset,
        "rendered dashboard"
    );
    Ok(())
}

pub fn render_report(source: &str, data: &ReportData, settings: &RenderSettings) -> Result<String> {
    let template = Template::parse(source)?;
    Ok(template.render(&build_scope(data, settings)))
}

pub fn template_path(templates_dir: &Path, locale: Locale) -> PathBuf {
    templates_dir.join(format!("report-{}-template.html", locale.as_str()))
}

pub fn default_output_path(usage_dir: &Path, locale: Locale) -> PathBuf {
    usage_dir.join(format!("report-{}.html", locale.as_str()))
}
