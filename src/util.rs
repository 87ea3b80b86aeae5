use std::env;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

/// `--usage-dir` when given, otherwise `$HOME/.claude/usage-data`.
pub fn resolve_usage_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let home = env::var_os("HOME").context("HOME is not set; pass --usage-dir explicitly")?;
    Ok(PathBuf::from(home).join(".claude").join("usage-data"))
}

/// Reads a file the user is expected to have produced, with `hint` telling
/// them how when it is missing.
pub fn read_required(path: &Path, hint: &str) -> Result<String> {
    if !path.is_file() {
        bail!("{} not found. {hint}", path.display());
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn read_stdin() -> Result<String> {
    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read standard input")?;
    Ok(raw)
}

pub fn parse_json<T: DeserializeOwned>(raw: &str, source: &str) -> Result<T> {
    serde_json::from_str(raw).with_context(|| format!("failed to parse json from {source}"))
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    let data = serde_json::to_vec_pretty(value)
        .with_context(|| format!("failed to serialize json: {}", path.display()))?;

    let mut file = File::create(path)
        .with_context(|| format!("failed to create json file: {}", path.display()))?;
    file.write_all(&data)
        .with_context(|| format!("failed to write json file: {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("failed to finalize json file: {}", path.display()))?;

    Ok(())
}

pub fn write_json_stdout<T: Serialize>(value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value).context("failed to serialize json")?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&data)
        .context("failed to write json to standard output")?;
    stdout.flush().context("failed to flush standard output")
}
