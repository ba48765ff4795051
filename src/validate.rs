//! Schema validation of a generated `theme.json`.
//!
//! Validation is delegated to an external JSON Schema CLI invoked as
//! `<validator> -s <schema> -d <theme.json>`. The validator's own output is
//! passed through verbatim.
//!
//! ## Outcome
//! - exit 0 with an empty stderr: passed, stdout is reported.
//! - non-zero exit or any stderr text: failed, stdout and stderr are reported.
use crate::theme::THEME_FILE;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

pub const VALIDATOR_ENV: &str = "LS_THEME_VALIDATOR";
pub const DEFAULT_VALIDATOR: &str = "ajv";

const BUNDLED_SCHEMA: &str = include_str!("../schema/theme.schema.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ValidatorCommand {
    /// Parse a shell-style command line and locate its program on PATH.
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut words = shell_words::split(command_line)
            .with_context(|| format!("parse validator command {command_line:?}"))?;
        if words.is_empty() {
            return Err(anyhow!("validator command is empty"));
        }
        let program = words.remove(0);
        let program = which::which(&program).with_context(|| {
            format!("could not find schema validator `{program}`; install ajv-cli or pass --validator")
        })?;
        Ok(Self {
            program,
            args: words,
        })
    }
}

/// The validator command line: CLI flag, then `$LS_THEME_VALIDATOR`, then `ajv`.
pub fn validator_command_line(flag: Option<&str>) -> String {
    if let Some(flag) = flag {
        return flag.to_string();
    }
    env::var(VALIDATOR_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_VALIDATOR.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Passed(String),
    Failed(String),
}

/// Validate `<theme_dir>/theme.json` against `schema` (or the bundled schema).
pub fn validate_theme(
    theme_dir: &Path,
    schema: Option<&Path>,
    validator: &ValidatorCommand,
) -> Result<ValidationOutcome> {
    let theme_path = theme_dir.join(THEME_FILE);
    if !theme_path.is_file() {
        return Err(anyhow!("Could not find theme.json at {}", theme_path.display()));
    }

    // The temp file must outlive the validator process.
    let bundled = match schema {
        Some(_) => None,
        None => Some(write_bundled_schema()?),
    };
    let schema_path = schema
        .or_else(|| bundled.as_ref().map(NamedTempFile::path))
        .ok_or_else(|| anyhow!("no schema available"))?;
    if !schema_path.is_file() {
        return Err(anyhow!("schema not found at {}", schema_path.display()));
    }

    let output = Command::new(&validator.program)
        .args(&validator.args)
        .arg("-s")
        .arg(schema_path)
        .arg("-d")
        .arg(&theme_path)
        .output()
        .with_context(|| format!("run validator {}", validator.program.display()))?;
    tracing::info!(
        status = ?output.status.code(),
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "validator finished"
    );

    let stdout = without_trailing_newlines(&output.stdout);
    let stderr = without_trailing_newlines(&output.stderr);
    if output.status.success() && stderr.trim().is_empty() {
        return Ok(ValidationOutcome::Passed(stdout));
    }
    let mut report = Vec::new();
    if !output.status.success() {
        report.push(format!("validator exited with {}", output.status));
    }
    report.extend([stdout, stderr].into_iter().filter(|text| !text.trim().is_empty()));
    Ok(ValidationOutcome::Failed(report.join("\n")))
}

/// Validator output verbatim except for the final line breaks.
fn without_trailing_newlines(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\n', '\r'])
        .to_string()
}

fn write_bundled_schema() -> Result<NamedTempFile> {
    // Validators pick the parser from the extension.
    let mut file = tempfile::Builder::new()
        .prefix("theme-schema-")
        .suffix(".json")
        .tempfile()
        .context("create temporary schema file")?;
    file.write_all(BUNDLED_SCHEMA.as_bytes())
        .context("write bundled schema")?;
    file.flush().context("flush bundled schema")?;
    Ok(file)
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
