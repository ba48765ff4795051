//! Generation config: built-in defaults, optional theme config file, CLI flags.
use crate::cli::GenerateArgs;
use crate::settings::MissingInput;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "ls-theme.config.json";
pub const DEFAULT_WEDGES_DIR: &str = "wedges";
pub const DEFAULT_ELEMENTS_DIR: &str = "node_modules/@lemonsqueezy/theme-elements/src/components";

/// Optional theme-owned overrides read from `ls-theme.config.json`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeConfigFile {
    pub wedges_dir: Option<PathBuf>,
    pub elements_dir: Option<PathBuf>,
    pub missing_input: Option<MissingInput>,
}

/// Fully resolved inputs for one generate run. All paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub theme_dir: PathBuf,
    pub output_dir: PathBuf,
    pub elements_dir: PathBuf,
    pub wedges_dir: PathBuf,
    pub missing_input: MissingInput,
}

impl GenerateConfig {
    /// Defaults for a theme rooted at `theme_dir`, writing next to it.
    pub fn for_theme(theme_dir: &Path) -> Self {
        Self {
            theme_dir: theme_dir.to_path_buf(),
            output_dir: theme_dir.to_path_buf(),
            elements_dir: theme_dir.join(DEFAULT_ELEMENTS_DIR),
            wedges_dir: theme_dir.join(DEFAULT_WEDGES_DIR),
            missing_input: MissingInput::default(),
        }
    }
}

/// Resolve a theme directory against the working directory; it must exist.
pub fn resolve_theme_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(anyhow!("theme directory not found: {}", path.display()));
    }
    path.canonicalize()
        .with_context(|| format!("resolve theme directory {}", path.display()))
}

pub fn load_config_file(theme_dir: &Path) -> Result<Option<ThemeConfigFile>> {
    let path = theme_dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    let config = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse theme config {}", path.display()))?;
    Ok(Some(config))
}

/// Layer defaults, the theme config file and CLI flags (later wins).
pub fn resolve_generate_config(args: &GenerateArgs) -> Result<GenerateConfig> {
    let theme_dir = resolve_theme_dir(&args.theme_dir)?;
    let mut config = GenerateConfig::for_theme(&theme_dir);

    if let Some(file) = load_config_file(&theme_dir)? {
        tracing::info!(path = %theme_dir.join(CONFIG_FILE).display(), "loaded theme config");
        if let Some(dir) = file.wedges_dir {
            config.wedges_dir = theme_dir.join(dir);
        }
        if let Some(dir) = file.elements_dir {
            config.elements_dir = theme_dir.join(dir);
        }
        if let Some(missing_input) = file.missing_input {
            config.missing_input = missing_input;
        }
    }

    if let Some(dir) = &args.wedges_dir {
        config.wedges_dir = theme_dir.join(dir);
    }
    if let Some(dir) = &args.elements_dir {
        config.elements_dir = theme_dir.join(dir);
    }
    if let Some(missing_input) = args.missing_input {
        config.missing_input = missing_input;
    }
    config.output_dir = absolute(&args.output_dir)?;
    Ok(config)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("resolve working directory")?;
    Ok(cwd.join(path))
}
