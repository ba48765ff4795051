//! Theme package metadata (`package.json`).
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const PACKAGE_FILE: &str = "package.json";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Read `<theme_dir>/package.json`. Missing or malformed metadata is fatal.
pub fn read_package_metadata(theme_dir: &Path) -> Result<PackageMetadata> {
    let path = theme_dir.join(PACKAGE_FILE);
    let bytes =
        fs::read(&path).with_context(|| format!("read package metadata {}", path.display()))?;
    let package: PackageMetadata = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse package metadata {}", path.display()))?;
    if package.name.trim().is_empty() {
        return Err(anyhow!("package name is empty in {}", path.display()));
    }
    Ok(package)
}
