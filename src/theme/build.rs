//! Theme aggregation.
//!
//! Elements are extracted first and frozen into an [`ElementCatalog`]; the
//! catalog is then handed to wedge extraction so every wedge scan sees the
//! complete element set. A bad component degrades to empty settings or
//! usages with a warning; only theme-level inputs abort the run.
use super::model::{Component, ElementCatalog, Theme, ThemeMeta};
use crate::config::GenerateConfig;
use crate::package::read_package_metadata;
use crate::scan::{scan_element_usages, ElementUsage};
use crate::script::extract_props;
use crate::settings::{normalize_settings, without_structural_id, MissingInput, Setting};
use crate::sfc::{split, SfcBlocks};
use crate::source::component_paths;
use crate::template::compile_template;
use crate::util::{display_path, to_json_pretty};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const THEME_FILE: &str = "theme.json";

/// Build the full theme manifest for `config.theme_dir`.
pub fn build_theme(config: &GenerateConfig) -> Result<Theme> {
    let package = read_package_metadata(&config.theme_dir)?;

    let elements = load_elements(config);
    let catalog = ElementCatalog::new(&elements);
    tracing::info!(count = catalog.count(), "element catalog ready");
    let wedges = load_wedges(config, &catalog);

    Ok(Theme {
        id: package.name.clone(),
        meta: ThemeMeta {
            name: package.name,
            description: package.description.unwrap_or_default(),
        },
        settings: Vec::new(),
        elements,
        wedges,
        templates: Vec::new(),
    })
}

/// Serialize `theme` and write it as `<output_dir>/theme.json`.
pub fn write_theme(theme: &Theme, output_dir: &Path) -> Result<PathBuf> {
    // Serialize before touching the filesystem so a failure leaves no partial file.
    let json = to_json_pretty(theme)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let path = output_dir.join(THEME_FILE);
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

fn load_elements(config: &GenerateConfig) -> Vec<Component> {
    let mut elements = Vec::new();
    for path in component_paths(&config.elements_dir) {
        let source = ComponentSource::read(&path, &config.theme_dir);
        let blocks = split(&source.contents);
        let settings = without_structural_id(source.settings(&blocks, config.missing_input));
        tracing::info!(
            component = %source.component_path,
            settings = settings.len(),
            "processed element"
        );
        elements.push(Component {
            name: source.name,
            component_path: source.component_path,
            settings,
            elements: None,
        });
    }
    elements
}

fn load_wedges(config: &GenerateConfig, catalog: &ElementCatalog<'_>) -> Vec<Component> {
    let mut wedges = Vec::new();
    for path in component_paths(&config.wedges_dir) {
        let source = ComponentSource::read(&path, &config.theme_dir);
        let blocks = split(&source.contents);
        let settings = source.settings(&blocks, config.missing_input);
        let usages = source.element_usages(&blocks, catalog);
        tracing::info!(
            component = %source.component_path,
            settings = settings.len(),
            elements = usages.len(),
            "processed wedge"
        );
        wedges.push(Component {
            name: source.name,
            component_path: source.component_path,
            settings,
            elements: Some(usages),
        });
    }
    wedges
}

/// One component file being extracted.
struct ComponentSource {
    name: String,
    component_path: String,
    contents: String,
}

impl ComponentSource {
    /// An unreadable file is treated as empty source.
    fn read(path: &Path, theme_dir: &Path) -> Self {
        tracing::debug!(path = %path.display(), "processing component");
        let contents = fs::read_to_string(path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "cannot read component; skipping its contents");
            String::new()
        });
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            name,
            component_path: display_path(path, theme_dir),
            contents,
        }
    }

    fn settings(&self, blocks: &SfcBlocks<'_>, missing_input: MissingInput) -> Vec<Setting> {
        let Some(script) = blocks.script else {
            return Vec::new();
        };
        match extract_props(script) {
            Ok(props) => {
                tracing::debug!(component = %self.component_path, props = props.len(), "props extracted");
                normalize_settings(&props, missing_input)
            }
            Err(err) => {
                tracing::warn!(
                    component = %self.component_path,
                    error = %err,
                    "cannot extract props; using empty settings"
                );
                Vec::new()
            }
        }
    }

    fn element_usages(&self, blocks: &SfcBlocks<'_>, catalog: &ElementCatalog<'_>) -> Vec<ElementUsage> {
        let Some(template) = blocks.template else {
            return Vec::new();
        };
        match compile_template(template) {
            Ok(root) => scan_element_usages(&root, catalog),
            Err(err) => {
                tracing::warn!(
                    component = %self.component_path,
                    error = %err,
                    "cannot compile template; using no element usages"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
