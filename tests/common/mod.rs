//! Shared fixtures for driving the `ls-theme` binary against temp themes.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const ELEMENTS_DIR: &str = "node_modules/@lemonsqueezy/theme-elements/src/components";

/// A theme directory on disk with helpers for writing components.
pub struct ThemeDir {
    dir: TempDir,
}

impl ThemeDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn with_package(name: &str, description: &str) -> Self {
        let theme = Self::new();
        theme.write(
            "package.json",
            &format!(r#"{{ "name": "{name}", "description": "{description}" }}"#),
        );
        theme
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(path, contents).expect("write file");
    }

    pub fn element(&self, name: &str, contents: &str) {
        self.write(&format!("{ELEMENTS_DIR}/{name}.vue"), contents);
    }

    pub fn wedge(&self, name: &str, contents: &str) {
        self.write(&format!("wedges/{name}.vue"), contents);
    }

    pub fn read_theme(&self, rel: &str) -> serde_json::Value {
        let text = fs::read_to_string(self.path(rel)).expect("read theme.json");
        serde_json::from_str(&text).expect("parse theme.json")
    }
}

/// Run the binary with `args`, isolated from the caller's logging and validator env.
pub fn run_ls_theme(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ls-theme"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("LS_THEME_VALIDATOR")
        .output()
        .expect("run ls-theme")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
