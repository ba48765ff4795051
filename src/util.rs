use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Component, Path};

/// `path` relative to `base` with `/` separators; the full path when it is not under `base`.
///
/// `..` parts after `base` are kept, so `base/../shared/x` stays outside `base`.
pub fn display_path(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(relative) => relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                Component::ParentDir => Some("..".into()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

/// Serialize `value` as JSON indented with four spaces.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer).context("serialize JSON")?;
    String::from_utf8(out).context("serialized JSON is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn display_path_is_relative_with_forward_slashes() {
        let base = PathBuf::from("/themes/aurora");
        let path = base.join("wedges").join("Hero.vue");
        assert_eq!(display_path(&path, &base), "wedges/Hero.vue");
        assert_eq!(
            display_path(Path::new("/elsewhere/Button.vue"), &base),
            "/elsewhere/Button.vue"
        );
    }

    #[test]
    fn display_path_keeps_parent_segments() {
        let base = PathBuf::from("/themes/aurora");
        let path = base.join("../shared/./Button.vue");
        assert_eq!(display_path(&path, &base), "../shared/Button.vue");
    }

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let json = to_json_pretty(&serde_json::json!({ "a": [1] })).expect("serialize");
        assert_eq!(json, "{\n    \"a\": [\n        1\n    ]\n}");
    }
}
