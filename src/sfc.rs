//! Single-file component splitting.
//!
//! Finds the top-level `<template>` and `<script>` blocks of a component
//! source. Only the first block of each kind is kept; `<style>` blocks are
//! stepped over so their contents never look like markup.
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SfcBlocks<'src> {
    pub template: Option<&'src str>,
    pub script: Option<&'src str>,
}

fn block_open_regex() -> &'static Regex {
    static OPEN: OnceLock<Regex> = OnceLock::new();
    OPEN.get_or_init(|| {
        Regex::new(r"<(template|script|style)(?:\s[^>]*)?>").expect("regex for block open tags")
    })
}

fn template_tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r"<(/?)template(?:\s[^>]*)?>").expect("regex for nested template tags")
    })
}

pub fn split(source: &str) -> SfcBlocks<'_> {
    let mut blocks = SfcBlocks::default();
    let mut pos = 0;
    while pos < source.len() {
        let Some(open) = block_open_regex().captures_at(source, pos) else {
            break;
        };
        let (Some(whole), Some(name)) = (open.get(0), open.get(1)) else {
            break;
        };
        if let Some(comment_end) = comment_before(source, pos, whole.start()) {
            pos = comment_end;
            continue;
        }
        let content_start = whole.end();
        let close = match name.as_str() {
            "template" => matching_template_close(source, content_start),
            other => find_close(source, content_start, other),
        };
        let Some((content_end, after)) = close else {
            // Unclosed block: nothing further is top-level.
            break;
        };
        let content = &source[content_start..content_end];
        let slot = match name.as_str() {
            "template" => Some(&mut blocks.template),
            "script" => Some(&mut blocks.script),
            _ => None,
        };
        if let Some(slot) = slot {
            slot.get_or_insert(content);
        }
        pos = after;
    }
    blocks
}

/// End of an HTML comment that opens in `source[from..until]`, if any.
fn comment_before(source: &str, from: usize, until: usize) -> Option<usize> {
    let start = from + source[from..until].find("<!--")?;
    let end = source[start + 4..]
        .find("-->")
        .map_or(source.len(), |offset| start + 4 + offset + 3);
    Some(end)
}

fn find_close(source: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let needle = format!("</{name}>");
    let offset = source[from..].find(&needle)?;
    Some((from + offset, from + offset + needle.len()))
}

fn matching_template_close(source: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    for tag in template_tag_regex().captures_iter(&source[from..]) {
        let whole = tag.get(0)?;
        let closing = tag.get(1).is_some_and(|slash| !slash.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                return Some((from + whole.start(), from + whole.end()));
            }
        } else if !whole.as_str().ends_with("/>") {
            depth += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_all_blocks() {
        let source = r#"<template>
  <div><Button id="cta" /></div>
</template>

<script>
export default { props: {} }
</script>

<style scoped>
.a { color: red; }
</style>
"#;
        let blocks = split(source);
        assert_eq!(
            blocks.template.map(str::trim),
            Some(r#"<div><Button id="cta" /></div>"#)
        );
        assert_eq!(
            blocks.script.map(str::trim),
            Some("export default { props: {} }")
        );
    }

    #[test]
    fn balances_nested_template_tags() {
        let source = "<template><div><template v-if=\"x\"><A id=\"a\"/></template></div></template><script>s</script>";
        let blocks = split(source);
        assert_eq!(
            blocks.template,
            Some("<div><template v-if=\"x\"><A id=\"a\"/></template></div>")
        );
        assert_eq!(blocks.script, Some("s"));
    }

    #[test]
    fn missing_blocks_are_none() {
        let blocks = split("<template><Button id=\"cta\" /></template>");
        assert!(blocks.template.is_some());
        assert_eq!(blocks.script, None);
    }

    #[test]
    fn commented_out_blocks_are_ignored() {
        let blocks = split("<!-- <script>old</script> --><script lang=\"js\">new</script>");
        assert_eq!(blocks.script, Some("new"));
    }

    #[test]
    fn style_contents_are_not_blocks() {
        let blocks = split("<style>/* <script>x</script> */</style><script>real</script>");
        assert_eq!(blocks.script, Some("real"));
    }

    #[test]
    fn keeps_first_script_block() {
        let blocks = split("<script>first</script><script setup>second</script>");
        assert_eq!(blocks.script, Some("first"));
    }
}
