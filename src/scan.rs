//! Element usage scanning over compiled wedge templates.
use crate::template::{TemplateNode, TemplateRoot};
use serde::{Deserialize, Serialize};

/// Attribute that names an element instance inside a wedge.
const INSTANCE_ID_ATTR: &str = "id";

/// One element instance placed in a wedge template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementUsage {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: String,
}

/// Lookup of element tag names a wedge template may reference.
pub trait KnownElements {
    fn is_known(&self, tag: &str) -> bool;
}

/// Collect every known element tag carrying a non-empty static `id`, in
/// document (pre-order) order. Unmatched nodes are still descended into.
pub fn scan_element_usages(root: &TemplateRoot, known: &impl KnownElements) -> Vec<ElementUsage> {
    let mut usages = Vec::new();
    for node in &root.nodes {
        visit(node, known, &mut usages);
    }
    usages
}

fn visit(node: &TemplateNode, known: &impl KnownElements, usages: &mut Vec<ElementUsage>) {
    if known.is_known(&node.tag) {
        if let Some(id) = node.attribute(INSTANCE_ID_ATTR).filter(|id| !id.is_empty()) {
            usages.push(ElementUsage {
                id: id.to_string(),
                element_type: node.tag.clone(),
            });
        }
    }
    for child in &node.children {
        visit(child, known, usages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::compile_template;
    use std::collections::BTreeSet;

    struct Names(BTreeSet<&'static str>);

    impl KnownElements for Names {
        fn is_known(&self, tag: &str) -> bool {
            self.0.contains(tag)
        }
    }

    fn names(list: &[&'static str]) -> Names {
        Names(list.iter().copied().collect())
    }

    fn scan(markup: &str, known: &Names) -> Vec<(String, String)> {
        let root = compile_template(markup).expect("compile");
        scan_element_usages(&root, known)
            .into_iter()
            .map(|usage| (usage.id, usage.element_type))
            .collect()
    }

    fn pair(id: &str, ty: &str) -> (String, String) {
        (id.to_string(), ty.to_string())
    }

    #[test]
    fn finds_usages_at_any_depth_in_document_order() {
        let markup = r#"
            <section>
                <Heading id="title" />
                <div><div><Button id="cta" /></div></div>
                <Button id="secondary"></Button>
            </section>
        "#;
        assert_eq!(
            scan(markup, &names(&["Button", "Heading"])),
            vec![
                pair("title", "Heading"),
                pair("cta", "Button"),
                pair("secondary", "Button")
            ]
        );
    }

    #[test]
    fn skips_unknown_tags_but_descends_into_them() {
        let markup = r#"<Unknown id="u"><Button id="inner"/></Unknown>"#;
        assert_eq!(scan(markup, &names(&["Button"])), vec![pair("inner", "Button")]);
    }

    #[test]
    fn known_element_children_are_scanned_too() {
        let markup = r#"<Card id="outer"><Card id="inner"/></Card>"#;
        assert_eq!(
            scan(markup, &names(&["Card"])),
            vec![pair("outer", "Card"), pair("inner", "Card")]
        );
    }

    #[test]
    fn requires_a_non_empty_static_id() {
        let markup = r#"<Button/><Button id=""/><Button :id="x"/><Button id="ok"/>"#;
        assert_eq!(scan(markup, &names(&["Button"])), vec![pair("ok", "Button")]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let markup = r#"<button id="a"/><Button id="b"/>"#;
        assert_eq!(scan(markup, &names(&["Button"])), vec![pair("b", "Button")]);
    }

    #[test]
    fn duplicate_usages_are_kept() {
        let markup = r#"<Button id="a"/><Button id="a"/>"#;
        assert_eq!(
            scan(markup, &names(&["Button"])),
            vec![pair("a", "Button"), pair("a", "Button")]
        );
    }

    #[test]
    fn no_known_elements_means_no_usages() {
        assert!(scan(r#"<Button id="a"/>"#, &names(&[])).is_empty());
    }
}
