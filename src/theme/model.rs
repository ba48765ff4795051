use crate::scan::{ElementUsage, KnownElements};
use crate::settings::Setting;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The `theme.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub meta: ThemeMeta,
    /// Reserved; always empty.
    pub settings: Vec<Value>,
    pub elements: Vec<Component>,
    pub wedges: Vec<Component>,
    /// Reserved; always empty.
    pub templates: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeMeta {
    pub name: String,
    pub description: String,
}

/// An element or wedge component. Only wedges carry `elements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    /// Component file path relative to the theme root.
    #[serde(rename = "component")]
    pub component_path: String,
    pub settings: Vec<Setting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ElementUsage>>,
}

/// Element components by name, complete before any wedge is scanned.
#[derive(Debug, Clone, Default)]
pub struct ElementCatalog<'a> {
    by_name: BTreeMap<&'a str, &'a Component>,
}

impl<'a> ElementCatalog<'a> {
    /// Later duplicates of a name do not replace the first element.
    pub fn new(elements: &'a [Component]) -> Self {
        let mut by_name = BTreeMap::new();
        for element in elements {
            by_name.entry(element.name.as_str()).or_insert(element);
        }
        Self { by_name }
    }

    pub fn count(&self) -> usize {
        self.by_name.len()
    }
}

impl KnownElements for ElementCatalog<'_> {
    fn is_known(&self, tag: &str) -> bool {
        self.by_name.contains_key(tag)
    }
}
