//! Settings normalization: declared props to UI-editable setting records.
use crate::script::PropertyMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Input type used when a setting does not declare one.
pub const DEFAULT_INPUT_TYPE: &str = "text";

/// Prop name reserved for the component's structural identifier.
pub const STRUCTURAL_ID_PROP: &str = "id";

/// What to do with a prop that declares no `input` metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingInput {
    /// Leave the prop out of the settings list.
    #[default]
    Skip,
    /// Emit the prop as a plain text setting.
    Text,
}

/// One setting: `{ "id": <prop name>, "type": ..., ...other input fields }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Setting(Map<String, Value>);

impl Setting {
    fn from_input(key: &str, input: Map<String, Value>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(key.to_string()));
        // Input fields spread over the id, so an explicit `id` wins.
        fields.extend(input);
        if !matches!(fields.get("type"), Some(value) if !value.is_null()) {
            fields.insert(
                "type".to_string(),
                Value::String(DEFAULT_INPUT_TYPE.to_string()),
            );
        }
        Self(fields)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }
}

/// Normalize every declared prop into a setting, in declaration order.
pub fn normalize_settings(props: &PropertyMap, missing_input: MissingInput) -> Vec<Setting> {
    let mut settings = Vec::new();
    for (key, metadata) in props.iter() {
        // Non-object metadata (`count: Number`, `size: 5`) has no input.
        let input = match metadata.to_json() {
            Some(Value::Object(mut fields)) => match fields.remove("input") {
                Some(Value::Object(input)) => Some(input),
                _ => None,
            },
            _ => None,
        };
        let input = match (input, missing_input) {
            (Some(input), _) => input,
            (None, MissingInput::Text) => default_input(),
            (None, MissingInput::Skip) => continue,
        };
        settings.push(Setting::from_input(key, input));
    }
    settings
}

/// Drop the structural `id` prop; element settings never expose it.
pub fn without_structural_id(settings: Vec<Setting>) -> Vec<Setting> {
    settings
        .into_iter()
        .filter(|setting| setting.id() != Some(STRUCTURAL_ID_PROP))
        .collect()
}

fn default_input() -> Map<String, Value> {
    let mut input = Map::new();
    input.insert(
        "type".to_string(),
        Value::String(DEFAULT_INPUT_TYPE.to_string()),
    );
    input
}
