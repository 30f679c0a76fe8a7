use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A reference or inline schema. Keeping these as a closed tagged pair makes
/// reference resolution a structural match instead of string parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    /// The component-schema name this reference points at, if it is a
    /// `#/components/schemas/<name>` reference.
    pub fn component_name(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path } => ref_path.strip_prefix("#/components/schemas/"),
            SchemaOrRef::Schema(_) => None,
        }
    }
}

/// A JSON Schema fragment, restricted to the members generation cares about.
/// Unknown members are preserved for verbatim re-emission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}
