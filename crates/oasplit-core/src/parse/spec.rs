use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::components::Components;
use super::operation::PathItem;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Top-level OpenAPI 3.x document. Parsed once, then treated as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub openapi: String,

    pub info: Info,

    pub paths: IndexMap<String, PathItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

impl Document {
    /// The named component schemas, or an empty map if none are declared.
    pub fn component_schemas(&self) -> &IndexMap<String, super::schema::SchemaOrRef> {
        static EMPTY: std::sync::OnceLock<IndexMap<String, super::schema::SchemaOrRef>> =
            std::sync::OnceLock::new();
        self.components
            .as_ref()
            .map(|c| &c.schemas)
            .unwrap_or_else(|| EMPTY.get_or_init(IndexMap::new))
    }
}
