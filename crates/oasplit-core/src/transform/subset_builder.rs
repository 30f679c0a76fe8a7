use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::ir::grouping::TagGroup;
use crate::parse::operation::Operation;
use crate::parse::schema::SchemaOrRef;
use crate::parse::security::SecurityScheme;
use crate::parse::spec::Document;

use super::name_normalizer::capitalize;
use super::schema_closure::{resolve_closure, seed_schemas};

/// A minimal per-tag API document. Operations are borrowed from the source
/// document and serialized unmodified, so wire names and `in` fields keep
/// their original spelling.
#[derive(Debug, Serialize)]
pub struct SubsetDocument<'a> {
    pub openapi: &'a str,
    pub info: SubsetInfo,
    pub paths: BTreeMap<&'a str, BTreeMap<&'a str, &'a Operation>>,
    pub components: SubsetComponents<'a>,
}

#[derive(Debug, Serialize)]
pub struct SubsetInfo {
    pub title: String,
    pub version: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SubsetComponents<'a> {
    pub schemas: IndexMap<String, &'a SchemaOrRef>,
    #[serde(rename = "securitySchemes")]
    pub security_schemes: IndexMap<&'static str, SecurityScheme>,
}

/// Assemble the subset document for one tag: the declared version literal
/// copied from the source, a synthesized info block, the tag's selected
/// operations, and the resolved schema closure. The bearer security scheme
/// is always declared, whether or not the source document had one.
pub fn build_subset<'a>(doc: &'a Document, group: &TagGroup<'a>) -> SubsetDocument<'a> {
    let closure = resolve_closure(doc, &group.name, seed_schemas(group));

    let mut security_schemes = IndexMap::new();
    security_schemes.insert("HTTPBearer", SecurityScheme::http_bearer());

    SubsetDocument {
        openapi: &doc.openapi,
        info: SubsetInfo {
            title: format!("{} API", capitalize(&group.name)),
            version: doc.info.version.clone(),
            description: format!("API endpoints for {}", group.name),
        },
        paths: group.paths.clone(),
        components: SubsetComponents {
            schemas: closure,
            security_schemes,
        },
    }
}
