pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security;
pub mod spec;

use crate::error::DocumentError;
use spec::Document;

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<Document, DocumentError> {
    let doc: Document = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<Document, DocumentError> {
    let doc: Document = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

fn validate_version(doc: &Document) -> Result<(), DocumentError> {
    if !doc.openapi.starts_with("3.") {
        return Err(DocumentError::UnsupportedVersion(doc.openapi.clone()));
    }
    Ok(())
}
