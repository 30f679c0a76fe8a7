use thiserror::Error;

/// Fatal input errors: the whole run aborts and nothing is written.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse YAML document: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}
