use serde::{Deserialize, Serialize};

/// A security scheme declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

impl SecurityScheme {
    /// The bearer scheme every subset document declares.
    pub fn http_bearer() -> Self {
        Self {
            scheme_type: "http".to_string(),
            scheme: Some("bearer".to_string()),
        }
    }
}
