/// HTTP methods the emitted callables dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        }
    }

    /// Map a declared method string. `None` means the caller must fall back
    /// to GET and surface a diagnostic.
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            _ => None,
        }
    }
}

/// Semantic type tag mapped from a JSON-schema fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Str,
    Int,
    Float,
    Bool,
    Array(Box<TypeTag>),
    Object,
    Any,
}

/// Where a parameter travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Body,
}

/// One parameter binding in a method descriptor. The canonical `name` is
/// used for the generated identifier only; `wire_name` keys the actual
/// request payload and query string, byte-identical to the source document.
#[derive(Debug, Clone)]
pub struct ParamBinding {
    pub name: String,
    pub wire_name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub type_tag: TypeTag,
    pub description: Option<String>,
}

/// A fully derived callable: everything the emitter needs for one method.
/// Computed fresh per generation run and discarded afterwards.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    pub name: String,
    pub method: HttpMethod,
    /// Path template with placeholders rewritten to canonical names.
    pub path_template: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub params: Vec<ParamBinding>,
}

impl MethodDescriptor {
    pub fn params_at(&self, location: ParamLocation) -> impl Iterator<Item = &ParamBinding> {
        self.params.iter().filter(move |p| p.location == location)
    }
}
