use log::warn;

use crate::ir::descriptor::{HttpMethod, MethodDescriptor, ParamBinding, ParamLocation, TypeTag};
use crate::ir::grouping::TagGroup;
use crate::parse::operation::Operation;
use crate::parse::parameter::ParameterLocation;
use crate::parse::schema::{Schema, SchemaOrRef};
use crate::parse::spec::Document;

use super::name_normalizer::{fallback_operation_name, snake_name};

/// Build one method descriptor per (path, method, operation) in the group,
/// in the group's deterministic emission order.
pub fn build_descriptors(doc: &Document, group: &TagGroup<'_>) -> Vec<MethodDescriptor> {
    group
        .operations()
        .map(|(path, method, op)| build_descriptor(doc, &group.name, path, method, op))
        .collect()
}

fn build_descriptor(
    doc: &Document,
    tag: &str,
    path: &str,
    method: &str,
    op: &Operation,
) -> MethodDescriptor {
    let http_method = HttpMethod::parse(method).unwrap_or_else(|| {
        warn!("tag `{tag}`: unrecognized HTTP method `{method}` on {path}; falling back to GET");
        HttpMethod::Get
    });

    let name = match &op.operation_id {
        Some(id) => snake_name(id),
        None => fallback_operation_name(method, path),
    };

    let params = extract_params(doc, tag, op);

    // Rewrite {originalName} → {canonical_name} in lock-step with the
    // path parameters' canonicalization.
    let mut path_template = path.to_string();
    for p in params.iter().filter(|p| p.location == ParamLocation::Path) {
        path_template = path_template.replace(
            &format!("{{{}}}", p.wire_name),
            &format!("{{{}}}", p.name),
        );
    }

    MethodDescriptor {
        name,
        method: http_method,
        path_template,
        summary: op.summary.clone(),
        description: op.description.clone(),
        params,
    }
}

/// Extract path/query parameters and body parameters for one operation.
fn extract_params(doc: &Document, tag: &str, op: &Operation) -> Vec<ParamBinding> {
    let mut params = Vec::new();

    for param in &op.parameters {
        let location = match param.location {
            ParameterLocation::Path => ParamLocation::Path,
            ParameterLocation::Query => ParamLocation::Query,
            // Header/cookie parameters are not bound into callables.
            ParameterLocation::Header | ParameterLocation::Cookie => continue,
        };

        let type_tag = param
            .schema
            .as_ref()
            .map(|s| resolve_type_tag(doc, tag, s))
            .unwrap_or(TypeTag::Any);

        params.push(ParamBinding {
            name: snake_name(&param.name),
            wire_name: param.name.clone(),
            location,
            required: param.required,
            type_tag,
            description: param.description.clone(),
        });
    }

    if let Some(body) = &op.request_body {
        if let Some(media) = body.json_content() {
            if let Some(schema) = &media.schema {
                params.extend(extract_body_params(schema, body.required));
            }
        }
    }

    params
}

/// A request body that is a direct reference yields one opaque `body`
/// parameter; an inline schema with properties is flattened into one
/// parameter per property. The two forms are never merged.
fn extract_body_params(schema: &SchemaOrRef, body_required: bool) -> Vec<ParamBinding> {
    match schema {
        SchemaOrRef::Ref { .. } => vec![ParamBinding {
            name: "body".to_string(),
            wire_name: "body".to_string(),
            location: ParamLocation::Body,
            required: body_required,
            type_tag: TypeTag::Object,
            description: Some("Request body".to_string()),
        }],
        SchemaOrRef::Schema(inline) => inline
            .properties
            .iter()
            .map(|(prop_name, prop_schema)| {
                let description = match prop_schema {
                    SchemaOrRef::Schema(s) => s.description.clone(),
                    SchemaOrRef::Ref { .. } => None,
                };
                ParamBinding {
                    name: snake_name(prop_name),
                    wire_name: prop_name.clone(),
                    location: ParamLocation::Body,
                    required: inline.required.contains(prop_name),
                    type_tag: type_tag(prop_schema),
                    description,
                }
            })
            .collect(),
    }
}

/// Map a schema fragment to a type tag, resolving one level of component
/// reference first. A reference to a missing schema maps to `Any`.
fn resolve_type_tag(doc: &Document, tag: &str, schema: &SchemaOrRef) -> TypeTag {
    match schema {
        SchemaOrRef::Ref { .. } => match schema.component_name() {
            Some(name) => match doc.component_schemas().get(name) {
                Some(SchemaOrRef::Schema(resolved)) => schema_type_tag(resolved),
                // Only one level of reference is followed.
                Some(SchemaOrRef::Ref { .. }) => TypeTag::Any,
                None => {
                    warn!("tag `{tag}`: parameter schema reference `{name}` not found in components.schemas");
                    TypeTag::Any
                }
            },
            None => TypeTag::Any,
        },
        SchemaOrRef::Schema(s) => schema_type_tag(s),
    }
}

/// Map a schema fragment to a type tag without reference resolution.
pub fn type_tag(schema: &SchemaOrRef) -> TypeTag {
    match schema {
        SchemaOrRef::Ref { .. } => TypeTag::Any,
        SchemaOrRef::Schema(s) => schema_type_tag(s),
    }
}

fn schema_type_tag(schema: &Schema) -> TypeTag {
    match schema.schema_type.as_deref() {
        Some("string") => TypeTag::Str,
        Some("integer") => TypeTag::Int,
        Some("number") => TypeTag::Float,
        Some("boolean") => TypeTag::Bool,
        Some("array") => {
            let item = schema.items.as_deref().map(type_tag).unwrap_or(TypeTag::Any);
            TypeTag::Array(Box::new(item))
        }
        Some("object") => TypeTag::Object,
        _ => TypeTag::Any,
    }
}
