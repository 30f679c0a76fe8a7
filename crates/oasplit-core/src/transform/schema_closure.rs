use std::collections::{BTreeSet, HashSet, VecDeque};

use indexmap::IndexMap;
use log::warn;

use crate::ir::grouping::TagGroup;
use crate::parse::schema::SchemaOrRef;
use crate::parse::spec::Document;

/// Collect the schema names a tag's operations reference directly, through
/// request-body and response content `$ref`s. Sorted, so the closure's
/// insertion order is deterministic.
pub fn seed_schemas(group: &TagGroup<'_>) -> BTreeSet<String> {
    let mut seeds = BTreeSet::new();

    for (_, _, op) in group.operations() {
        if let Some(body) = &op.request_body {
            for media in body.content.values() {
                if let Some(name) = media.schema.as_ref().and_then(SchemaOrRef::component_name) {
                    seeds.insert(name.to_string());
                }
            }
        }
        for response in op.responses.values() {
            for media in response.content.values() {
                if let Some(name) = media.schema.as_ref().and_then(SchemaOrRef::component_name) {
                    seeds.insert(name.to_string());
                }
            }
        }
    }

    seeds
}

/// Compute the transitive closure of schemas reachable by reference from the
/// seed set. Each name is expanded exactly once, which both deduplicates and
/// terminates cyclic reference graphs. A name absent from
/// `components.schemas` is skipped with a diagnostic and resolution
/// continues for every other reachable schema.
pub fn resolve_closure<'a>(
    doc: &'a Document,
    tag: &str,
    seeds: BTreeSet<String>,
) -> IndexMap<String, &'a SchemaOrRef> {
    let schemas = doc.component_schemas();
    let mut visited: HashSet<String> = HashSet::new();
    let mut worklist: VecDeque<String> = seeds.into_iter().collect();
    let mut output: IndexMap<String, &'a SchemaOrRef> = IndexMap::new();

    while let Some(name) = worklist.pop_front() {
        if !visited.insert(name.clone()) {
            continue;
        }

        let Some(schema) = schemas.get(&name) else {
            warn!("tag `{tag}`: schema `{name}` referenced but not found in components.schemas; skipping");
            continue;
        };

        output.insert(name, schema);

        for next in outgoing_refs(schema) {
            if !visited.contains(next) {
                worklist.push_back(next.to_string());
            }
        }
    }

    output
}

/// The names a schema reaches directly: its own array item schema, each
/// property, and each array property's item schema.
fn outgoing_refs(schema: &SchemaOrRef) -> Vec<&str> {
    let mut refs = Vec::new();

    let SchemaOrRef::Schema(schema) = schema else {
        if let Some(name) = schema.component_name() {
            refs.push(name);
        }
        return refs;
    };

    if let Some(items) = &schema.items {
        if let Some(name) = items.component_name() {
            refs.push(name);
        }
    }

    for prop in schema.properties.values() {
        match prop {
            SchemaOrRef::Ref { .. } => {
                if let Some(name) = prop.component_name() {
                    refs.push(name);
                }
            }
            SchemaOrRef::Schema(prop_schema) => {
                if let Some(items) = &prop_schema.items {
                    if let Some(name) = items.component_name() {
                        refs.push(name);
                    }
                }
            }
        }
    }

    refs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::partition_by_tag;
    use crate::parse;

    const CYCLIC: &str = r##"{
      "openapi": "3.1.0",
      "info": {"title": "T", "version": "1"},
      "paths": {"/accounts": {"get": {
        "tags": ["accounts"],
        "operationId": "listAccounts",
        "responses": {"200": {"content": {"application/json": {
          "schema": {"$ref": "#/components/schemas/Account"}}}}}
      }}},
      "components": {"schemas": {
        "Account": {"type": "object", "properties": {
          "profile": {"$ref": "#/components/schemas/Profile"}}},
        "Profile": {"type": "object", "properties": {
          "owner": {"$ref": "#/components/schemas/Account"}}},
        "Unrelated": {"type": "string"}
      }}
    }"##;

    #[test]
    fn cyclic_references_terminate_with_exact_closure() {
        let doc = parse::from_json(CYCLIC).unwrap();
        let groups = partition_by_tag(&doc);
        let seeds = seed_schemas(&groups[0]);
        assert_eq!(seeds.iter().collect::<Vec<_>>(), vec!["Account"]);

        let closure = resolve_closure(&doc, "accounts", seeds);
        let mut names: Vec<&str> = closure.keys().map(String::as_str).collect();
        names.sort();
        assert_eq!(names, vec!["Account", "Profile"]);
    }

    #[test]
    fn array_item_references_are_followed() {
        let doc = parse::from_json(
            r##"{
              "openapi": "3.1.0",
              "info": {"title": "T", "version": "1"},
              "paths": {},
              "components": {"schemas": {
                "Page": {"type": "object", "properties": {
                  "items": {"type": "array",
                            "items": {"$ref": "#/components/schemas/Entry"}}}},
                "Entry": {"type": "object"}
              }}
            }"##,
        )
        .unwrap();
        let closure = resolve_closure(&doc, "t", BTreeSet::from(["Page".to_string()]));
        assert!(closure.contains_key("Page"));
        assert!(closure.contains_key("Entry"));
        assert_eq!(closure.len(), 2);
    }

    #[test]
    fn missing_schema_is_skipped_not_fatal() {
        let doc = parse::from_json(
            r##"{
              "openapi": "3.1.0",
              "info": {"title": "T", "version": "1"},
              "paths": {},
              "components": {"schemas": {
                "Known": {"type": "object", "properties": {
                  "ghost": {"$ref": "#/components/schemas/Ghost"}}}
              }}
            }"##,
        )
        .unwrap();
        let closure = resolve_closure(&doc, "t", BTreeSet::from(["Known".to_string()]));
        assert_eq!(closure.len(), 1);
        assert!(closure.contains_key("Known"));
    }
}
