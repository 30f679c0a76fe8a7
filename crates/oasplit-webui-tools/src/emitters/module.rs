use minijinja::{Environment, context};
use oasplit_core::ir::{MethodDescriptor, ParamLocation};
use oasplit_core::transform::name_normalizer::capitalize;

use crate::type_mapper::python_hint;

/// Render one Python tool module: the fixed configuration preamble plus one
/// callable per descriptor.
pub fn emit_module(
    tag: &str,
    descriptors: &[MethodDescriptor],
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template("tool.py.j2", include_str!("../../templates/tool.py.j2"))
        .expect("template should be valid");
    let tmpl = env.get_template("tool.py.j2").unwrap();

    let methods: Vec<minijinja::Value> = descriptors.iter().map(build_method_context).collect();

    tmpl.render(context! {
        title => capitalize(tag),
        methods => methods,
    })
}

fn build_method_context(desc: &MethodDescriptor) -> minijinja::Value {
    // Required parameters precede optional ones so the emitted signature is
    // always valid Python, whatever the declaration order was.
    let mut required_parts = Vec::new();
    let mut optional_parts = Vec::new();
    for p in &desc.params {
        let hint = python_hint(&p.type_tag);
        if p.required {
            required_parts.push(format!("{}: {}", p.name, hint));
        } else {
            optional_parts.push(format!("{}: Optional[{}] = None", p.name, hint));
        }
    }
    let params_signature = required_parts
        .into_iter()
        .chain(optional_parts)
        .collect::<Vec<_>>()
        .join(", ");

    let param_docs: Vec<minijinja::Value> = desc
        .params
        .iter()
        .map(|p| {
            context! {
                name => p.name.clone(),
                description => p.description.clone().unwrap_or_default(),
            }
        })
        .collect();

    // Payload and query mappings are keyed by wire names; the bound argument
    // uses the canonical identifier.
    let payload_items = wire_bindings(desc, ParamLocation::Body);
    let query_items = wire_bindings(desc, ParamLocation::Query);

    context! {
        name => desc.name.clone(),
        params_signature => params_signature,
        summary => desc.summary.clone().unwrap_or_default(),
        description => desc
            .description
            .clone()
            .unwrap_or_else(|| "No description provided".to_string()),
        param_docs => param_docs,
        path_template => desc.path_template.clone(),
        payload_items => payload_items,
        query_items => query_items,
        http_method => desc.method.as_str(),
    }
}

fn wire_bindings(desc: &MethodDescriptor, location: ParamLocation) -> Vec<minijinja::Value> {
    desc.params_at(location)
        .map(|p| {
            context! {
                wire => p.wire_name.clone(),
                binding => p.name.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasplit_core::ir::{HttpMethod, ParamBinding, TypeTag};

    fn descriptor(
        name: &str,
        method: HttpMethod,
        path: &str,
        params: Vec<ParamBinding>,
    ) -> MethodDescriptor {
        MethodDescriptor {
            name: name.to_string(),
            method,
            path_template: path.to_string(),
            summary: Some("Summary line".to_string()),
            description: None,
            params,
        }
    }

    fn binding(
        name: &str,
        wire: &str,
        location: ParamLocation,
        required: bool,
        tag: TypeTag,
    ) -> ParamBinding {
        ParamBinding {
            name: name.to_string(),
            wire_name: wire.to_string(),
            location,
            required,
            type_tag: tag,
            description: None,
        }
    }

    #[test]
    fn path_only_get_method() {
        let desc = descriptor(
            "get_widget",
            HttpMethod::Get,
            "/widgets/{widget_id}",
            vec![binding(
                "widget_id",
                "widgetId",
                ParamLocation::Path,
                true,
                TypeTag::Int,
            )],
        );
        let module = emit_module("widgets", &[desc]).unwrap();

        assert!(module.contains("title: Widgets API Tool"));
        assert!(module.contains("def get_widget(self, widget_id: int) -> dict:"));
        assert!(module.contains("url = self.api_base + f\"/widgets/{widget_id}\""));
        assert!(module.contains("response = requests.get(url, headers=self.headers)"));
        assert!(!module.contains("payload"));
        assert!(!module.contains("params="));
    }

    #[test]
    fn body_payload_keyed_by_wire_names() {
        let desc = descriptor(
            "update_assignment",
            HttpMethod::Post,
            "/assignments",
            vec![
                binding(
                    "assignment_id",
                    "assignment-id",
                    ParamLocation::Body,
                    true,
                    TypeTag::Str,
                ),
                binding("age", "age", ParamLocation::Body, false, TypeTag::Int),
            ],
        );
        let module = emit_module("assignments", &[desc]).unwrap();

        assert!(module.contains(
            "def update_assignment(self, assignment_id: str, age: Optional[int] = None) -> dict:"
        ));
        // Payload keys are the wire names, byte-identical to the source.
        assert!(module.contains("\"assignment-id\": assignment_id,"));
        assert!(module.contains("\"age\": age,"));
        assert!(module.contains("requests.post(url, json=payload, headers=self.headers)"));
    }

    #[test]
    fn query_mapping_keyed_by_wire_names() {
        let desc = descriptor(
            "list_widgets",
            HttpMethod::Get,
            "/widgets",
            vec![binding(
                "per_page",
                "perPage",
                ParamLocation::Query,
                false,
                TypeTag::Int,
            )],
        );
        let module = emit_module("widgets", &[desc]).unwrap();

        assert!(module.contains("params = {"));
        assert!(module.contains("\"perPage\": per_page,"));
        assert!(module.contains("requests.get(url, params=params, headers=self.headers)"));
    }

    #[test]
    fn error_value_shape_in_every_callable() {
        let desc = descriptor("ping", HttpMethod::Get, "/ping", vec![]);
        let module = emit_module("misc", &[desc]).unwrap();

        assert!(module.contains("\"error\": str(e),"));
        assert!(module.contains("\"status_code\": getattr(response, \"status_code\", None),"));
        assert!(module.contains("\"text\": getattr(response, \"text\", \"\"),"));
        assert!(module.contains("response = None"));
    }

    #[test]
    fn render_is_deterministic() {
        let desc = descriptor("ping", HttpMethod::Get, "/ping", vec![]);
        let a = emit_module("misc", std::slice::from_ref(&desc)).unwrap();
        let b = emit_module("misc", &[desc]).unwrap();
        assert_eq!(a, b);
    }
}
