use log::info;
use thiserror::Error;

use oasplit_core::ir::partition_by_tag;
use oasplit_core::parse::spec::Document;
use oasplit_core::transform::method_builder::build_descriptors;
use oasplit_core::transform::subset_builder::build_subset;
use oasplit_core::{CodeGenerator, GeneratedFile};

use crate::emitters;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("failed to serialize subset document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open-webui tool generator: one Python module plus one subset OpenAPI
/// document per tag.
pub struct WebuiToolsGenerator;

impl CodeGenerator for WebuiToolsGenerator {
    type Error = EmitError;

    fn generate(&self, doc: &Document) -> Result<Vec<GeneratedFile>, EmitError> {
        let groups = partition_by_tag(doc);
        let mut files = Vec::with_capacity(groups.len() * 2);

        for group in &groups {
            info!("processing tag: {}", group.name);

            // The tag's whole in-memory model is computed before either of
            // its files is assembled, so a failure here leaves no partial
            // artifact for this tag.
            let descriptors = build_descriptors(doc, group);
            let subset = build_subset(doc, group);

            let module = emitters::module::emit_module(&group.name, &descriptors)?;
            let schema = serde_json::to_string_pretty(&subset)?;

            let stem = group.name.to_lowercase();
            files.push(GeneratedFile {
                path: format!("{stem}_tool.py"),
                content: module,
            });
            files.push(GeneratedFile {
                path: format!("{stem}_openapi.json"),
                content: schema,
            });
        }

        Ok(files)
    }
}
