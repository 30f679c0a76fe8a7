pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a parsed document.
pub trait CodeGenerator {
    type Error: std::error::Error;
    fn generate(
        &self,
        doc: &parse::spec::Document,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
