use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tempfile::NamedTempFile;

use oasplit_core::CodeGenerator;
use oasplit_core::parse;
use oasplit_core::parse::spec::Document;
use oasplit_webui_tools::WebuiToolsGenerator;

#[derive(Parser)]
#[command(
    name = "oasplit",
    about = "Split an OpenAPI document into per-tag tool modules and subset schemas",
    version
)]
struct Cli {
    /// Path to the OpenAPI document (JSON, or YAML by extension)
    input: PathBuf,

    /// Directory for the generated modules and subset schemas
    #[arg(long = "output-dir", default_value = "generated_tools")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let doc = load_document(&cli.input)?;

    let files = WebuiToolsGenerator
        .generate(&doc)
        .context("code generation failed")?;

    fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            cli.output_dir.display()
        )
    })?;

    for file in &files {
        let path = cli.output_dir.join(&file.path);
        write_atomic(&path, &file.content)?;
        eprintln!("  wrote {}", path.display());
    }

    eprintln!(
        "Generated {} files in {}",
        files.len(),
        cli.output_dir.display()
    );
    Ok(())
}

fn load_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let doc = match ext {
        "yaml" | "yml" => parse::from_yaml(&content),
        _ => parse::from_json(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(doc)
}

/// Write via a temporary file in the destination directory, then rename, so
/// a crash mid-run never leaves a truncated generated file behind.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to persist {}", path.display()))?;

    Ok(())
}

/// Write generated files under the given base directory. Used by the tests;
/// `main` goes through the same `write_atomic` path.
#[cfg(test)]
fn write_files(base: &Path, files: &[oasplit_core::GeneratedFile]) -> Result<()> {
    fs::create_dir_all(base)?;
    for file in files {
        write_atomic(&base.join(&file.path), &file.content)?;
    }
    Ok(())
}
