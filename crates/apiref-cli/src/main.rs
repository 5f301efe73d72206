use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use apiref_core::config::{self, DocsConfig};
use apiref_core::load::load_document;
use apiref_core::{DocGenerator, GeneratedFile, PageHeader};
use apiref_markdown::MarkdownGenerator;
use apiref_markdown::emitters::GROUPS_DIR;

/// Render an OpenAPI document as Markdown reference pages grouped by tag.
///
/// Missing positional arguments are a usage error and exit with status 2.
#[derive(Parser)]
#[command(name = "apiref", about = "OpenAPI to Markdown reference generator", version)]
struct Cli {
    /// Path to the OpenAPI spec file (YAML or JSON)
    input: PathBuf,

    /// Directory that receives index.md and groups/
    output: PathBuf,

    /// Source URL printed in every page header
    #[arg(allow_hyphen_values = true)]
    source_url: String,

    /// Generation timestamp printed in every page header
    #[arg(allow_hyphen_values = true)]
    generated_at: String,

    /// Index heading; defaults to info.title
    #[arg(allow_hyphen_values = true)]
    title: Option<String>,

    /// YAML file with rendering options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let docs_config = load_docs_config(cli.config.as_deref())?;
    cmd_generate(&cli, docs_config)
}

fn load_docs_config(path: Option<&Path>) -> Result<DocsConfig> {
    let Some(path) = path else {
        return Ok(DocsConfig::default());
    };
    config::load_config(path)?
        .with_context(|| format!("config file {} does not exist", path.display()))
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(cli: &Cli, docs_config: DocsConfig) -> Result<()> {
    let doc = load_document(&cli.input)?;

    let header = PageHeader {
        title: cli.title.clone(),
        source_url: cli.source_url.clone(),
        generated_at: cli.generated_at.clone(),
    };
    let files = MarkdownGenerator::new(docs_config).generate(&doc, &header)?;

    let groups_dir = cli.output.join(GROUPS_DIR);
    fs::create_dir_all(&groups_dir)
        .with_context(|| format!("failed to create output directory {}", groups_dir.display()))?;

    write_files(&cli.output, &files)?;

    log::info!(
        "generated {} files in {}",
        files.len(),
        cli.output.display()
    );
    Ok(())
}
