pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod group;
pub mod label;
pub mod load;
pub mod resolve;
pub mod value;

pub use document::Document;
pub use error::{ConfigError, GenerateError, LoadError};

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Path relative to the output directory, `/`-separated.
    pub path: String,
    pub content: String,
}

/// Header values shared by every generated page.
#[derive(Debug, Clone)]
pub struct PageHeader {
    /// Caller-supplied title. Falls back to `info.title`, then a default.
    pub title: Option<String>,
    pub source_url: String,
    pub generated_at: String,
}

/// Trait for generators that produce reference pages from a document.
pub trait DocGenerator {
    fn generate(
        &self,
        doc: &Document,
        header: &PageHeader,
    ) -> Result<Vec<GeneratedFile>, GenerateError>;
}
