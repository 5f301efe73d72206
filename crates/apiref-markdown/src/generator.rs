use apiref_core::config::DocsConfig;
use apiref_core::extract::extract_operations;
use apiref_core::group::group_operations;
use apiref_core::{DocGenerator, Document, GenerateError, GeneratedFile, PageHeader};

use crate::emitters;
use crate::emitters::index::PageContext;

/// Path of the index page relative to the output directory.
pub const INDEX_PATH: &str = "index.md";

/// Markdown reference generator: `index.md` plus one page per group.
#[derive(Debug, Clone, Default)]
pub struct MarkdownGenerator {
    config: DocsConfig,
}

impl MarkdownGenerator {
    pub fn new(config: DocsConfig) -> Self {
        Self { config }
    }

    /// Caller title, then `info.title`, then the configured default.
    pub fn resolve_title(&self, doc: &Document, header: &PageHeader) -> String {
        header
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| doc.title())
            .unwrap_or_else(|| self.config.default_title.clone())
    }
}

impl DocGenerator for MarkdownGenerator {
    fn generate(
        &self,
        doc: &Document,
        header: &PageHeader,
    ) -> Result<Vec<GeneratedFile>, GenerateError> {
        let title = self.resolve_title(doc, header);
        let page = PageContext {
            title: &title,
            source_url: &header.source_url,
            generated_at: &header.generated_at,
        };

        let groups = group_operations(extract_operations(doc));
        log::debug!("rendering {} groups", groups.len());

        let openapi = doc.openapi_version();
        let version = doc.info_version();
        let mut files = vec![GeneratedFile {
            path: INDEX_PATH.to_string(),
            content: emitters::index::emit_index(
                &page,
                openapi.as_deref(),
                version.as_deref(),
                &groups,
            )?,
        }];

        for group in &groups {
            files.push(GeneratedFile {
                path: emitters::group_page_path(&group.slug),
                content: emitters::group::emit_group(doc, &page, group, &self.config)?,
            });
        }

        Ok(files)
    }
}
