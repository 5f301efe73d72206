use apiref_core::config::DocsConfig;
use apiref_core::group::OperationGroup;
use apiref_core::{Document, GenerateError};
use minijinja::context;

use super::index::PageContext;
use super::views::OperationView;
use super::{environment, template_error};

/// Emit `groups/<slug>.md` — one section per operation in the group.
pub fn emit_group(
    doc: &Document,
    page: &PageContext<'_>,
    group: &OperationGroup<'_>,
    config: &DocsConfig,
) -> Result<String, GenerateError> {
    let env = environment("group.md.j2", include_str!("../../templates/group.md.j2"))?;
    let tmpl = env.get_template("group.md.j2").map_err(template_error)?;

    let operations: Vec<OperationView> = group
        .operations
        .iter()
        .map(|record| OperationView::build(doc, record, config))
        .collect();

    tmpl.render(context! {
        title => group.title,
        source_url => page.source_url,
        generated_at => page.generated_at,
        operations => operations,
    })
    .map_err(template_error)
}
