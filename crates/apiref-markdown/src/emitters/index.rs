use apiref_core::GenerateError;
use apiref_core::group::OperationGroup;
use minijinja::context;
use serde::Serialize;

use super::{environment, group_page_path, template_error};

/// Header lines shared by every page.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub source_url: &'a str,
    pub generated_at: &'a str,
}

#[derive(Debug, Serialize)]
struct GroupLink {
    title: String,
    link: String,
    count: usize,
}

/// Emit `index.md` — title, provenance lines, and one link per group.
///
/// `openapi` and `version` are printed only when present.
pub fn emit_index(
    page: &PageContext<'_>,
    openapi: Option<&str>,
    version: Option<&str>,
    groups: &[OperationGroup<'_>],
) -> Result<String, GenerateError> {
    let env = environment("index.md.j2", include_str!("../../templates/index.md.j2"))?;
    let tmpl = env.get_template("index.md.j2").map_err(template_error)?;

    let mut metadata = Vec::new();
    if let Some(openapi) = openapi {
        metadata.push(format!("OpenAPI: {openapi}"));
    }
    if let Some(version) = version {
        metadata.push(format!("Version: {version}"));
    }

    let groups: Vec<GroupLink> = groups
        .iter()
        .map(|g| GroupLink {
            title: g.title.clone(),
            link: group_page_path(&g.slug),
            count: g.operations.len(),
        })
        .collect();

    tmpl.render(context! {
        title => page.title,
        source_url => page.source_url,
        generated_at => page.generated_at,
        metadata => metadata,
        groups => groups,
    })
    .map_err(template_error)
}
