pub mod group;
pub mod index;
pub mod views;

use apiref_core::GenerateError;
use minijinja::Environment;

/// Directory, relative to the output root, holding one page per group.
pub const GROUPS_DIR: &str = "groups";

/// Output path of a group page, e.g. `groups/chat.md`.
pub fn group_page_path(slug: &str) -> String {
    format!("{GROUPS_DIR}/{slug}.md")
}

/// Build an environment holding a single template.
///
/// Block tags swallow their own line so the templates can be laid out one
/// statement per line without leaking blank lines into the output.
fn environment(name: &'static str, source: &'static str) -> Result<Environment<'static>, GenerateError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(name, source).map_err(template_error)?;
    Ok(env)
}

fn template_error(err: minijinja::Error) -> GenerateError {
    GenerateError::Template(err.to_string())
}
