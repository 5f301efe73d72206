use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// Heading used when neither the caller nor `info.title` supplies one.
pub const DEFAULT_TITLE: &str = "OpenAPI reference";

/// Fence language for example labels without a mapping.
pub const FALLBACK_LANGUAGE: &str = "text";

/// Rendering options, optionally loaded from a YAML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub default_title: String,
    /// Map from example label (e.g. `curl`) to code fence language.
    pub example_languages: IndexMap<String, String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        let example_languages = [
            ("curl", "bash"),
            ("python", "python"),
            ("node.js", "javascript"),
            ("javascript", "javascript"),
        ]
        .into_iter()
        .map(|(label, lang)| (label.to_string(), lang.to_string()))
        .collect();

        Self {
            default_title: DEFAULT_TITLE.to_string(),
            example_languages,
        }
    }
}

impl DocsConfig {
    /// Fence language for a request example label.
    pub fn language_for(&self, label: &str) -> &str {
        self.example_languages
            .get(label)
            .map(String::as_str)
            .unwrap_or(FALLBACK_LANGUAGE)
    }
}

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<DocsConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DocsConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}
