use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project-level import defaults loaded from `.restbench.yaml`. Command
/// line flags always win over these.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Base URL used instead of the document's first server entry.
    pub base_url: Option<String>,

    /// Create one folder per distinct operation tag.
    pub folders_from_tags: bool,

    /// Default output path for converted collections.
    pub output: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            folders_from_tags: true,
            output: None,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".restbench.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ImportConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ImportConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# restbench import configuration
# base_url: https://staging.example.com   # override the document's first server
folders_from_tags: true                   # one folder per distinct operation tag
# output: collection.json                 # default path for converted collections
"#
}
