use thiserror::Error;

/// Errors that can occur while rendering a plugin.yml manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to serialize manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
