//! Resolution of the external Java build tools (`javac`, `jar`)

use crate::ConfigError;
use std::path::{Path, PathBuf};
use which::which;

/// Resolve an executable by configured path or by searching `PATH`
///
/// A configured value that points at an existing file is used as-is. Any
/// other configured value is looked up on `PATH`, and without one the
/// tool's default name is.
pub fn resolve_tool(name: &str, configured: Option<&str>) -> Result<PathBuf, ConfigError> {
    let candidate = configured.map(str::trim).filter(|c| !c.is_empty());

    if let Some(path) = candidate {
        if Path::new(path).is_file() {
            return Ok(PathBuf::from(path));
        }
    }

    let lookup = candidate.unwrap_or(name);
    which(lookup).map_err(|e| ConfigError::ToolNotFound {
        name: name.to_string(),
        reason: format!("{} (looked up '{}')", e, lookup),
    })
}
