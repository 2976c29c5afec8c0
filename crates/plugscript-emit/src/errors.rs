use plugscript_manifest::ManifestError;
use thiserror::Error;

/// Failures that prevent a bundle from being assembled at all
///
/// Per-file write failures are not errors; see [`crate::writer::WriteReport`].
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to render plugin.yml: {0}")]
    Manifest(#[from] ManifestError),
}
