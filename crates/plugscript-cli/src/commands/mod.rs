//! Command handlers

pub mod build;
pub mod check;
pub mod config;
pub mod translate;

use anyhow::{Context, Result};
use plugscript_ast::{Translation, Translator};
use plugscript_logger as logger;
use std::path::Path;

/// Read and translate one document, surfacing its warnings to the user
pub(crate) fn translate_document(file: &Path) -> Result<Translation> {
    let translator = Translator::new().context("Failed to initialize the translator")?;
    let translation = translator
        .compile_file(file)
        .with_context(|| format!("Failed to translate {}", file.display()))?;

    for warning in &translation.warnings {
        logger::warn(warning);
    }
    logger::debug(&format!(
        "Translated {}: {} commands, {} events",
        file.display(),
        translation.commands.len(),
        translation.events.len()
    ));
    Ok(translation)
}
