use super::translate_document;
use crate::build_driver::Stage;
use crate::GlobalOpts;
use anyhow::Result;
use clap::Args;
use plugscript_ast::Translation;
use plugscript_config::Config;
use plugscript_emit::{emit, write_bundle, WriteReport};
use plugscript_logger as logger;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone)]
pub struct TranslateCommand {
    /// plugscript document to translate
    pub file: PathBuf,

    /// Output directory (default: `output-dir` from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn handle_translate(cmd: TranslateCommand, _opts: GlobalOpts) -> Result<()> {
    let config = load_config();
    let out_dir = cmd.output.unwrap_or_else(|| config.output_dir());

    let translation = translate_document(&cmd.file)?;
    let report = emit_to_disk(&translation, &out_dir)?;

    logger::success(&format!(
        "Wrote {} files for {} to {}",
        report.written.len(),
        translation.plugin.name,
        out_dir.display()
    ));
    Ok(())
}

/// Configuration problems never stop a run; defaults are used instead
pub(crate) fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        logger::warn(&format!("Failed to load config, using defaults: {}", e));
        Config::default()
    })
}

/// Emit the bundle and write it, logging every per-file failure
pub(crate) fn emit_to_disk(translation: &Translation, out_dir: &Path) -> Result<WriteReport> {
    Stage::Manifest.report();
    let bundle = emit(translation)?;
    for warning in &bundle.warnings {
        logger::warn(warning);
    }

    Stage::Sources.report();
    let report = write_bundle(&bundle, out_dir);
    for failure in &report.failed {
        logger::error(&format!(
            "Error saving {}: {}",
            failure.path.display(),
            failure.error
        ));
    }
    Ok(report)
}
