use super::translate::{emit_to_disk, load_config};
use super::translate_document;
use crate::build_driver::{BuildDriver, Stage};
use crate::GlobalOpts;
use anyhow::Result;
use clap::Args;
use plugscript_logger as logger;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args, Debug, Clone)]
pub struct BuildCommand {
    /// plugscript document to build
    pub file: PathBuf,

    /// Output directory (default: `output-dir` from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Server API jar placed on the compile classpath
    #[arg(long)]
    pub server_jar: Option<PathBuf>,

    /// json-simple jar, added to the classpath when data or JSON parsing is used
    #[arg(long)]
    pub json_jar: Option<PathBuf>,

    /// Stop after writing sources; skip javac and jar
    #[arg(long)]
    pub no_package: bool,
}

/// Translate, emit, compile, clean up and package one document
///
/// Only translation failures abort the run. Write, compile and archive
/// failures are logged and the run still reports its elapsed time.
pub fn handle_build(cmd: BuildCommand, _opts: GlobalOpts) -> Result<()> {
    let start = Instant::now();
    let config = load_config();
    let out_dir = cmd.output.unwrap_or_else(|| config.output_dir());

    logger::progress_start();
    Stage::Translate.report();
    let translation = match translate_document(&cmd.file) {
        Ok(translation) => translation,
        Err(e) => {
            logger::progress_finish();
            return Err(e);
        }
    };

    let report = emit_to_disk(&translation, &out_dir)?;
    let mut clean = report.is_clean();

    if cmd.no_package {
        logger::debug("Skipping compile and package steps");
    } else {
        let driver = BuildDriver::new(
            &config,
            &out_dir,
            cmd.server_jar.unwrap_or_else(|| config.server_jar()),
            cmd.json_jar.unwrap_or_else(|| config.json_jar()),
        );
        let plugin = &translation.plugin;
        let needs_json = plugin.uses_data || translation.capabilities().json_parse;

        Stage::Compile.report();
        clean &= driver.compile(plugin, needs_json).is_success();

        Stage::Cleanup.report();
        let removed = driver.delete_sources();
        logger::debug(&format!("Removed {} Java source files", removed));

        Stage::Package.report();
        clean &= driver.package(plugin).is_success();
    }

    logger::progress_finish();
    if !clean {
        logger::warn("Build finished with errors; the output may be incomplete");
    }
    logger::success(&format!(
        "Finished in {}",
        logger::format_elapsed(start.elapsed())
    ));
    Ok(())
}
