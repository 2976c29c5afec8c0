//! Build driver: compile emitted sources with `javac` and archive with `jar`
//!
//! Every step is a soft failure. A missing tool or a nonzero exit status is
//! logged and reported as a [`StepOutcome`]; the run always continues to the
//! next step and to the final elapsed-time report.

use plugscript_config::Config;
use plugscript_logger as logger;
use plugscript_manifest::{PluginDescriptor, MAIN_CLASS};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

#[cfg(windows)]
const CLASSPATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const CLASSPATH_SEPARATOR: &str = ":";

/// Named stages of a full build and their position on the progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Translate,
    Manifest,
    Sources,
    Compile,
    Cleanup,
    Package,
}

impl Stage {
    pub fn fraction(self) -> f64 {
        match self {
            Stage::Translate => 0.1,
            Stage::Manifest => 0.4,
            Stage::Sources => 0.6,
            Stage::Compile => 0.8,
            Stage::Cleanup => 0.9,
            Stage::Package => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Translate => "Translating script",
            Stage::Manifest => "Generating plugin.yml",
            Stage::Sources => "Generating Java sources",
            Stage::Compile => "Compiling Java files",
            Stage::Cleanup => "Removing Java sources",
            Stage::Package => "Creating jar",
        }
    }

    pub fn report(self) {
        logger::progress_update(self.fraction(), self.label());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed(String),
    Skipped(String),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Succeeded)
    }
}

pub struct BuildDriver {
    out_dir: PathBuf,
    server_jar: PathBuf,
    json_jar: PathBuf,
    javac: Result<PathBuf, String>,
    jar: Result<PathBuf, String>,
}

impl BuildDriver {
    pub fn new(config: &Config, out_dir: &Path, server_jar: PathBuf, json_jar: PathBuf) -> Self {
        BuildDriver {
            out_dir: out_dir.to_path_buf(),
            server_jar,
            json_jar,
            javac: config.javac().map_err(|e| e.to_string()),
            jar: config.jar().map_err(|e| e.to_string()),
        }
    }

    /// `<out>:<server jar>[:<json jar>]`
    pub fn classpath(&self, needs_json: bool) -> OsString {
        let mut classpath = OsString::from(self.out_dir.as_os_str());
        classpath.push(CLASSPATH_SEPARATOR);
        classpath.push(self.server_jar.as_os_str());
        if needs_json {
            classpath.push(CLASSPATH_SEPARATOR);
            classpath.push(self.json_jar.as_os_str());
        }
        classpath
    }

    pub fn main_source(&self, plugin: &PluginDescriptor) -> PathBuf {
        self.out_dir
            .join(plugin.package_path())
            .join(format!("{}.java", MAIN_CLASS))
    }

    pub fn jar_path(&self, plugin: &PluginDescriptor) -> PathBuf {
        self.out_dir.join(plugin.jar_name())
    }

    pub fn compile_args(&self, plugin: &PluginDescriptor, needs_json: bool) -> Vec<OsString> {
        vec![
            OsString::from("-verbose"),
            OsString::from("-d"),
            OsString::from(self.out_dir.as_os_str()),
            OsString::from("-cp"),
            self.classpath(needs_json),
            OsString::from(self.main_source(plugin).as_os_str()),
        ]
    }

    pub fn package_args(&self, plugin: &PluginDescriptor) -> Vec<OsString> {
        vec![
            OsString::from("cf"),
            OsString::from(self.jar_path(plugin).as_os_str()),
            OsString::from("-C"),
            OsString::from(self.out_dir.as_os_str()),
            OsString::from("."),
        ]
    }

    /// Compile the entry-point source; every output line is logged
    pub fn compile(&self, plugin: &PluginDescriptor, needs_json: bool) -> StepOutcome {
        let javac = match &self.javac {
            Ok(path) => path,
            Err(e) => return fail(format!("Cannot compile: {}", e)),
        };
        logger::debug(&format!("Running {}", javac.display()));

        match Command::new(javac).args(self.compile_args(plugin, needs_json)).output() {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                for line in stdout.lines().chain(stderr.lines()) {
                    logger::info(&format!("Compilation: {}", line));
                }
                if output.status.success() {
                    StepOutcome::Succeeded
                } else {
                    logger::show_log_path();
                    fail(format!("javac exited with {}", output.status))
                }
            }
            Err(e) => fail(format!("Error running javac: {}", e)),
        }
    }

    /// Delete every `.java` file under the output directory
    ///
    /// Returns the number of files removed; individual failures are logged.
    pub fn delete_sources(&self) -> usize {
        let mut removed = 0;
        for entry in WalkDir::new(&self.out_dir).into_iter().filter_map(Result::ok) {
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "java") {
                continue;
            }
            match fs::remove_file(path) {
                Ok(()) => {
                    logger::step(&format!("Deleted {}", path.display()));
                    removed += 1;
                }
                Err(e) => logger::warn(&format!("Failed to delete {}: {}", path.display(), e)),
            }
        }
        removed
    }

    /// Archive the output directory into `<out>/<Name>.jar`
    pub fn package(&self, plugin: &PluginDescriptor) -> StepOutcome {
        if !self.out_dir.is_dir() {
            let reason = format!("Output directory {} does not exist", self.out_dir.display());
            logger::warn(&reason);
            return StepOutcome::Skipped(reason);
        }
        let jar = match &self.jar {
            Ok(path) => path,
            Err(e) => return fail(format!("Cannot package: {}", e)),
        };

        match Command::new(jar).args(self.package_args(plugin)).status() {
            Ok(status) if status.success() => {
                logger::success(&format!("JAR created at {}", self.jar_path(plugin).display()));
                StepOutcome::Succeeded
            }
            Ok(status) => fail(format!("jar exited with {}", status)),
            Err(e) => fail(format!("Error running jar: {}", e)),
        }
    }
}

fn fail(message: String) -> StepOutcome {
    logger::error(&message);
    StepOutcome::Failed(message)
}
