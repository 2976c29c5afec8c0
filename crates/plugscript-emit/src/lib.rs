//! Code emitter for translated plugscript documents
//!
//! Turns a [`Translation`] into the files of a Bukkit plugin source tree:
//! - `plugin.yml` at the root
//! - `<package path>/Main.java`, the plugin entry point holding command
//!   dispatch, event handlers and capability helpers
//! - `<package path>/<Command>.java`, one standalone executor per command
//!
//! Emission is pure; [`writer::write_bundle`] puts the result on disk.
pub mod classes;
pub mod errors;
pub mod java;
mod templates;
pub mod writer;

use plugscript_ast::Translation;
use plugscript_manifest::manifest_writer::MANIFEST_FILE_NAME;
use plugscript_manifest::{render_plugin_yml, MAIN_CLASS};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use errors::EmitError;
pub use writer::{write_bundle, WriteFailure, WriteReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    /// Path relative to the output directory
    pub relative_path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmittedBundle {
    pub files: Vec<EmittedFile>,
    pub warnings: Vec<String>,
}

impl EmittedBundle {
    pub fn get(&self, relative_path: impl AsRef<Path>) -> Option<&EmittedFile> {
        let relative_path = relative_path.as_ref();
        self.files.iter().find(|file| file.relative_path == relative_path)
    }
}

/// Assemble the manifest and every Java source for a translation
pub fn emit(translation: &Translation) -> Result<EmittedBundle, EmitError> {
    let plugin = &translation.plugin;
    let mut bundle = EmittedBundle::default();

    bundle.files.push(EmittedFile {
        relative_path: PathBuf::from(MANIFEST_FILE_NAME),
        contents: render_plugin_yml(plugin, &translation.commands)?,
    });

    let main = classes::main_class(translation);
    bundle.files.push(EmittedFile {
        relative_path: PathBuf::from(main.relative_path()),
        contents: main.render(),
    });

    let mut class_names = HashSet::from([MAIN_CLASS.to_string()]);
    for command in &translation.commands {
        let class_name = classes::command_class_name(&command.name);
        if !class_names.insert(class_name.clone()) {
            let message = format!(
                "Command '{}' maps to class {} which is already taken; skipping its class file",
                command.name, class_name
            );
            debug!("{}", message);
            bundle.warnings.push(message);
            continue;
        }

        let file = classes::command_class(plugin, command);
        bundle.files.push(EmittedFile {
            relative_path: PathBuf::from(file.relative_path()),
            contents: file.render(),
        });
    }

    debug!("Emitted {} files for {}", bundle.files.len(), plugin.name);
    Ok(bundle)
}
