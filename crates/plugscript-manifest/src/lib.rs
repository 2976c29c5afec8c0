//! plugscript data model and manifest rendering
//!
//! This crate holds the types produced by extraction (plugin descriptor,
//! command and event definitions, the closed event table) and renders the
//! `plugin.yml` descriptor the target server reads at load time.

pub mod errors;
pub mod manifest_writer;
pub mod types;

pub use errors::ManifestError;
pub use manifest_writer::{render_plugin_yml, CommandEntry, PluginYml};
pub use types::{
    CommandDefinition, EventDefinition, EventType, PluginDescriptor, DEFAULT_COMMAND_DESCRIPTION,
    DEFAULT_DATA_FILE, DEFAULT_PLUGIN_NAME, DEFAULT_PLUGIN_PACKAGE, DEFAULT_PLUGIN_VERSION,
    MAIN_CLASS,
};
