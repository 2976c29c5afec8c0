use plugscript_manifest::{PluginDescriptor, DEFAULT_DATA_FILE};
use tracing::debug;

use super::Extractor;

impl Extractor {
    /// Derive the plugin descriptor from the declaration idioms
    ///
    /// The `plugin(() => { name(..); version(..); package(..); })` triplet must
    /// appear in exactly that order; otherwise the fixed defaults are used.
    /// The data-file name is only read when persistent data is used at all.
    pub fn extract_metadata(&self, text: &str) -> PluginDescriptor {
        let mut descriptor = PluginDescriptor {
            uses_data: self.data_usage.is_match(text),
            ..Default::default()
        };

        if descriptor.uses_data {
            descriptor.data_file = self
                .data_file
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
        }

        if let Some(caps) = self.plugin_decl.captures(text) {
            if let (Some(name), Some(version), Some(package)) = (caps.get(1), caps.get(2), caps.get(3)) {
                descriptor.name = name.as_str().to_string();
                descriptor.version = version.as_str().to_string();
                descriptor.package = package.as_str().to_string();
            }
        } else {
            debug!("No plugin declaration found, using defaults");
        }

        debug!(
            "Plugin metadata: {} {} ({}), data: {}",
            descriptor.name, descriptor.version, descriptor.package, descriptor.uses_data
        );
        descriptor
    }
}
