//! plugin.yml rendering
//!
//! The manifest names the plugin, its entry point and one command-table entry
//! per declared command, in declaration order.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::errors::ManifestError;
use crate::types::{CommandDefinition, PluginDescriptor};

pub const MANIFEST_FILE_NAME: &str = "plugin.yml";

/// One entry of the `commands:` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub description: String,
    pub usage: String,
}

/// In-memory form of plugin.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginYml {
    pub name: String,
    pub version: String,
    pub main: String,
    /// Kept as a YAML mapping so declaration order survives serialization
    #[serde(default)]
    pub commands: Mapping,
}

impl PluginYml {
    pub fn new(plugin: &PluginDescriptor, commands: &[CommandDefinition]) -> Result<Self, ManifestError> {
        let mut table = Mapping::new();
        for command in commands {
            let entry = CommandEntry {
                description: command.description.clone(),
                usage: command.usage(),
            };
            table.insert(
                Value::String(command.name.clone()),
                serde_yaml::to_value(entry)?,
            );
        }

        Ok(PluginYml {
            name: plugin.name.clone(),
            version: plugin.version.clone(),
            main: plugin.main_class(),
            commands: table,
        })
    }
}

/// Render plugin.yml text for a plugin and its commands
pub fn render_plugin_yml(
    plugin: &PluginDescriptor,
    commands: &[CommandDefinition],
) -> Result<String, ManifestError> {
    let manifest = PluginYml::new(plugin, commands)?;
    debug!(
        "Rendering plugin.yml for {} with {} commands",
        manifest.name,
        manifest.commands.len()
    );
    Ok(serde_yaml::to_string(&manifest)?)
}

#[cfg(test)]
mod tests {
    use crate::manifest_writer::*;
    use crate::types::DEFAULT_COMMAND_DESCRIPTION;

    fn command(name: &str, description: &str) -> CommandDefinition {
        CommandDefinition {
            name: name.to_string(),
            description: description.to_string(),
            param: "sender".to_string(),
            body: String::new(),
        }
    }

    fn descriptor() -> PluginDescriptor {
        PluginDescriptor {
            name: "Greeter".to_string(),
            version: "2.1".to_string(),
            package: "dev.example.greeter".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_plugin_yml() -> Result<(), ManifestError> {
        let yaml = render_plugin_yml(
            &descriptor(),
            &[
                command("hello", "Say hello"),
                command("bye", DEFAULT_COMMAND_DESCRIPTION),
            ],
        )?;

        assert!(yaml.contains("name: Greeter"));
        assert!(yaml.contains("main: dev.example.greeter.Main"));
        assert!(yaml.contains("description: Say hello"));
        assert!(yaml.contains("usage: /hello"));
        assert!(yaml.contains("usage: /bye"));

        // Declaration order is preserved
        let hello = yaml.find("hello:").unwrap_or(usize::MAX);
        let bye = yaml.find("bye:").unwrap_or(0);
        assert!(hello < bye);
        Ok(())
    }

    #[test]
    fn test_version_stays_a_string() -> Result<(), ManifestError> {
        let yaml = render_plugin_yml(&descriptor(), &[command("hello", "Say hello")])?;
        let parsed: PluginYml = serde_yaml::from_str(&yaml)?;
        assert_eq!(parsed.version, "2.1");
        Ok(())
    }

    #[test]
    fn test_command_table_parses_back() -> Result<(), ManifestError> {
        let yaml = render_plugin_yml(
            &descriptor(),
            &[command("hello", "Say hello"), command("spawn", "Teleport")],
        )?;
        let parsed: PluginYml = serde_yaml::from_str(&yaml)?;

        let names: Vec<&str> = parsed.commands.keys().filter_map(Value::as_str).collect();
        assert_eq!(names, vec!["hello", "spawn"]);

        let spawn: CommandEntry = match parsed.commands.get("spawn") {
            Some(value) => serde_yaml::from_value(value.clone())?,
            None => panic!("spawn missing from the command table"),
        };
        assert_eq!(
            spawn,
            CommandEntry {
                description: "Teleport".to_string(),
                usage: "/spawn".to_string(),
            }
        );
        Ok(())
    }
}
