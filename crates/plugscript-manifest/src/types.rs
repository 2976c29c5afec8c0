//! Data model shared by the extractors, the rewrite pipeline and the emitter
//!
//! Every value here is built once per compilation run and treated as
//! immutable afterwards, except for command/event bodies which are replaced
//! by their rewritten form before emission.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PLUGIN_NAME: &str = "MyPlugin";
pub const DEFAULT_PLUGIN_VERSION: &str = "1.0";
pub const DEFAULT_PLUGIN_PACKAGE: &str = "me.example.myplugin";
pub const DEFAULT_DATA_FILE: &str = "data.json";
pub const DEFAULT_COMMAND_DESCRIPTION: &str = "A test command.";

/// Name of the generated entry-point class
pub const MAIN_CLASS: &str = "Main";

// =============================================================================
// PLUGIN DESCRIPTOR
// =============================================================================

/// Plugin identity; drives every emitted namespace and path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub version: String,
    pub package: String,
    pub data_file: String,
    /// Whether the document reads or writes persistent data
    #[serde(default)]
    pub uses_data: bool,
}

impl Default for PluginDescriptor {
    fn default() -> Self {
        PluginDescriptor {
            name: DEFAULT_PLUGIN_NAME.to_string(),
            version: DEFAULT_PLUGIN_VERSION.to_string(),
            package: DEFAULT_PLUGIN_PACKAGE.to_string(),
            data_file: DEFAULT_DATA_FILE.to_string(),
            uses_data: false,
        }
    }
}

impl PluginDescriptor {
    /// `me.example.myplugin` -> `me/example/myplugin`
    pub fn package_path(&self) -> String {
        self.package.replace('.', "/")
    }

    /// Fully qualified entry point written to the manifest
    pub fn main_class(&self) -> String {
        format!("{}.{}", self.package, MAIN_CLASS)
    }

    /// File name of the final archive
    pub fn jar_name(&self) -> String {
        format!("{}.jar", self.name)
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// One `command("name", (param) => { ... })` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub param: String,
    /// Raw body after extraction; replaced by the rewritten body before emission
    pub body: String,
}

impl CommandDefinition {
    pub fn usage(&self) -> String {
        format!("/{}", self.name)
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Target event class and its package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub class: String,
    pub package: String,
}

const PLAYER_PACKAGE: &str = "org.bukkit.event.player";
const BLOCK_PACKAGE: &str = "org.bukkit.event.block";
const ENTITY_PACKAGE: &str = "org.bukkit.event.entity";
const GENERIC_PACKAGE: &str = "org.bukkit.event";
const GENERIC_CLASS: &str = "Event";

/// Closed DSL event name -> (class, package) table
const EVENT_TABLE: &[(&str, &str, &str)] = &[
    ("playerJoin", "PlayerJoinEvent", PLAYER_PACKAGE),
    ("playerQuit", "PlayerQuitEvent", PLAYER_PACKAGE),
    ("playerInteract", "PlayerInteractEvent", PLAYER_PACKAGE),
    ("playerMove", "PlayerMoveEvent", PLAYER_PACKAGE),
    ("playerChat", "AsyncPlayerChatEvent", PLAYER_PACKAGE),
    ("playerDeath", "PlayerDeathEvent", ENTITY_PACKAGE),
    ("blockBreak", "BlockBreakEvent", BLOCK_PACKAGE),
    ("blockPlace", "BlockPlaceEvent", BLOCK_PACKAGE),
    ("entityDamage", "EntityDamageEvent", ENTITY_PACKAGE),
    ("entityDeath", "EntityDeathEvent", ENTITY_PACKAGE),
    ("entitySpawn", "EntitySpawnEvent", ENTITY_PACKAGE),
];

impl EventType {
    /// Look up the target type for a DSL event name
    ///
    /// Unknown names degrade to the generic `org.bukkit.event.Event`.
    pub fn for_event(name: &str) -> Self {
        EVENT_TABLE
            .iter()
            .find(|(event, _, _)| *event == name)
            .map(|(_, class, package)| EventType {
                class: (*class).to_string(),
                package: (*package).to_string(),
            })
            .unwrap_or_else(Self::generic)
    }

    pub fn generic() -> Self {
        EventType {
            class: GENERIC_CLASS.to_string(),
            package: GENERIC_PACKAGE.to_string(),
        }
    }

    pub fn is_generic(&self) -> bool {
        self.class == GENERIC_CLASS && self.package == GENERIC_PACKAGE
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.class)
    }

    /// Names the closed table knows about, in table order
    pub fn known_events() -> impl Iterator<Item = &'static str> {
        EVENT_TABLE.iter().map(|(event, _, _)| *event)
    }
}

/// One `event("name", (param) => { ... })` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDefinition {
    pub name: String,
    pub param: String,
    pub body: String,
    pub event_type: EventType,
}
