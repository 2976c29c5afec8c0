//! Translation engine for plugscript documents
//!
//! A compilation run is fully in-memory and sequential:
//! 1. Three independent, read-only extraction scans over the raw document
//!    (plugin metadata, commands, events)
//! 2. One pass of the ordered rewrite pipeline over the whole document
//! 3. Re-binding of each command/event to its rewritten body
//!
//! Hard failures (no commands, unreadable input) are returned as
//! [`CompileError`] before anything is written. Everything else is collected
//! as human-readable warnings on the [`Translation`].
pub mod errors;
pub mod extractor;
pub mod naming;
pub mod rewrite;

use plugscript_manifest::{CommandDefinition, EventDefinition, PluginDescriptor};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

pub use errors::CompileError;
pub use extractor::Extractor;
pub use rewrite::{Capabilities, RewriteOutput, RewritePipeline, SymbolTable};

use extractor::Block;

/// Everything the emitter needs from one document
#[derive(Debug, Clone, Serialize)]
pub struct Translation {
    pub plugin: PluginDescriptor,
    /// Commands in source order, bodies already rewritten
    pub commands: Vec<CommandDefinition>,
    /// Events in source order, bodies already rewritten
    pub events: Vec<EventDefinition>,
    pub rewrite: RewriteOutput,
    pub warnings: Vec<String>,
}

impl Translation {
    pub fn capabilities(&self) -> Capabilities {
        self.rewrite.capabilities
    }
}

pub struct Translator {
    extractor: Extractor,
    pipeline: RewritePipeline,
}

impl Translator {
    pub fn new() -> Result<Self, CompileError> {
        Ok(Translator {
            extractor: Extractor::new()?,
            pipeline: RewritePipeline::new()?,
        })
    }

    pub fn compile_file(&self, path: &Path) -> Result<Translation, CompileError> {
        let source = std::fs::read_to_string(path).map_err(|source| CompileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read {} bytes from {}", source.len(), path.display());
        self.compile(&source)
    }

    pub fn compile(&self, source: &str) -> Result<Translation, CompileError> {
        let mut warnings = Vec::new();

        let plugin = self.extractor.extract_metadata(source);
        let commands = match self.extractor.extract_commands(source, &mut warnings) {
            Ok(commands) => commands,
            Err(e) => {
                debug!("Document without commands:\n{}", source);
                return Err(e);
            }
        };
        let events = self.extractor.extract_events(source, &mut warnings);

        let rewrite = self.pipeline.run(source);

        let commands = self.rebind_commands(commands, &rewrite.source);
        let events = self.rebind_events(events, &rewrite.source);

        let commands = first_wins(commands, |c| c.name.clone(), "command", &mut warnings);
        let events = first_wins(events, |e| e.name.clone(), "event", &mut warnings);

        for warning in &warnings {
            debug!("Translation warning: {}", warning);
        }

        Ok(Translation {
            plugin,
            commands,
            events,
            rewrite,
            warnings,
        })
    }

    /// Swap each command body for the rewritten one at the same position
    ///
    /// A position whose name no longer matches keeps its raw body.
    fn rebind_commands(
        &self,
        commands: Vec<CommandDefinition>,
        rewritten: &str,
    ) -> Vec<CommandDefinition> {
        let blocks = rescan(&self.extractor.command_header, rewritten);
        commands
            .into_iter()
            .enumerate()
            .map(|(index, mut command)| {
                match blocks.get(index).filter(|block| block.name == command.name) {
                    Some(block) => {
                        command.body = self.extractor.split_description(&block.body).1;
                    }
                    None => debug!("Keeping raw body for command '{}'", command.name),
                }
                command
            })
            .collect()
    }

    fn rebind_events(&self, events: Vec<EventDefinition>, rewritten: &str) -> Vec<EventDefinition> {
        let blocks = rescan(&self.extractor.event_header, rewritten);
        events
            .into_iter()
            .enumerate()
            .map(|(index, mut event)| {
                match blocks.get(index).filter(|block| block.name == event.name) {
                    Some(block) => event.body.clone_from(&block.body),
                    None => debug!("Keeping raw body for event '{}'", event.name),
                }
                event
            })
            .collect()
    }
}

/// Diagnostics were already reported by the scan of the raw document
fn rescan(header: &regex::Regex, rewritten: &str) -> Vec<Block> {
    let mut ignored = Vec::new();
    Extractor::scan_blocks(header, rewritten, "rewritten", &mut ignored)
}

/// Keep the first definition of every name, warning about the rest
fn first_wins<T>(
    items: Vec<T>,
    name_of: impl Fn(&T) -> String,
    kind: &str,
    warnings: &mut Vec<String>,
) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let name = name_of(item);
            if seen.insert(name.clone()) {
                true
            } else {
                warnings.push(format!(
                    "Duplicate {} '{}' ignored; the first declaration wins",
                    kind, name
                ));
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        match Translator::new() {
            Ok(translator) => translator,
            Err(e) => panic!("patterns failed to compile: {}", e),
        }
    }

    const SCRIPT: &str = r#"
plugin(() => {
    name("Warps");
    version("1.2");
    package("dev.warps");
});

command("setwarp", (sender) => {
    description("Create a warp");
    let warps = data.getArray("warps");
    warps.push(args[0]);
    data.set("warps", warps);
});

command("warps", (sender) => {
    let warps = data.getArray("warps");
    for (let i = 0; i < warps.length; i++) {
        sender.sendMessage(`Warp: ${warps[i]}`);
    }
});

command("setwarp", (sender) => {
    sender.sendMessage("shadowed");
});

event("playerJoin", (event) => {
    let name = event.getPlayer().getName();
    console.log(`${name} joined`);
});
"#;

    #[test]
    fn test_compile_rebinds_rewritten_bodies() {
        let translation = match translator().compile(SCRIPT) {
            Ok(translation) => translation,
            Err(e) => panic!("unexpected error: {}", e),
        };

        assert_eq!(translation.plugin.name, "Warps");
        assert!(translation.plugin.uses_data);

        let names: Vec<&str> = translation.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["setwarp", "warps"]);

        let setwarp = &translation.commands[0];
        assert_eq!(setwarp.description, "Create a warp");
        assert!(!setwarp.body.contains("description("));
        assert!(setwarp.body.contains("List<String> warps = data.getArray(\"warps\");"));
        assert!(setwarp.body.contains("warps.add(args[0]);"));

        let listing = &translation.commands[1];
        assert!(listing.body.contains("for (int i = 0; i < warps.size(); i++) {"));
        assert!(listing.body.contains(r#"sender.sendMessage("Warp: " + (warps.get(i)));"#));

        let join = &translation.events[0];
        assert!(join.body.contains("String name = event.getPlayer().getName();"));
        assert!(join.body.contains(r#"getLogger().info("" + (name) + " joined");"#));

        assert!(translation.capabilities().description);
        assert_eq!(translation.warnings.len(), 1);
        assert!(translation.warnings[0].contains("Duplicate command 'setwarp'"));
    }

    #[test]
    fn test_compile_without_commands_fails() {
        let result = translator().compile("event(\"playerJoin\", (e) => {});");
        assert!(matches!(result, Err(CompileError::NoCommands)));
    }

    #[test]
    fn test_compile_keeps_commands_with_block_comments() {
        let source =
            "command(\"a\", (sender) => {\n    /* don't panic */\n    sender.sendMessage(\"x\");\n});\n";
        let translation = match translator().compile(source) {
            Ok(translation) => translation,
            Err(e) => panic!("unexpected error: {}", e),
        };
        assert_eq!(translation.commands.len(), 1);
        assert!(translation.commands[0].body.contains("sender.sendMessage(\"x\");"));
        assert!(translation.warnings.is_empty());
    }

    #[test]
    fn test_compile_file_reports_missing_input() {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => panic!("tempdir: {}", e),
        };
        let missing = dir.path().join("missing.js");
        let result = translator().compile_file(&missing);
        assert!(matches!(result, Err(CompileError::Read { .. })));
    }

    #[test]
    fn test_compile_file_reads_document() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("hello.js");
        std::fs::write(&path, "command(\"hello\", (sender) => { sender.sendMessage(\"hi\"); });")?;

        let translation = translator().compile_file(&path)?;
        assert_eq!(translation.commands.len(), 1);
        assert_eq!(translation.plugin, PluginDescriptor::default());
        Ok(())
    }
}
