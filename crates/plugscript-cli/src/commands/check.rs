use super::translate_document;
use crate::GlobalOpts;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use plugscript_emit::classes::{command_class_name, event_method_name};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// plugscript document to check
    pub file: PathBuf,

    /// Print the full translation as JSON
    #[arg(long)]
    pub json: bool,
}

/// Translate in memory and print what would be emitted; writes nothing
pub fn handle_check(cmd: CheckCommand, _opts: GlobalOpts) -> Result<()> {
    let translation = translate_document(&cmd.file)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&translation)?);
        return Ok(());
    }

    let plugin = &translation.plugin;
    println!("{}", "Plugin:".bold().green());
    println!("  {}: {}", "name".cyan(), plugin.name);
    println!("  {}: {}", "version".cyan(), plugin.version);
    println!("  {}: {}", "main".cyan(), plugin.main_class());
    if plugin.uses_data {
        println!("  {}: {}", "data-file".cyan(), plugin.data_file);
    }

    println!("{}", "Commands:".bold().green());
    for command in &translation.commands {
        println!(
            "  /{} -> {} ({})",
            command.name.cyan(),
            command_class_name(&command.name),
            command.description
        );
    }

    if !translation.events.is_empty() {
        println!("{}", "Events:".bold().green());
        for event in &translation.events {
            println!(
                "  {} -> {}({})",
                event.name.cyan(),
                event_method_name(&event.name),
                event.event_type.qualified_name()
            );
        }
    }

    let capabilities = translation.capabilities();
    println!("{}", "Capabilities:".bold().green());
    println!("  {}: {}", "fetch".cyan(), capabilities.fetch);
    println!("  {}: {}", "json-parse".cyan(), capabilities.json_parse);
    println!("  {}: {}", "description".cyan(), capabilities.description);

    let symbols = &translation.rewrite.symbols;
    if !symbols.lists.is_empty() || !symbols.parsed_objects.is_empty() {
        println!("{}", "Identifiers:".bold().green());
        for list in &symbols.lists {
            println!("  {} List<String>", list.cyan());
        }
        for object in &symbols.parsed_objects {
            println!("  {} JSONObject", object.cyan());
        }
    }
    Ok(())
}
