use plugscript_manifest::{CommandDefinition, DEFAULT_COMMAND_DESCRIPTION};
use tracing::debug;

use super::Extractor;
use crate::errors::CompileError;

impl Extractor {
    /// Find every command declaration, in source order
    ///
    /// A `description("...")` call inside a body supplies the command
    /// description and is removed from the body. Zero commands is fatal.
    pub fn extract_commands(
        &self,
        text: &str,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<CommandDefinition>, CompileError> {
        let blocks = Self::scan_blocks(&self.command_header, text, "command", warnings);
        if blocks.is_empty() {
            return Err(CompileError::NoCommands);
        }

        let commands = blocks
            .into_iter()
            .map(|block| {
                let (description, body) = self.split_description(&block.body);
                debug!("Extracted command '{}' ({})", block.name, description);
                CommandDefinition {
                    name: block.name,
                    description,
                    param: block.param,
                    body,
                }
            })
            .collect();

        Ok(commands)
    }

    /// Pull the first description call out of a command body
    pub(crate) fn split_description(&self, body: &str) -> (String, String) {
        match self.description.captures(body) {
            Some(caps) => {
                let description = caps
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| DEFAULT_COMMAND_DESCRIPTION.to_string());
                let stripped = self.description.replacen(body, 1, "").into_owned();
                (description, stripped)
            }
            None => (DEFAULT_COMMAND_DESCRIPTION.to_string(), body.to_string()),
        }
    }
}
