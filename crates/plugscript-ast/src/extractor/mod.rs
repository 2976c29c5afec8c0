//! Declaration extractors
//!
//! Three independent, read-only scans over the raw document:
//! - plugin metadata (name/version/package, persistent-data usage)
//! - `command("name", (param) => { ... })` blocks
//! - `event("name", (param) => { ... })` blocks
//!
//! Block bodies are captured by brace matching from the opening `{` of the
//! arrow function, so nested blocks inside a body are kept intact.

use regex::Regex;
use tracing::debug;

use crate::errors::CompileError;
use crate::naming::find_matching_brace;

mod commands;
mod events;
mod metadata;


/// Key of the `data.set(...)` call that names the persistent-data file
pub const DATA_FILE_KEY: &str = "nombre";

/// A declaration header plus the body captured after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    pub name: String,
    pub param: String,
    pub body: String,
}

pub struct Extractor {
    pub(crate) data_usage: Regex,
    pub(crate) data_file: Regex,
    pub(crate) plugin_decl: Regex,
    pub(crate) command_header: Regex,
    pub(crate) event_header: Regex,
    pub(crate) description: Regex,
}

impl Extractor {
    pub fn new() -> Result<Self, CompileError> {
        debug!("Compiling extractor patterns");

        Ok(Extractor {
            data_usage: Regex::new(r"\bdata\.(?:set|get|setArray|getArray|getString)\(")?,
            data_file: Regex::new(&format!(
                r#"\bdata\.set\("{}",\s*"([^"]+)"\);"#,
                DATA_FILE_KEY
            ))?,
            plugin_decl: Regex::new(concat!(
                r#"\bplugin\(\(\)\s*=>\s*\{\s*name\("([^"]+)"\);"#,
                r#"\s*version\("([^"]+)"\);"#,
                r#"\s*package\("([^"]+)"\);"#,
            ))?,
            command_header: Regex::new(
                r#"\bcommand\(\s*"([^"]+)"\s*,\s*\(\s*([A-Za-z_][A-Za-z0-9_]*)\s*\)\s*=>\s*\{"#,
            )?,
            event_header: Regex::new(r#"\bevent\(\s*"([^"]+)"\s*,\s*\(([^)]+)\)\s*=>\s*\{"#)?,
            description: Regex::new(r#"\bdescription\("([^"]+)"\);?"#)?,
        })
    }

    /// Scan every `header` match and capture the block body that follows it
    ///
    /// Headers that start inside an already captured body are skipped. An
    /// unterminated body is reported in `warnings` and ends the scan.
    pub(crate) fn scan_blocks(
        header: &Regex,
        text: &str,
        kind: &str,
        warnings: &mut Vec<String>,
    ) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut resume_at = 0;

        for caps in header.captures_iter(text) {
            let (Some(whole), Some(name), Some(param)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if whole.start() < resume_at {
                continue;
            }

            let body_start = whole.end();
            let Some(close) = find_matching_brace(&text[body_start..]) else {
                warnings.push(format!(
                    "{} '{}' has no closing brace; ignoring it and everything after it",
                    kind,
                    name.as_str()
                ));
                break;
            };

            let body_end = body_start + close;
            blocks.push(Block {
                name: name.as_str().to_string(),
                param: param.as_str().trim().to_string(),
                body: text[body_start..body_end].to_string(),
            });
            resume_at = body_end + 1;
        }

        debug!("Found {} {} blocks", blocks.len(), kind);
        blocks
    }
}
