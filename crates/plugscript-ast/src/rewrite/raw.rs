//! Raw-escape regions (`$^ ... ^$`)
//!
//! Regions between the markers are target-language code. They are swapped for
//! inert placeholders before the first rule runs and spliced back by the last
//! rule, so no other rule ever sees their contents.

use regex::{Captures, Regex};

pub const RAW_OPEN: &str = "$^";
pub const RAW_CLOSE: &str = "^$";

/// Indentation applied to every line of a spliced region
pub const RAW_INDENT: &str = "        ";

pub(crate) const PLACEHOLDER_PATTERN: &str = r"__PLUGSCRIPT_RAW_(\d+)__";

/// Lazily matches one region between [`RAW_OPEN`] and [`RAW_CLOSE`]
pub(crate) fn raw_block_pattern() -> String {
    format!(
        "(?s){}(.*?){}",
        regex::escape(RAW_OPEN),
        regex::escape(RAW_CLOSE)
    )
}

pub(crate) fn placeholder(index: usize) -> String {
    format!("__PLUGSCRIPT_RAW_{}__", index)
}

/// Replace every raw region with a numbered placeholder
pub(crate) fn lift(pattern: &Regex, text: &str) -> (String, Vec<String>) {
    let mut blocks = Vec::new();
    let lifted = pattern
        .replace_all(text, |caps: &Captures| {
            let index = blocks.len();
            blocks.push(caps.get(1).map_or("", |m| m.as_str()).to_string());
            placeholder(index)
        })
        .into_owned();
    (lifted, blocks)
}

/// Escape `$` so the text survives replacement-string expansion verbatim
pub fn escape_template(text: &str) -> String {
    text.replace('$', "$$")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_numbers_blocks_in_order() -> Result<(), regex::Error> {
        let pattern = Regex::new(&raw_block_pattern())?;
        let (lifted, blocks) = lift(&pattern, "a $^ one(); ^$ b $^two\nlines^$ c");

        assert_eq!(lifted, "a __PLUGSCRIPT_RAW_0__ b __PLUGSCRIPT_RAW_1__ c");
        assert_eq!(blocks, vec![" one(); ".to_string(), "two\nlines".to_string()]);
        Ok(())
    }

    #[test]
    fn test_escaped_text_expands_back_verbatim() -> Result<(), regex::Error> {
        let raw = r#"String s = "$" + "\n"; // ${not.a.group}"#;
        let marker = Regex::new(PLACEHOLDER_PATTERN)?;
        let escaped = escape_template(raw);
        let spliced = marker.replacen("x __PLUGSCRIPT_RAW_0__ y", 1, escaped.as_str());
        assert_eq!(spliced, format!("x {} y", raw));
        Ok(())
    }
}
