//! The ordered rewrite rules
//!
//! Each rule maps the whole document to a new document exactly once. Rules
//! that classify identifiers declare the registry they write, and rules that
//! consult a registry declare it in `reads`; every writer of a registry must
//! come before its readers in [`RULES`].

use regex::{Captures, Regex};

use super::raw::{self, escape_template, RAW_INDENT};
use super::symbols::{Registry, RewriteContext};
use crate::naming::{find_matching_brace, reindent};

const IDENT: &str = "[A-Za-z0-9_]+";
const DECL: &str = r"\b(?:let|const|var)\s+";
/// Call arguments with at most one level of nested parentheses
const CALL_ARGS: &str = r"((?:[^()]|\([^()]*\))+)";

/// Method names never treated as JSON property reads
pub const RESERVED_METHODS: &[&str] = &[
    "toLowerCase",
    "toUpperCase",
    "split",
    "equals",
    "substring",
    "toString",
    "isEmpty",
    "size",
    "length",
    "add",
    "push",
    "replaceAll",
    "join",
    "get",
];

/// The command argument array; it stays a `String[]` in the target code
const ARGS_ARRAY: &str = "args";

pub struct RewriteRule {
    pub name: &'static str,
    pub reads: &'static [Registry],
    pub writes: &'static [Registry],
    pub(crate) apply: fn(&Patterns, &str, &mut RewriteContext) -> String,
}

impl std::fmt::Debug for RewriteRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewriteRule")
            .field("name", &self.name)
            .field("reads", &self.reads)
            .field("writes", &self.writes)
            .finish()
    }
}

pub const RULES: &[RewriteRule] = &[
    RewriteRule { name: "detect-network-json", reads: &[], writes: &[], apply: detect_capabilities },
    RewriteRule { name: "logging", reads: &[], writes: &[], apply: rewrite_logging },
    RewriteRule { name: "detect-description", reads: &[], writes: &[], apply: detect_description },
    RewriteRule { name: "template-strings", reads: &[], writes: &[], apply: rewrite_templates },
    RewriteRule { name: "slice-join", reads: &[], writes: &[], apply: rewrite_slice_join },
    RewriteRule {
        name: "data-get-array",
        reads: &[],
        writes: &[Registry::KnownLists],
        apply: rewrite_get_array,
    },
    RewriteRule { name: "server-player-bindings", reads: &[], writes: &[], apply: rewrite_server_player },
    RewriteRule { name: "if-not", reads: &[], writes: &[], apply: rewrite_if_not },
    RewriteRule { name: "lowercase-equality", reads: &[], writes: &[], apply: rewrite_lowercase_equality },
    RewriteRule { name: "push-to-add", reads: &[], writes: &[], apply: rewrite_push },
    RewriteRule { name: "data-set-array", reads: &[], writes: &[], apply: rewrite_data_set_array },
    RewriteRule { name: "split-bindings", reads: &[], writes: &[], apply: rewrite_split },
    RewriteRule {
        name: "list-loops-and-indexing",
        reads: &[Registry::KnownLists],
        writes: &[],
        apply: rewrite_list_access,
    },
    RewriteRule { name: "fetch-bindings", reads: &[], writes: &[], apply: rewrite_fetch },
    RewriteRule {
        name: "json-parse-bindings",
        reads: &[],
        writes: &[Registry::ParsedObjects],
        apply: rewrite_json_parse,
    },
    RewriteRule {
        name: "json-property-access",
        reads: &[Registry::ParsedObjects],
        writes: &[],
        apply: rewrite_property_access,
    },
    RewriteRule { name: "untyped-declarations", reads: &[], writes: &[], apply: rewrite_untyped_decl },
    RewriteRule { name: "empty-array-literals", reads: &[], writes: &[], apply: rewrite_empty_array },
    RewriteRule { name: "length-zero-checks", reads: &[], writes: &[], apply: rewrite_length_zero },
    RewriteRule { name: "raw-blocks", reads: &[], writes: &[], apply: splice_raw_blocks },
];

/// Compiled patterns for every rule
pub struct Patterns {
    pub(crate) raw_block: Regex,
    raw_placeholder: Regex,
    fetch_call: Regex,
    json_parse_call: Regex,
    console: Regex,
    description_call: Regex,
    template: Regex,
    slice_join: Regex,
    get_array: Regex,
    typed_list: Regex,
    get_server: Regex,
    get_player_exact: Regex,
    get_player: Regex,
    if_not: Regex,
    lowercase_equality: Regex,
    push: Regex,
    data_set_array: Regex,
    split: Regex,
    counted_for: Regex,
    bracket: Regex,
    fetch_binding: Regex,
    json_binding: Regex,
    typed_json: Regex,
    property: Regex,
    untyped_decl: Regex,
    empty_array: Regex,
    length_zero: Regex,
}

impl Patterns {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Patterns {
            raw_block: Regex::new(&raw::raw_block_pattern())?,
            raw_placeholder: Regex::new(raw::PLACEHOLDER_PATTERN)?,
            fetch_call: Regex::new(r"\bfetch\(")?,
            json_parse_call: Regex::new(r"\b(?:JSON\.parse|parseJson)\(")?,
            console: Regex::new(r"\bconsole\.(log|error|warn)\(")?,
            description_call: Regex::new(r"\bdescription\(")?,
            template: Regex::new(r"`([^`]*)`")?,
            slice_join: Regex::new(&format!(
                r#"{DECL}({IDENT})\s*=\s*args\.slice\((\d+)\)\.join\("([^"]*)"\);"#
            ))?,
            get_array: Regex::new(&format!(r"{DECL}({IDENT})\s*=\s*data\.getArray\("))?,
            typed_list: Regex::new(&format!(
                r"\bList<String>\s+({IDENT})\s*=\s*data\.getArray\("
            ))?,
            get_server: Regex::new(&format!(
                r"{DECL}({IDENT})\s*=\s*({IDENT})\.getServer\(\s*\);"
            ))?,
            get_player_exact: Regex::new(&format!(
                r"{DECL}({IDENT})\s*=\s*({IDENT})\.getPlayerExact\("
            ))?,
            get_player: Regex::new(&format!(
                r"{DECL}({IDENT})\s*=\s*({IDENT})\.getPlayer\(([^)]*)\);"
            ))?,
            if_not: Regex::new(&format!(r"\bif\s*\(\s*!\s*({IDENT})\s*\)"))?,
            lowercase_equality: Regex::new(&format!(
                r"({IDENT})\.toLowerCase\(\)\s*===?\s*({IDENT})\.toLowerCase\(\)"
            ))?,
            push: Regex::new(r"\.push\(")?,
            data_set_array: Regex::new(r#"\bdata\.set\("([^"]+)"\s*,\s*\[([^\]]+)\]\)"#)?,
            split: Regex::new(&format!(
                r#"{DECL}({IDENT})\s*=\s*({IDENT})\.split\("([^"]+)"\)\s*;"#
            ))?,
            counted_for: Regex::new(&format!(
                r"\bfor\s*\(\s*(?:let|const|var)\s+({IDENT})\s*=\s*(\d+)\s*;\s*({IDENT})\s*<\s*({IDENT})\.length\s*;\s*({IDENT})\+\+\s*\)\s*\{{"
            ))?,
            bracket: Regex::new(&format!(r"({IDENT})\s*\[\s*({IDENT})\s*\]"))?,
            fetch_binding: Regex::new(&format!(r"{DECL}({IDENT})\s*=\s*fetch\({CALL_ARGS}\);?"))?,
            json_binding: Regex::new(&format!(
                r"{DECL}({IDENT})\s*=\s*JSON\.parse\({CALL_ARGS}\);?"
            ))?,
            typed_json: Regex::new(&format!(
                r"\bJSONObject\s+({IDENT})\s*=\s*parseJson\("
            ))?,
            property: Regex::new(&format!(r"({IDENT})\.({IDENT})"))?,
            untyped_decl: Regex::new(DECL)?,
            empty_array: Regex::new(&format!(r"\bString\s+({IDENT})\s*=\s*\[\]\s*;"))?,
            length_zero: Regex::new(&format!(
                r"\bif\s*\(\s*({IDENT})\.length\s*===?\s*0\s*\)"
            ))?,
        })
    }
}

fn group<'a>(caps: &'a Captures, index: usize) -> &'a str {
    caps.get(index).map_or("", |m| m.as_str())
}

// ============ Detection ============

fn detect_capabilities(p: &Patterns, text: &str, ctx: &mut RewriteContext) -> String {
    ctx.capabilities.fetch = p.fetch_call.is_match(text);
    ctx.capabilities.json_parse = p.json_parse_call.is_match(text);
    text.to_string()
}

fn detect_description(p: &Patterns, text: &str, ctx: &mut RewriteContext) -> String {
    ctx.capabilities.description = p.description_call.is_match(text);
    text.to_string()
}

// ============ Expressions ============

fn rewrite_logging(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.console
        .replace_all(text, |caps: &Captures| {
            let level = match group(caps, 1) {
                "error" => "severe",
                "warn" => "warning",
                _ => "info",
            };
            format!("getLogger().{}(", level)
        })
        .into_owned()
}

fn rewrite_templates(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.template
        .replace_all(text, |caps: &Captures| {
            let content = group(caps, 1);
            if !content.contains("${") {
                return group(caps, 0).to_string();
            }
            interpolate(content).unwrap_or_else(|| group(caps, 0).to_string())
        })
        .into_owned()
}

/// `a${x}b${y}c` -> `"a" + (x) + "b" + (y) + "c"`
///
/// An empty trailing literal is not emitted: `a${x}` becomes `"a" + (x)`
/// rather than `"a" + (x) + ""`. Both concatenate to the same Java string.
///
/// Returns `None` when a hole is never closed.
pub(crate) fn interpolate(content: &str) -> Option<String> {
    let mut parts = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let close = find_matching_brace(after)?;
        push_literal(&mut parts, &rest[..start]);
        parts.push(format!("({})", after[..close].trim()));
        rest = &after[close + 1..];
    }
    push_literal(&mut parts, rest);

    Some(parts.join(" + "))
}

/// Empty literal parts are dropped except in front, where one keeps the
/// concatenation string-typed
fn push_literal(parts: &mut Vec<String>, text: &str) {
    if parts.is_empty() || !text.is_empty() {
        parts.push(string_literal(text));
    }
}

/// Quote literal template text as a target string literal
fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    let mut escaped = false;
    for ch in text.chars() {
        match ch {
            '"' if !escaped => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
        escaped = ch == '\\' && !escaped;
    }
    out.push('"');
    out
}

fn rewrite_if_not(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.if_not
        .replace_all(text, |caps: &Captures| {
            let name = group(caps, 1);
            format!("if ({} == null || {}.isEmpty())", name, name)
        })
        .into_owned()
}

fn rewrite_lowercase_equality(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.lowercase_equality
        .replace_all(text, "${1}.toLowerCase().equals(${2}.toLowerCase())")
        .into_owned()
}

fn rewrite_push(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.push.replace_all(text, ".add(").into_owned()
}

fn rewrite_data_set_array(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.data_set_array
        .replace_all(text, |caps: &Captures| {
            let items = group(caps, 2)
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "data.setArray(\"{}\", java.util.List.of({}))",
                group(caps, 1),
                items
            )
        })
        .into_owned()
}

fn rewrite_length_zero(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.length_zero
        .replace_all(text, "if (${1}.isEmpty())")
        .into_owned()
}

// ============ Bindings ============

fn rewrite_slice_join(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.slice_join
        .replace_all(text, |caps: &Captures| {
            format!(
                "String {} = String.join(\"{}\", java.util.Arrays.copyOfRange(args, {}, args.length));",
                group(caps, 1),
                group(caps, 3),
                group(caps, 2)
            )
        })
        .into_owned()
}

/// Register bindings an earlier run already typed
fn register_typed(pattern: &Regex, text: &str, registry: Registry, ctx: &mut RewriteContext) {
    for caps in pattern.captures_iter(text) {
        ctx.symbols.register(registry, group(&caps, 1));
    }
}

fn rewrite_get_array(p: &Patterns, text: &str, ctx: &mut RewriteContext) -> String {
    register_typed(&p.typed_list, text, Registry::KnownLists, ctx);
    p.get_array
        .replace_all(text, |caps: &Captures| {
            let name = group(caps, 1);
            ctx.symbols.register(Registry::KnownLists, name);
            format!("List<String> {} = data.getArray(", name)
        })
        .into_owned()
}

fn rewrite_server_player(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    let text = p
        .get_server
        .replace_all(text, "Server ${1} = ${2}.getServer();")
        .into_owned();
    let text = p
        .get_player_exact
        .replace_all(&text, "Player ${1} = ${2}.getPlayerExact(")
        .into_owned();
    p.get_player
        .replace_all(&text, |caps: &Captures| {
            format!(
                "Player {} = {}.getPlayer({});",
                group(caps, 1),
                group(caps, 2),
                group(caps, 3).trim()
            )
        })
        .into_owned()
}

fn rewrite_split(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.split
        .replace_all(text, "String[] ${1} = ${2}.split(\"${3}\");")
        .into_owned()
}

fn rewrite_fetch(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.fetch_binding
        .replace_all(text, |caps: &Captures| {
            format!("String {} = fetch({});", group(caps, 1), group(caps, 2).trim())
        })
        .into_owned()
}

fn rewrite_json_parse(p: &Patterns, text: &str, ctx: &mut RewriteContext) -> String {
    register_typed(&p.typed_json, text, Registry::ParsedObjects, ctx);
    p.json_binding
        .replace_all(text, |caps: &Captures| {
            let name = group(caps, 1);
            ctx.symbols.register(Registry::ParsedObjects, name);
            format!("JSONObject {} = parseJson({});", name, group(caps, 2).trim())
        })
        .into_owned()
}

fn rewrite_untyped_decl(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.untyped_decl.replace_all(text, "String ").into_owned()
}

fn rewrite_empty_array(p: &Patterns, text: &str, _ctx: &mut RewriteContext) -> String {
    p.empty_array
        .replace_all(text, "List<String> ${1} = new ArrayList<>();")
        .into_owned()
}

// ============ Registry consumers ============

fn rewrite_list_access(p: &Patterns, text: &str, ctx: &mut RewriteContext) -> String {
    let looped = p
        .counted_for
        .replace_all(text, |caps: &Captures| {
            let var = group(caps, 1);
            if group(caps, 3) != var || group(caps, 5) != var {
                return group(caps, 0).to_string();
            }
            let collection = group(caps, 4);
            let bound = if collection == ARGS_ARRAY { "length" } else { "size()" };
            format!(
                "for (int {} = {}; {} < {}.{}; {}++) {{",
                var,
                group(caps, 2),
                var,
                collection,
                bound,
                var
            )
        })
        .into_owned();

    let symbols = &ctx.symbols;
    p.bracket
        .replace_all(&looped, |caps: &Captures| {
            let list = group(caps, 1);
            if symbols.is_list(list) {
                format!("{}.get({})", list, group(caps, 2))
            } else {
                group(caps, 0).to_string()
            }
        })
        .into_owned()
}

fn rewrite_property_access(p: &Patterns, text: &str, ctx: &mut RewriteContext) -> String {
    let symbols = &ctx.symbols;
    p.property
        .replace_all(text, |caps: &Captures| {
            let object = group(caps, 1);
            let property = group(caps, 2);
            if symbols.is_parsed_object(object) && !RESERVED_METHODS.contains(&property) {
                format!("{}.get(\"{}\")", object, property)
            } else {
                group(caps, 0).to_string()
            }
        })
        .into_owned()
}

// ============ Raw regions ============

fn splice_raw_blocks(p: &Patterns, text: &str, ctx: &mut RewriteContext) -> String {
    let mut out = text.to_string();
    for block in &ctx.raw_blocks {
        let escaped = escape_template(&reindent(block, RAW_INDENT));
        out = p.raw_placeholder.replacen(&out, 1, escaped.as_str()).into_owned();
    }
    out
}
