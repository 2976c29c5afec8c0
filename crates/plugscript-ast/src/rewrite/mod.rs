//! Rewrite pipeline
//!
//! A fixed, ordered table of whole-document transforms. Each rule runs exactly
//! once and sees the output of every rule before it. Identifier
//! classifications discovered by early rules live in the run's
//! [`RewriteContext`] and are dropped with it, so nothing leaks across runs.
//!
//! Re-running the pipeline on its own output leaves text outside raw regions
//! unchanged: no idiom pattern matches the rewritten forms. Detection also
//! recognizes the rewritten forms (`parseJson(`, typed `List<String>` and
//! `JSONObject` bindings), so the capabilities and registries of a second run
//! match the first. Raw regions are spliced back verbatim and their markers
//! are gone, so a second run rewrites their contents like any other text.

use serde::Serialize;
use tracing::{debug, trace};

use crate::errors::CompileError;

pub mod raw;
pub mod rules;
pub mod symbols;

pub use rules::{RewriteRule, RESERVED_METHODS, RULES};
pub use symbols::{Capabilities, Registry, RewriteContext, SymbolTable};

use rules::Patterns;

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteOutput {
    pub source: String,
    pub capabilities: Capabilities,
    pub symbols: SymbolTable,
}

pub struct RewritePipeline {
    patterns: Patterns,
}

impl RewritePipeline {
    pub fn new() -> Result<Self, CompileError> {
        Ok(RewritePipeline {
            patterns: Patterns::compile()?,
        })
    }

    pub fn run(&self, source: &str) -> RewriteOutput {
        let mut ctx = RewriteContext::default();
        let (mut text, blocks) = raw::lift(&self.patterns.raw_block, source);
        if !blocks.is_empty() {
            debug!("Lifted {} raw block(s)", blocks.len());
        }
        ctx.raw_blocks = blocks;

        for rule in RULES {
            let next = (rule.apply)(&self.patterns, &text, &mut ctx);
            if next != text {
                trace!("Rule '{}' rewrote the document", rule.name);
            }
            text = next;
        }

        debug!(
            "Rewrite done: {} list(s), {} parsed object(s), capabilities {:?}",
            ctx.symbols.lists.len(),
            ctx.symbols.parsed_objects.len(),
            ctx.capabilities
        );

        RewriteOutput {
            source: text,
            capabilities: ctx.capabilities,
            symbols: ctx.symbols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> RewritePipeline {
        match RewritePipeline::new() {
            Ok(pipeline) => pipeline,
            Err(e) => panic!("patterns failed to compile: {}", e),
        }
    }

    fn rewrite(source: &str) -> String {
        pipeline().run(source).source
    }

    #[test]
    fn test_single_hole_template() {
        assert_eq!(rewrite("`a${x}b`"), r#""a" + (x) + "b""#);
        // Empty trailing literal is dropped, the leading one is kept
        assert_eq!(rewrite("`a${x}`"), r#""a" + (x)"#);
        assert_eq!(rewrite("`${x}b`"), r#""" + (x) + "b""#);
    }

    #[test]
    fn test_multi_hole_template() {
        assert_eq!(
            rewrite("sender.sendMessage(`Hi ${name}, you have ${count} coins`);"),
            r#"sender.sendMessage("Hi " + (name) + ", you have " + (count) + " coins");"#
        );
        // Without a hole the literal is untouched
        assert_eq!(rewrite("`plain`"), "`plain`");
    }

    #[test]
    fn test_logging_calls() {
        let out = rewrite("console.log(\"a\"); console.error(e); console.warn(w);");
        assert_eq!(
            out,
            "getLogger().info(\"a\"); getLogger().severe(e); getLogger().warning(w);"
        );
    }

    #[test]
    fn test_known_list_indexing() {
        let out = rewrite(
            "let homes = data.getArray(\"homes\");\nlet first = homes[i];\nlet other = names[i];",
        );
        assert!(out.contains("List<String> homes = data.getArray(\"homes\");"));
        assert!(out.contains("String first = homes.get(i);"));
        assert!(out.contains("String other = names[i];"));
    }

    #[test]
    fn test_counted_loops() {
        let out = rewrite(
            "let warps = data.getArray(\"w\");\nfor (let i = 0; i < warps.length; i++) {\nfor (let j = 1; j < args.length; j++) {",
        );
        assert!(out.contains("for (int i = 0; i < warps.size(); i++) {"));
        assert!(out.contains("for (int j = 1; j < args.length; j++) {"));
    }

    #[test]
    fn test_loop_with_mismatched_variables_is_left_alone() {
        let out = rewrite("for (let i = 0; j < xs.length; i++) {");
        assert_eq!(out, "for (String i = 0; j < xs.length; i++) {");
    }

    #[test]
    fn test_json_property_access() {
        let out = rewrite(
            "let body = fetch(url);\nlet weather = JSON.parse(body);\nlet t = weather.temp;\nlet n = weather.length;",
        );
        assert!(out.contains("String body = fetch(url);"));
        assert!(out.contains("JSONObject weather = parseJson(body);"));
        assert!(out.contains("String t = weather.get(\"temp\");"));
        assert!(out.contains("String n = weather.length;"));
    }

    #[test]
    fn test_capabilities_and_registries() {
        let out = pipeline().run(
            "description(\"x\");\nlet raw = fetch(u);\nlet obj = JSON.parse(raw);\nlet l = data.getArray(\"k\");",
        );
        assert!(out.capabilities.fetch);
        assert!(out.capabilities.json_parse);
        assert!(out.capabilities.description);
        assert!(out.symbols.is_list("l"));
        assert!(out.symbols.is_parsed_object("obj"));

        let plain = pipeline().run("sender.sendMessage(\"hi\");");
        assert_eq!(plain.capabilities, Capabilities::default());
        assert_eq!(plain.symbols, SymbolTable::default());
    }

    #[test]
    fn test_registries_do_not_leak_between_runs() {
        let pipeline = pipeline();
        pipeline.run("let l = data.getArray(\"k\");");
        let second = pipeline.run("let x = l[0];");
        assert_eq!(second.source, "String x = l[0];");
        assert!(second.symbols.lists.is_empty());
    }

    #[test]
    fn test_bindings() {
        let out = rewrite(concat!(
            "let msg = args.slice(1).join(\" \");\n",
            "let server = plugin.getServer();\n",
            "let target = server.getPlayerExact(args[0]);\n",
            "let other = server.getPlayer( name );\n",
            "let parts = msg.split(\",\");\n",
            "let items = [];\n",
        ));
        assert!(out.contains(
            "String msg = String.join(\" \", java.util.Arrays.copyOfRange(args, 1, args.length));"
        ));
        assert!(out.contains("Server server = plugin.getServer();"));
        assert!(out.contains("Player target = server.getPlayerExact(args[0]);"));
        assert!(out.contains("Player other = server.getPlayer(name);"));
        assert!(out.contains("String[] parts = msg.split(\",\");"));
        assert!(out.contains("List<String> items = new ArrayList<>();"));
    }

    #[test]
    fn test_conditions_and_calls() {
        let out = rewrite(concat!(
            "if (!name) { return; }\n",
            "if (a.toLowerCase() === b.toLowerCase()) {}\n",
            "items.push(x);\n",
            "data.set(\"homes\", [a, b ,c]);\n",
            "if (items.length === 0) {}\n",
        ));
        assert!(out.contains("if (name == null || name.isEmpty()) { return; }"));
        assert!(out.contains("if (a.toLowerCase().equals(b.toLowerCase())) {}"));
        assert!(out.contains("items.add(x);"));
        assert!(out.contains("data.setArray(\"homes\", java.util.List.of(a, b, c));"));
        assert!(out.contains("if (items.isEmpty()) {}"));
    }

    #[test]
    fn test_idempotent() {
        let source = concat!(
            "command(\"warp\", (sender) => {\n",
            "  let warps = data.getArray(\"warps\");\n",
            "  for (let i = 0; i < warps.length; i++) {\n",
            "    sender.sendMessage(`Warp ${warps[i]}`);\n",
            "  }\n",
            "  let w = JSON.parse(fetch(url));\n",
            "  let body = fetch(url);\n",
            "  let t = w.temp;\n",
            "  if (!t) { return; }\n",
            "  let list = [];\n",
            "  list.push(t);\n",
            "  if (list.length === 0) { console.warn(\"empty\"); }\n",
            "});\n",
        );
        let pipeline = pipeline();
        let once = pipeline.run(source);
        let twice = pipeline.run(&once.source);
        assert_eq!(once.source, twice.source);
        assert_eq!(once.capabilities, twice.capabilities);
        assert_eq!(once.symbols, twice.symbols);
        assert!(twice.capabilities.json_parse);
        assert!(twice.symbols.is_list("warps"));
        assert!(twice.symbols.is_parsed_object("w"));
    }

    #[test]
    fn test_raw_block_is_preserved() {
        let source = "let a = 1;\n$^\nlet keep = items[0]; // $1 ${x}\n`t${y}`\n^$\nlet b = 2;";
        let out = rewrite(source);
        assert!(out.contains("String a = 1;"));
        assert!(out.contains("String b = 2;"));
        assert!(out.contains("        let keep = items[0]; // $1 ${x}\n        `t${y}`"));
        assert!(!out.contains("$^"));
        assert!(!out.contains("__PLUGSCRIPT_RAW_"));
    }

    #[test]
    fn test_raw_block_is_rewritten_on_second_run() {
        let pipeline = pipeline();
        let once = pipeline.run("$^ if (!done) { list.push(x); } ^$").source;
        assert_eq!(once.trim(), "if (!done) { list.push(x); }");

        let twice = pipeline.run(&once).source;
        assert_eq!(twice.trim(), "if (done == null || done.isEmpty()) { list.add(x); }");
    }

    #[test]
    fn test_rule_order_respects_registry_dependencies() {
        for (reader_index, reader) in RULES.iter().enumerate() {
            for registry in reader.reads {
                let writers: Vec<usize> = RULES
                    .iter()
                    .enumerate()
                    .filter(|(_, rule)| rule.writes.contains(registry))
                    .map(|(index, _)| index)
                    .collect();
                assert!(!writers.is_empty(), "nothing writes {:?}", registry);
                assert!(
                    writers.iter().all(|w| *w < reader_index),
                    "rule '{}' reads {:?} before it is written",
                    reader.name,
                    registry
                );
            }
        }
    }

    #[test]
    fn test_rule_table_order() {
        let names: Vec<&str> = RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(names.len(), 20);
        assert_eq!(names.first(), Some(&"detect-network-json"));
        assert_eq!(names.last(), Some(&"raw-blocks"));
    }
}
