//! Run-scoped state threaded through the rewrite rules

use serde::Serialize;
use std::collections::BTreeSet;

/// Identifier classifications a rule may read or write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
    /// Bindings known to hold a `List<String>`
    KnownLists,
    /// Bindings known to hold a parsed `JSONObject`
    ParsedObjects,
}

/// Identifier registries populated by early rules and consumed by later ones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolTable {
    pub lists: BTreeSet<String>,
    pub parsed_objects: BTreeSet<String>,
}

impl SymbolTable {
    pub fn register(&mut self, registry: Registry, ident: &str) {
        let set = match registry {
            Registry::KnownLists => &mut self.lists,
            Registry::ParsedObjects => &mut self.parsed_objects,
        };
        set.insert(ident.to_string());
    }

    pub fn contains(&self, registry: Registry, ident: &str) -> bool {
        match registry {
            Registry::KnownLists => self.lists.contains(ident),
            Registry::ParsedObjects => self.parsed_objects.contains(ident),
        }
    }

    pub fn is_list(&self, ident: &str) -> bool {
        self.contains(Registry::KnownLists, ident)
    }

    pub fn is_parsed_object(&self, ident: &str) -> bool {
        self.contains(Registry::ParsedObjects, ident)
    }
}

/// Capability flags gating conditional helpers and imports in the emitter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub fetch: bool,
    pub json_parse: bool,
    pub description: bool,
}

/// Mutable state for one pipeline run
#[derive(Debug, Default)]
pub struct RewriteContext {
    pub symbols: SymbolTable,
    pub capabilities: Capabilities,
    /// Raw-escape regions lifted out before the first rule, in source order
    pub raw_blocks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registries_are_independent() {
        let mut symbols = SymbolTable::default();
        symbols.register(Registry::KnownLists, "warps");
        symbols.register(Registry::ParsedObjects, "weather");

        assert!(symbols.is_list("warps"));
        assert!(!symbols.is_parsed_object("warps"));
        assert!(symbols.is_parsed_object("weather"));
        assert!(!symbols.is_list("weather"));
    }
}
