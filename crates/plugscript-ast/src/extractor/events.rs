use plugscript_manifest::{EventDefinition, EventType};
use tracing::debug;

use super::Extractor;

impl Extractor {
    /// Find every event declaration, in source order
    ///
    /// Names outside the closed event table map to the generic event type and
    /// are reported in `warnings`; they never fail the run.
    pub fn extract_events(&self, text: &str, warnings: &mut Vec<String>) -> Vec<EventDefinition> {
        Self::scan_blocks(&self.event_header, text, "event", warnings)
            .into_iter()
            .map(|block| {
                let event_type = EventType::for_event(&block.name);
                if event_type.is_generic() {
                    let known: Vec<&str> = EventType::known_events().collect();
                    warnings.push(format!(
                        "Unknown event '{}', falling back to {} (known events: {})",
                        block.name,
                        event_type.qualified_name(),
                        known.join(", ")
                    ));
                }
                debug!("Extracted event '{}' -> {}", block.name, event_type.qualified_name());
                EventDefinition {
                    name: block.name,
                    param: block.param,
                    body: block.body,
                    event_type,
                }
            })
            .collect()
    }
}
