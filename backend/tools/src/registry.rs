use std::collections::HashMap;
use std::sync::Arc;

use salamgate_core::{Tool, ToolSpec};

/// Registry of tools, looked up by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Build the specs advertised to the model for the given names.
    /// Unknown names are silently skipped.
    pub fn resolve(&self, names: &[String]) -> Vec<ToolSpec> {
        names
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| ToolSpec::of(tool.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::WeatherTool;

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(WeatherTool));
        assert!(registry.get("get_weather").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_resolve_skips_unknown_names() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(WeatherTool));
        let specs = registry.resolve(&["get_weather".into(), "missing".into()]);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "get_weather");
        assert!(specs[0].parameters["properties"]["location"].is_object());
    }
}
