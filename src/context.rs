use std::collections::HashMap;

/// Host-side context handed to every lifecycle hook invocation.
///
/// The engine treats the context as opaque; it exists so hooks can read
/// host-provided settings without the engine prescribing their shape.
#[derive(Clone, Debug, Default)]
pub struct PluginContext {
    properties: HashMap<String, String>,
}

impl PluginContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}
