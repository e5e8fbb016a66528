use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::class::PluginClass;
use crate::descriptor::PluginDescriptor;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Extension class '{class}' already registered under marker '{marker}'")]
    DuplicateClass { marker: String, class: String },
}

/// One activation candidate: an extension class and the descriptor of the
/// bundle it ships in. Several classes may share one descriptor.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub class: Arc<PluginClass>,
    pub descriptor: Arc<PluginDescriptor>,
}

/// Maps extension marker tags to the candidate classes carrying them.
///
/// The scanning that finds marked classes is the host's concern; it feeds
/// its findings in here and hands the candidates to the activator.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    markers: HashMap<String, Vec<Candidate>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        marker: impl Into<String>,
        class: Arc<PluginClass>,
        descriptor: Arc<PluginDescriptor>,
    ) -> Result<(), RegistryError> {
        let marker = marker.into();
        let candidates = self.markers.entry(marker.clone()).or_default();

        if candidates.iter().any(|c| c.class.id() == class.id()) {
            return Err(RegistryError::DuplicateClass {
                marker,
                class: class.id().to_string(),
            });
        }

        debug!(marker = marker.as_str(), class = class.id(), "registered extension candidate");
        candidates.push(Candidate { class, descriptor });
        Ok(())
    }

    /// Candidates under a marker, in registration order. Unknown markers
    /// yield an empty slice.
    pub fn candidates(&self, marker: &str) -> &[Candidate] {
        self.markers.get(marker).map_or(&[], Vec::as_slice)
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.markers.keys().map(String::as_str)
    }

    pub fn candidate_count(&self, marker: &str) -> usize {
        self.candidates(marker).len()
    }
}
