use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub(crate) const MANIFEST_FILE: &str = "plugin.json";

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("Plugin manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    #[error("Invalid plugin manifest at {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The serialized identity of a plugin bundle, read from `plugin.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    pub id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl PluginManifest {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            description: None,
            author: None,
        }
    }

    pub fn load(bundle_dir: &Path) -> Result<Self, DescriptorError> {
        let manifest_path = bundle_dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(DescriptorError::ManifestNotFound {
                path: manifest_path,
            });
        }
        let content = std::fs::read_to_string(&manifest_path)?;
        serde_json::from_str(&content).map_err(|e| DescriptorError::InvalidManifest {
            path: manifest_path,
            reason: e.to_string(),
        })
    }
}

/// Identity metadata for one plugin bundle: id, version, bundle location.
///
/// Shared read-only across the engine; instances that declare descriptor
/// awareness get a reference to it during binding, never ownership.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    manifest: PluginManifest,
    bundle_location: PathBuf,
}

impl PluginDescriptor {
    pub fn new(manifest: PluginManifest, bundle_location: PathBuf) -> Self {
        Self {
            manifest,
            bundle_location,
        }
    }

    /// Reads the manifest from `bundle_dir/plugin.json`.
    pub fn load(bundle_dir: &Path) -> Result<Self, DescriptorError> {
        let manifest = PluginManifest::load(bundle_dir)?;
        Ok(Self::new(manifest, bundle_dir.to_path_buf()))
    }

    pub fn id(&self) -> &str {
        &self.manifest.id
    }

    pub fn version(&self) -> &str {
        &self.manifest.version
    }

    pub fn description(&self) -> Option<&str> {
        self.manifest.description.as_deref()
    }

    pub fn bundle_location(&self) -> &Path {
        &self.bundle_location
    }
}
