//! Prelude module for convenient imports.
//!
//! Re-exports the types a plugin host touches in almost every interaction
//! with the engine.
//!
//! # Usage
//!
//! ```rust
//! use exthost::prelude::*;
//! ```

// Engine
pub use crate::ActivationError;
pub use crate::DeactivationReport;
pub use crate::PluginActivator;

// Class descriptions
pub use crate::BoxError;
pub use crate::ClassError;
pub use crate::HookRole;
pub use crate::PluginClass;
pub use crate::PluginClassBuilder;

// Metadata
pub use crate::PluginContext;
pub use crate::PluginDescriptor;
pub use crate::PluginManifest;

// Discovery and registration
pub use crate::BundleDiscovery;
pub use crate::Candidate;
pub use crate::ExtensionRegistry;
