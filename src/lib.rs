//! # exthost
//!
//! A plugin activation engine: hosts describe their extension classes with
//! explicit factories and lifecycle hook tables, and the engine instantiates
//! them, injects descriptor metadata, invokes load/unload hooks, and isolates
//! failures so one misbehaving plugin cannot take down the host or its
//! neighbours.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use exthost::{PluginActivator, PluginClass, PluginDescriptor, PluginManifest};
//!
//! #[derive(Default)]
//! struct Notifier {
//!     ready: bool,
//! }
//!
//! let class = Arc::new(
//!     PluginClass::builder("com.example.Notifier")
//!         .construct_default::<Notifier>()
//!         .load_hook("on_load", |n: &mut Notifier, _ctx| {
//!             n.ready = true;
//!             Ok(())
//!         })
//!         .unload_hook("on_unload", |n: &mut Notifier, _ctx| {
//!             n.ready = false;
//!             Ok(())
//!         })
//!         .build()
//!         .expect("valid class"),
//! );
//! let descriptor = Arc::new(PluginDescriptor::new(
//!     PluginManifest::new("com.example.notifier", "1.0.0"),
//!     PathBuf::from("/bundles/notifier"),
//! ));
//!
//! let mut activator = PluginActivator::new();
//! activator.activate(&class, &descriptor).expect("activation");
//! assert!(activator.is_active("com.example.Notifier"));
//!
//! let report = activator.deactivate("com.example.Notifier");
//! assert!(!report.is_failure());
//! ```
//!
//! A plugin whose unload hook fails is still removed from the active set, and
//! a faulty plugin in a batch never prevents the others from activating or
//! deactivating; see [`PluginActivator::activate_all`] and
//! [`PluginActivator::deactivate_all`].

#![deny(rustdoc::broken_intra_doc_links)]

pub mod activator;
pub mod binder;
pub mod class;
pub mod context;
pub mod deactivator;
pub mod descriptor;
pub mod discovery;
pub mod hook;
pub mod instance;
pub mod prelude;
pub mod registry;
pub mod resolver;

// Re-exports for convenience
pub use activator::{ActivationError, PluginActivator};
pub use class::{ClassError, PluginClass, PluginClassBuilder};
pub use context::PluginContext;
pub use deactivator::DeactivationReport;
pub use descriptor::{DescriptorError, PluginDescriptor, PluginManifest};
pub use discovery::BundleDiscovery;
pub use hook::{BoxError, HookDecl, HookRole};
pub use instance::PluginInstance;
pub use registry::{Candidate, ExtensionRegistry, RegistryError};
pub use resolver::{HookResolver, ResolveError};
