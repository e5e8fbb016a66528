//! Plugin activation.
//!
//! `PluginActivator` drives the activation pipeline and owns the active set.
//! Every failure is contained to the plugin that produced it: one failed
//! activation never aborts the others, which is the engine's defining
//! guarantee. Deactivation lives in [`crate::deactivator`] on the same type.

use std::sync::Arc;

use tracing::{info, warn};

use crate::class::PluginClass;
use crate::context::PluginContext;
use crate::descriptor::PluginDescriptor;
use crate::hook::{BoxError, HookRole};
use crate::instance::{ActiveSet, PluginInstance};
use crate::registry::Candidate;
use crate::resolver::{HookResolver, ResolveError};

#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    #[error("Extension '{class}' is already active")]
    AlreadyActive { class: String },

    #[error(transparent)]
    AmbiguousHook(#[from] ResolveError),

    #[error("Failed to construct extension '{class}'")]
    ConstructionFailed {
        class: String,
        #[source]
        cause: BoxError,
    },

    #[error("Failed to bind descriptor for extension '{class}'")]
    BindFailed {
        class: String,
        #[source]
        cause: BoxError,
    },

    #[error("Load hook '{hook}' failed for extension '{class}'")]
    LoadFailed {
        class: String,
        hook: String,
        #[source]
        cause: BoxError,
    },
}

/// Activates extension classes and tracks the live instances.
///
/// The same value handles deactivation; the original framework's activator
/// covers both ends of the bundle lifecycle and so does this one.
#[derive(Default)]
pub struct PluginActivator {
    context: PluginContext,
    pub(crate) active: ActiveSet,
}

impl PluginActivator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: PluginContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    pub fn context(&self) -> &PluginContext {
        &self.context
    }

    /// Activates one extension class: resolve hooks, construct, bind the
    /// descriptor, run the load hook, register.
    ///
    /// Both roles are resolved before anything is constructed, so a class
    /// with a duplicated load *or* unload hook fails fast with nothing
    /// instantiated. A load-hook failure rolls the instance back: it is
    /// dropped unregistered and its unload hook is never attempted.
    pub fn activate(
        &mut self,
        class: &Arc<PluginClass>,
        descriptor: &Arc<PluginDescriptor>,
    ) -> Result<&PluginInstance, ActivationError> {
        if self.active.contains(class.id()) {
            return Err(ActivationError::AlreadyActive {
                class: class.id().to_string(),
            });
        }

        let load = HookResolver::resolve(class, HookRole::Load)?;
        let unload = HookResolver::resolve(class, HookRole::Unload)?;

        let mut state = class
            .construct()
            .map_err(|cause| ActivationError::ConstructionFailed {
                class: class.id().to_string(),
                cause,
            })?;

        if let Some(binding) = class.binding() {
            binding.bind(state.as_mut(), descriptor).map_err(|cause| {
                ActivationError::BindFailed {
                    class: class.id().to_string(),
                    cause,
                }
            })?;
        }

        if let Some(hook) = &load {
            hook.invoke(state.as_mut(), &self.context)
                .map_err(|cause| ActivationError::LoadFailed {
                    class: class.id().to_string(),
                    hook: hook.name().to_string(),
                    cause,
                })?;
        }

        info!(
            class = class.id(),
            plugin = descriptor.id(),
            load_hook = load.as_ref().map(|h| h.name()),
            "activated extension"
        );

        let instance = PluginInstance::new(
            Arc::clone(class),
            Arc::clone(descriptor),
            state,
            unload,
        );
        Ok(self.active.insert(instance))
    }

    /// Activates every candidate, isolating failures per plugin.
    ///
    /// Returns one outcome per candidate, in input order. A failure is
    /// logged and reported but never stops the remaining activations.
    pub fn activate_all<'a, I>(
        &mut self,
        candidates: I,
    ) -> Vec<(String, Result<(), ActivationError>)>
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        candidates
            .into_iter()
            .map(|candidate| {
                let class_id = candidate.class.id().to_string();
                let outcome = self
                    .activate(&candidate.class, &candidate.descriptor)
                    .map(|_| ());
                if let Err(err) = &outcome {
                    warn!(
                        class = class_id.as_str(),
                        plugin = candidate.descriptor.id(),
                        error = %err,
                        "extension activation failed; continuing with remaining candidates"
                    );
                }
                (class_id, outcome)
            })
            .collect()
    }

    pub fn is_active(&self, class_id: &str) -> bool {
        self.active.contains(class_id)
    }

    pub fn active(&self, class_id: &str) -> Option<&PluginInstance> {
        self.active.get(class_id)
    }

    /// Active class ids, in activation order.
    pub fn active_ids(&self) -> Vec<String> {
        self.active.ids()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
