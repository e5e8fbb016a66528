use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::class::PluginClass;
use crate::descriptor::PluginDescriptor;
use crate::hook::HookDecl;

/// One live extension instance, owned by the engine's active set.
///
/// The unload hook is resolved at activation and carried on the instance, so
/// deactivation never re-scans the class table.
pub struct PluginInstance {
    class: Arc<PluginClass>,
    descriptor: Arc<PluginDescriptor>,
    state: Box<dyn Any + Send>,
    unload: Option<HookDecl>,
}

impl PluginInstance {
    pub(crate) fn new(
        class: Arc<PluginClass>,
        descriptor: Arc<PluginDescriptor>,
        state: Box<dyn Any + Send>,
        unload: Option<HookDecl>,
    ) -> Self {
        Self {
            class,
            descriptor,
            state,
            unload,
        }
    }

    pub fn class_id(&self) -> &str {
        self.class.id()
    }

    pub fn class(&self) -> &Arc<PluginClass> {
        &self.class
    }

    pub fn descriptor(&self) -> &Arc<PluginDescriptor> {
        &self.descriptor
    }

    /// The instance state, downcastable to the concrete extension type.
    pub fn state(&self) -> &(dyn Any + Send) {
        self.state.as_ref()
    }

    pub(crate) fn state_mut(&mut self) -> &mut (dyn Any + Send) {
        self.state.as_mut()
    }

    pub(crate) fn take_unload(&mut self) -> Option<HookDecl> {
        self.unload.take()
    }
}

impl fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginInstance")
            .field("class", &self.class.id())
            .field("descriptor", &self.descriptor.id())
            .field("unload", &self.unload.as_ref().map(HookDecl::name))
            .finish_non_exhaustive()
    }
}

/// Instances currently active, keyed by class id, in activation order.
///
/// Mutated only through the activator/deactivator pair behind `&mut self`;
/// the single-writer discipline is the borrow checker's job, not a lock's.
#[derive(Default)]
pub(crate) struct ActiveSet {
    entries: HashMap<String, PluginInstance>,
    order: Vec<String>,
}

impl ActiveSet {
    pub(crate) fn contains(&self, class_id: &str) -> bool {
        self.entries.contains_key(class_id)
    }

    pub(crate) fn get(&self, class_id: &str) -> Option<&PluginInstance> {
        self.entries.get(class_id)
    }

    /// Inserts and returns a shared reference to the stored instance.
    /// The caller must have checked for an existing entry first.
    pub(crate) fn insert(&mut self, instance: PluginInstance) -> &PluginInstance {
        let class_id = instance.class_id().to_string();
        self.order.push(class_id.clone());
        self.entries.entry(class_id).or_insert(instance)
    }

    pub(crate) fn take(&mut self, class_id: &str) -> Option<PluginInstance> {
        let instance = self.entries.remove(class_id)?;
        self.order.retain(|id| id != class_id);
        Some(instance)
    }

    /// Class ids in activation order.
    pub(crate) fn ids(&self) -> Vec<String> {
        self.order.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
