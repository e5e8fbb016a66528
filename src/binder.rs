//! Descriptor binding capability.
//!
//! A class that declares awareness of its descriptor gets the shared
//! [`PluginDescriptor`] injected exactly once per instance, after
//! construction and before the load hook runs.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::PluginDescriptor;
use crate::hook::{BoxError, InstanceTypeMismatch};

type ErasedBindFn =
    dyn Fn(&mut (dyn Any + Send), &PluginDescriptor) -> Result<(), BoxError> + Send + Sync;

/// Type-erased "accepts descriptor" binding registered on a plugin class.
#[derive(Clone)]
pub struct DescriptorBinding {
    invoke: Arc<ErasedBindFn>,
}

impl DescriptorBinding {
    pub(crate) fn new<T, F>(bind: F) -> Self
    where
        T: Any + Send,
        F: Fn(&mut T, &PluginDescriptor) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self {
            invoke: Arc::new(move |instance, descriptor| {
                let typed = instance.downcast_mut::<T>().ok_or_else(|| {
                    Box::new(InstanceTypeMismatch {
                        hook: "descriptor binding".to_string(),
                    }) as BoxError
                })?;
                bind(typed, descriptor)
            }),
        }
    }

    pub(crate) fn bind(
        &self,
        instance: &mut (dyn Any + Send),
        descriptor: &PluginDescriptor,
    ) -> Result<(), BoxError> {
        (self.invoke)(instance, descriptor)
    }
}

impl fmt::Debug for DescriptorBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorBinding").finish_non_exhaustive()
    }
}
