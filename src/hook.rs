//! Lifecycle hook declarations.
//!
//! A hook declaration is one entry in a plugin class's registration table:
//! a role, a name, and a type-erased callback over the instance state.
//! Hooks report failure as an error value; the engine never sees a panic
//! boundary here, only `Result`s.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::context::PluginContext;

/// Boxed error used for causes originating inside plugin code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Lifecycle points a plugin can hook into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookRole {
    /// Invoked once, right after construction and descriptor binding.
    Load,

    /// Invoked at most once, during deactivation.
    Unload,
}

impl HookRole {
    pub fn all() -> &'static [HookRole] {
        &[HookRole::Load, HookRole::Unload]
    }

    pub(crate) fn index(self) -> usize {
        match self {
            HookRole::Load => 0,
            HookRole::Unload => 1,
        }
    }
}

impl fmt::Display for HookRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookRole::Load => write!(f, "load"),
            HookRole::Unload => write!(f, "unload"),
        }
    }
}

/// A hook was invoked against instance state of a different extension type.
///
/// This happens when a class registers a hook for a type other than the one
/// its factory constructs; the mismatch surfaces as the hook's failure cause.
#[derive(Debug, thiserror::Error)]
#[error("hook '{hook}' expects a different extension type than the instance provides")]
pub struct InstanceTypeMismatch {
    pub hook: String,
}

type ErasedHookFn =
    dyn Fn(&mut (dyn Any + Send), &PluginContext) -> Result<(), BoxError> + Send + Sync;

/// One resolved-invocable entry in a class's hook table.
#[derive(Clone)]
pub struct HookDecl {
    name: String,
    role: HookRole,
    invoke: Arc<ErasedHookFn>,
}

impl HookDecl {
    pub(crate) fn new<T, F>(role: HookRole, name: impl Into<String>, hook: F) -> Self
    where
        T: Any + Send,
        F: Fn(&mut T, &PluginContext) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let name = name.into();
        let hook_name = name.clone();
        Self {
            name,
            role,
            invoke: Arc::new(move |instance, ctx| {
                let typed = instance.downcast_mut::<T>().ok_or_else(|| {
                    Box::new(InstanceTypeMismatch {
                        hook: hook_name.clone(),
                    }) as BoxError
                })?;
                hook(typed, ctx)
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> HookRole {
        self.role
    }

    pub(crate) fn invoke(
        &self,
        instance: &mut (dyn Any + Send),
        ctx: &PluginContext,
    ) -> Result<(), BoxError> {
        (self.invoke)(instance, ctx)
    }
}

impl fmt::Debug for HookDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookDecl")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        calls: u32,
    }

    #[test]
    fn test_role_display() {
        assert_eq!(HookRole::Load.to_string(), "load");
        assert_eq!(HookRole::Unload.to_string(), "unload");
        assert_eq!(HookRole::all().len(), 2);
    }

    #[test]
    fn test_invoke_dispatches_to_typed_hook() {
        let decl = HookDecl::new::<Probe, _>(HookRole::Load, "on_load", |probe, _ctx| {
            probe.calls += 1;
            Ok(())
        });

        let mut instance: Box<dyn Any + Send> = Box::new(Probe::default());
        let ctx = PluginContext::new();
        decl.invoke(instance.as_mut(), &ctx).unwrap();
        decl.invoke(instance.as_mut(), &ctx).unwrap();

        let probe = instance.downcast_ref::<Probe>().unwrap();
        assert_eq!(probe.calls, 2);
    }

    #[test]
    fn test_invoke_reads_context() {
        let decl = HookDecl::new::<Probe, _>(HookRole::Load, "on_load", |_probe, ctx| {
            assert_eq!(ctx.property("key"), Some("value"));
            Ok(())
        });

        let mut instance: Box<dyn Any + Send> = Box::new(Probe::default());
        let ctx = PluginContext::new().with_property("key", "value");
        decl.invoke(instance.as_mut(), &ctx).unwrap();
    }

    #[test]
    fn test_invoke_propagates_hook_failure() {
        let decl = HookDecl::new::<Probe, _>(HookRole::Unload, "tear_down", |_probe, _ctx| {
            Err(std::io::Error::other("teardown failure").into())
        });

        let mut instance: Box<dyn Any + Send> = Box::new(Probe::default());
        let err = decl
            .invoke(instance.as_mut(), &PluginContext::new())
            .unwrap_err();
        assert!(err.to_string().contains("teardown failure"));
    }

    #[test]
    fn test_invoke_wrong_instance_type() {
        let decl = HookDecl::new::<Probe, _>(HookRole::Load, "on_load", |_probe, _ctx| Ok(()));

        let mut instance: Box<dyn Any + Send> = Box::new(42u64);
        let err = decl
            .invoke(instance.as_mut(), &PluginContext::new())
            .unwrap_err();
        assert!(err.downcast_ref::<InstanceTypeMismatch>().is_some());
    }
}
