//! Extension class descriptions.
//!
//! A [`PluginClass`] is the engine's view of one extension type: a qualified
//! id, an explicit no-argument construction path, an optional descriptor
//! binding, and a hook table built once through [`PluginClassBuilder`]. The
//! class is immutable after `build()`; activation only reads it.

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use crate::binder::DescriptorBinding;
use crate::hook::{BoxError, HookDecl, HookRole};
use crate::resolver::ResolveError;

type CachedResolution = OnceLock<Result<Option<HookDecl>, ResolveError>>;

#[derive(Debug, thiserror::Error)]
pub enum ClassError {
    #[error("Extension class '{class}' has no registered constructor")]
    MissingConstructor { class: String },

    #[error("Invalid extension class id '{class}': {reason}")]
    InvalidId { class: String, reason: String },
}

type ErasedFactory = Box<dyn Fn() -> Result<Box<dyn Any + Send>, BoxError> + Send + Sync>;

pub struct PluginClass {
    id: String,
    factory: ErasedFactory,
    hooks: Vec<HookDecl>,
    binding: Option<DescriptorBinding>,
    // One slot per role. Living on the class, the cache can never outlive
    // it or be observed by a different class reusing the same id.
    resolution: [CachedResolution; 2],
}

impl PluginClass {
    pub fn builder(id: impl Into<String>) -> PluginClassBuilder {
        PluginClassBuilder {
            id: id.into(),
            factory: None,
            hooks: Vec::new(),
            binding: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The full hook table, in declaration order.
    pub fn hooks(&self) -> &[HookDecl] {
        &self.hooks
    }

    pub fn hooks_for(&self, role: HookRole) -> impl Iterator<Item = &HookDecl> {
        self.hooks.iter().filter(move |hook| hook.role() == role)
    }

    pub fn is_descriptor_aware(&self) -> bool {
        self.binding.is_some()
    }

    pub(crate) fn binding(&self) -> Option<&DescriptorBinding> {
        self.binding.as_ref()
    }

    pub(crate) fn resolution_cache(&self, role: HookRole) -> &CachedResolution {
        &self.resolution[role.index()]
    }

    pub(crate) fn construct(&self) -> Result<Box<dyn Any + Send>, BoxError> {
        (self.factory)()
    }
}

impl fmt::Debug for PluginClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginClass")
            .field("id", &self.id)
            .field("hooks", &self.hooks)
            .field("descriptor_aware", &self.binding.is_some())
            .finish_non_exhaustive()
    }
}

/// Builds the per-type registration table the engine activates from.
///
/// ```
/// use exthost::PluginClass;
///
/// #[derive(Default)]
/// struct Notifier;
///
/// let class = PluginClass::builder("com.example.Notifier")
///     .construct_default::<Notifier>()
///     .load_hook("on_load", |_n: &mut Notifier, _ctx| Ok(()))
///     .build()
///     .unwrap();
/// assert_eq!(class.id(), "com.example.Notifier");
/// ```
pub struct PluginClassBuilder {
    id: String,
    factory: Option<ErasedFactory>,
    hooks: Vec<HookDecl>,
    binding: Option<DescriptorBinding>,
}

impl PluginClassBuilder {
    /// Registers the explicit no-argument construction path.
    pub fn construct_with<T, F>(mut self, factory: F) -> Self
    where
        T: Any + Send,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.factory = Some(Box::new(move || {
            factory().map(|instance| Box::new(instance) as Box<dyn Any + Send>)
        }));
        self
    }

    /// Shorthand for types constructible via `Default`.
    pub fn construct_default<T>(self) -> Self
    where
        T: Any + Send + Default,
    {
        self.construct_with(|| Ok(T::default()))
    }

    pub fn load_hook<T, F>(self, name: impl Into<String>, hook: F) -> Self
    where
        T: Any + Send,
        F: Fn(&mut T, &crate::context::PluginContext) -> Result<(), BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.hook(HookRole::Load, name, hook)
    }

    pub fn unload_hook<T, F>(self, name: impl Into<String>, hook: F) -> Self
    where
        T: Any + Send,
        F: Fn(&mut T, &crate::context::PluginContext) -> Result<(), BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.hook(HookRole::Unload, name, hook)
    }

    /// Adds a hook declaration for `role`. Cardinality is not enforced here;
    /// the resolver rejects duplicate roles when the class is activated.
    pub fn hook<T, F>(mut self, role: HookRole, name: impl Into<String>, hook: F) -> Self
    where
        T: Any + Send,
        F: Fn(&mut T, &crate::context::PluginContext) -> Result<(), BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.hooks.push(HookDecl::new::<T, F>(role, name, hook));
        self
    }

    /// Declares the "accepts descriptor" capability. At most one binding is
    /// kept; a later call replaces an earlier one.
    pub fn bind_descriptor<T, F>(mut self, bind: F) -> Self
    where
        T: Any + Send,
        F: Fn(&mut T, &crate::descriptor::PluginDescriptor) -> Result<(), BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.binding = Some(DescriptorBinding::new::<T, F>(bind));
        self
    }

    pub fn build(self) -> Result<PluginClass, ClassError> {
        if self.id.is_empty() || self.id.chars().any(char::is_whitespace) {
            return Err(ClassError::InvalidId {
                class: self.id,
                reason: "must be non-empty and contain no whitespace".to_string(),
            });
        }
        let factory = self.factory.ok_or(ClassError::MissingConstructor {
            class: self.id.clone(),
        })?;
        Ok(PluginClass {
            id: self.id,
            factory,
            hooks: self.hooks,
            binding: self.binding,
            resolution: Default::default(),
        })
    }
}
