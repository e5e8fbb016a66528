//! Lifecycle hook resolution.
//!
//! Resolution is a pure lookup over a class's hook table: zero or one hook
//! per role is valid, two or more is a configuration error. Selection is by
//! role alone; what the hook returns when invoked is not a constraint here.

use tracing::debug;

use crate::class::PluginClass;
use crate::hook::{HookDecl, HookRole};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    #[error("Extension class '{class}' declares multiple {role} hooks {hooks:?}; at most one is allowed")]
    AmbiguousHook {
        class: String,
        role: HookRole,
        hooks: Vec<String>,
    },
}

/// Resolves hooks by role.
///
/// The outcome is cached on the class itself, filled at most once per role.
/// Two classes never share a cache entry, even when one reuses the other's
/// id after deactivation; each carries its own slots.
pub struct HookResolver;

impl HookResolver {
    pub fn resolve(class: &PluginClass, role: HookRole) -> Result<Option<HookDecl>, ResolveError> {
        class
            .resolution_cache(role)
            .get_or_init(|| {
                let resolved = Self::lookup(class, role);
                if let Ok(hook) = &resolved {
                    debug!(
                        class = class.id(),
                        %role,
                        hook = hook.as_ref().map(HookDecl::name),
                        "resolved lifecycle hook"
                    );
                }
                resolved
            })
            .clone()
    }

    /// Uncached lookup over the class's hook table.
    pub fn lookup(class: &PluginClass, role: HookRole) -> Result<Option<HookDecl>, ResolveError> {
        let mut matches = class.hooks_for(role);

        let Some(first) = matches.next() else {
            return Ok(None);
        };

        let extra: Vec<String> = matches.map(|hook| hook.name().to_string()).collect();
        if !extra.is_empty() {
            let mut hooks = vec![first.name().to_string()];
            hooks.extend(extra);
            return Err(ResolveError::AmbiguousHook {
                class: class.id().to_string(),
                role,
                hooks,
            });
        }

        Ok(Some(first.clone()))
    }
}
