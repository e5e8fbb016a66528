//! Plugin deactivation.
//!
//! Teardown is unconditional: the instance leaves the active set before its
//! unload hook runs, so a hook that fails (or was never declared) can never
//! leave the engine believing the plugin is still active. Hook failures are
//! captured in the report and logged, never propagated.

use std::fmt;

use tracing::{debug, info, warn};

use crate::activator::PluginActivator;
use crate::hook::BoxError;

/// Outcome of one deactivation.
#[derive(Debug)]
pub enum DeactivationReport {
    /// The class id was not in the active set. Deactivating an inactive
    /// instance is a signalled no-op, not an error.
    NotActive,

    /// The instance declared no unload hook; it was simply removed.
    NoOp,

    /// The unload hook ran and succeeded.
    Success { hook: String },

    /// The unload hook failed. The instance is removed regardless.
    UnloadFailed { hook: String, cause: BoxError },
}

impl DeactivationReport {
    pub fn is_failure(&self) -> bool {
        matches!(self, DeactivationReport::UnloadFailed { .. })
    }
}

impl fmt::Display for DeactivationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeactivationReport::NotActive => write!(f, "not active"),
            DeactivationReport::NoOp => write!(f, "no unload hook"),
            DeactivationReport::Success { hook } => write!(f, "unload hook '{hook}' succeeded"),
            DeactivationReport::UnloadFailed { hook, cause } => {
                write!(f, "unload hook '{hook}' failed: {cause}")
            }
        }
    }
}

impl PluginActivator {
    /// Deactivates one instance by class id.
    ///
    /// The unload hook resolved at activation is invoked at most once, inside
    /// a failure-isolating boundary. Removal happens first, so the report
    /// never disagrees with the active set.
    pub fn deactivate(&mut self, class_id: &str) -> DeactivationReport {
        let Some(mut instance) = self.active.take(class_id) else {
            debug!(class = class_id, "deactivation requested for inactive extension");
            return DeactivationReport::NotActive;
        };

        let Some(hook) = instance.take_unload() else {
            info!(class = class_id, "deactivated extension (no unload hook)");
            return DeactivationReport::NoOp;
        };

        match hook.invoke(instance.state_mut(), self.context()) {
            Ok(()) => {
                info!(class = class_id, hook = hook.name(), "deactivated extension");
                DeactivationReport::Success {
                    hook: hook.name().to_string(),
                }
            }
            Err(cause) => {
                warn!(
                    class = class_id,
                    hook = hook.name(),
                    error = %cause,
                    "unload hook failed; extension removed anyway"
                );
                DeactivationReport::UnloadFailed {
                    hook: hook.name().to_string(),
                    cause,
                }
            }
        }
    }

    /// Deactivates every active instance, newest first.
    ///
    /// One faulty unload hook never prevents the remaining instances from
    /// being torn down; each gets its own report.
    pub fn deactivate_all(&mut self) -> Vec<(String, DeactivationReport)> {
        let mut ids = self.active.ids();
        ids.reverse();
        ids.into_iter()
            .map(|id| {
                let report = self.deactivate(&id);
                (id, report)
            })
            .collect()
    }
}
