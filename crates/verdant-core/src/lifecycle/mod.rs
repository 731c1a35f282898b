//! # Verdant Lifecycle
//!
//! Lifecycle hook names, the phase state machine of an [`Instance`], and the
//! synchronous hook dispatcher.
//!
//! Hook callbacks receive the instance as an explicit `&mut Instance`
//! argument. Callbacks registered for the same hook run in merge order
//! (inherited callbacks first) and the first error stops dispatch.
pub mod dispatcher;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::instance::Instance;
use crate::kernel::error::BoxError;

/// Lifecycle callback
pub type HookFn = Arc<dyn Fn(&mut Instance) -> Result<(), BoxError> + Send + Sync>;

/// Named lifecycle extension points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Hook {
    /// Options resolved, no reactive state yet
    BeforeCreate,
    /// Reactive state initialized, nothing rendered
    Created,
    /// Fired by the mount engine before the first render
    BeforeMount,
    /// Fired by the mount engine once the DOM is attached
    Mounted,
    BeforeUpdate,
    Updated,
    BeforeDestroy,
    Destroyed,
}

impl Hook {
    /// All hooks in lifecycle order
    pub const ALL: [Hook; 8] = [
        Hook::BeforeCreate,
        Hook::Created,
        Hook::BeforeMount,
        Hook::Mounted,
        Hook::BeforeUpdate,
        Hook::Updated,
        Hook::BeforeDestroy,
        Hook::Destroyed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::BeforeCreate => "beforeCreate",
            Hook::Created => "created",
            Hook::BeforeMount => "beforeMount",
            Hook::Mounted => "mounted",
            Hook::BeforeUpdate => "beforeUpdate",
            Hook::Updated => "updated",
            Hook::BeforeDestroy => "beforeDestroy",
            Hook::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hook {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hook::ALL
            .iter()
            .copied()
            .find(|hook| hook.as_str() == s)
            .ok_or_else(|| format!("unknown lifecycle hook '{}'", s))
    }
}

/// Construction/mount progress of an instance. Phases only move forward;
/// there is no recovery transition after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LifecyclePhase {
    #[default]
    Unconstructed,
    OptionsResolved,
    BeforeCreateFired,
    StateInitialized,
    CreatedFired,
    RenderResolved,
    /// DOM attached by the mount engine; `mounted` has not completed
    Patched,
    Mounted,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecyclePhase::Unconstructed => "Unconstructed",
            LifecyclePhase::OptionsResolved => "OptionsResolved",
            LifecyclePhase::BeforeCreateFired => "BeforeCreateFired",
            LifecyclePhase::StateInitialized => "StateInitialized",
            LifecyclePhase::CreatedFired => "CreatedFired",
            LifecyclePhase::RenderResolved => "RenderResolved",
            LifecyclePhase::Patched => "Patched",
            LifecyclePhase::Mounted => "Mounted",
        };
        f.write_str(name)
    }
}

pub use dispatcher::call_hook;

// Test module declaration
#[cfg(test)]
mod tests;
