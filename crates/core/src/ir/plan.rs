//! Stub resolution plan.
//!
//! For each dispatch set, the ordered list of (guard, action) pairs the
//! generated stub evaluates. The first guard that holds wins; the list always
//! ends with an unconditional "unsupported" action.

use super::api::Category;
use super::dispatch::DispatchSet;
use crate::config::{typedef_override, GeneratorConfig};

/// Condition under which a branch is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// Always taken.
    Always,
    /// The running implementation reports at least this version (tenths).
    MinVersion(u32),
    /// The running implementation advertises this extension.
    Extension(String),
}

/// Entry point lookup procedure used by a binding action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    /// Core entry point lookup.
    Core,
    /// Extension entry point lookup.
    Extension,
}

/// What a branch does once its guard holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Resolve `symbol`, cast it to `typedef` and store it in the set's
    /// dispatch pointer.
    Bind {
        /// Lookup procedure.
        resolver: Resolver,
        /// Native entry point name, e.g. `glMapBufferARB`.
        symbol: String,
        /// Pointer typedef the result is cast to.
        typedef: String,
    },
    /// Report that no synonym is available. Carries the primary's declared
    /// name.
    Unsupported {
        /// Declared name of the primary function.
        name: String,
    },
}

/// One guarded action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// When to take this branch.
    pub guard: Guard,
    /// What to do.
    pub action: Action,
}

/// Ordered branches for a dispatch set's stub.
pub fn plan_stub(set: &DispatchSet<'_>, config: &GeneratorConfig) -> Vec<Branch> {
    let mut branches: Vec<Branch> = set
        .functions()
        .iter()
        .map(|function| {
            let (guard, resolver) = match &function.category {
                Category::Version(version) if *version == config.baseline_version => {
                    (Guard::Always, Resolver::Core)
                }
                Category::Version(version) => (Guard::MinVersion(*version), Resolver::Core),
                Category::Extension(name) => (Guard::Extension(name.clone()), Resolver::Extension),
            };
            let typedef = typedef_override(&function.name).map_or_else(
                || config.typedef_name(&function.name),
                str::to_string,
            );
            Branch {
                guard,
                action: Action::Bind {
                    resolver,
                    symbol: config.native_name(&function.name),
                    typedef,
                },
            }
        })
        .collect();

    branches.push(Branch {
        guard: Guard::Always,
        action: Action::Unsupported {
            name: set.primary().name.clone(),
        },
    });
    branches
}
