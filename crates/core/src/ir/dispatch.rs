//! Dispatch sets: one per synonym class, one dispatch pointer each.

use std::collections::HashSet;

use tracing::debug;

use super::api::{Api, Function};
use crate::config::GeneratorConfig;
use crate::error::{GenError, Result};

/// Mutually synonymous declarations sharing one dispatch pointer.
///
/// Members are ordered by category precedence (then by name, so that two
/// synonyms declared under the same category still order deterministically).
/// The first member is the primary and names every generated identifier.
#[derive(Debug, Clone)]
pub struct DispatchSet<'a> {
    functions: Vec<&'a Function>,
}

impl<'a> DispatchSet<'a> {
    /// Build a set from its members in any order.
    pub fn new(mut functions: Vec<&'a Function>) -> Result<Self> {
        if functions.is_empty() {
            return Err(GenError::EmptyDispatchSet);
        }
        functions.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(Self { functions })
    }

    /// Members in precedence order.
    pub fn functions(&self) -> &[&'a Function] {
        &self.functions
    }

    /// The precedence-first member.
    pub fn primary(&self) -> &'a Function {
        self.functions[0]
    }

    /// Name of the dispatch pointer variable.
    pub fn dispatch_name(&self, config: &GeneratorConfig) -> String {
        config.dispatch_name(&self.primary().name)
    }

    /// Name of the stub function.
    pub fn stub_name(&self, config: &GeneratorConfig) -> String {
        config.stub_name(&self.primary().name)
    }

    /// Pointer typedef of the dispatch pointer.
    pub fn typedef_name(&self, config: &GeneratorConfig) -> String {
        config.typedef_name(&self.primary().name)
    }
}

/// Partition every declared function into dispatch sets, sorted by stub name.
pub fn compute_dispatch_sets<'a>(
    api: &'a Api,
    config: &GeneratorConfig,
) -> Result<Vec<DispatchSet<'a>>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut sets = Vec::new();

    for name in api.function_names() {
        if visited.contains(name) {
            continue;
        }
        let synonyms = api
            .synonyms()
            .get_synonyms_for(name)
            .ok_or_else(|| GenError::UnknownSynonym {
                name: name.to_string(),
            })?;
        let members = synonyms
            .iter()
            .flat_map(|synonym| api.declarations_of(synonym))
            .collect();
        visited.extend(synonyms.iter().map(String::as_str));
        sets.push(DispatchSet::new(members)?);
    }

    sets.sort_by_cached_key(|set| set.stub_name(config));
    debug!(dispatch_sets = sets.len(), "Computed dispatch sets.");
    Ok(sets)
}
