//! Typed declaration tree -> [`Api`].
//!
//! Walks every category in textual order, decodes its name and records each
//! declaration under it. Extension categories are registered as they are met.

use tracing::{debug, warn};

use super::api::{Api, Category, Enum, Function, Param, Signature};
use crate::error::{GenError, Result};
use crate::source::{CategoryNode, Entry, FunctionNode, SourceTree};

/// Build the API model from a fully expanded declaration tree.
pub fn normalize_tree(tree: &SourceTree) -> Result<Api> {
    let mut api = Api::default();
    for category in &tree.categories {
        normalize_category(&mut api, category)?;
    }
    debug!(
        functions = api.functions().len(),
        function_names = api.synonyms().len(),
        enums = api.enums().len(),
        extensions = api.extensions().len(),
        "Normalized declarations."
    );
    if api.synonyms().is_empty() {
        warn!("No function declarations found; no dispatch stubs will be generated.");
    }
    Ok(api)
}

fn normalize_category(api: &mut Api, node: &CategoryNode) -> Result<()> {
    let category = Category::decode(&node.name);
    if let Category::Extension(name) = &category {
        api.add_extension(name);
    }
    for entry in &node.entries {
        match entry {
            Entry::Function(function) => api.add_function(normalize_function(function, &category)?),
            Entry::Enum(value) => api.add_enum(Enum {
                name: value.name.clone(),
                value: value.value.clone(),
            }),
        }
    }
    Ok(())
}

fn normalize_function(node: &FunctionNode, category: &Category) -> Result<Function> {
    let return_type = match node.returns.as_slice() {
        [] => None,
        [ret] => Some(ret.ty.clone()),
        _ => {
            return Err(GenError::TooManyReturns {
                function: node.name.clone(),
            });
        }
    };
    let params = node
        .params
        .iter()
        .filter(|param| !param.padding)
        .map(|param| Param {
            name: param.name.clone(),
            ty: param.ty.clone(),
        })
        .collect();

    Ok(Function {
        name: node.name.clone(),
        signature: Signature {
            return_type,
            params,
        },
        alias: node.alias.clone(),
        category: category.clone(),
    })
}
