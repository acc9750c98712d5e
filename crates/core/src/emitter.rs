//! C dispatch code generator for OpenGL API declarations.
//!
//! The pipeline is:
//! 1. Load: root fragment + includes -> SourceTree
//! 2. Normalize: SourceTree -> Api (synonyms resolved here)
//! 3. Dispatch: Api -> sorted DispatchSets
//! 4. Codegen: Api + DispatchSets -> C AST (source and header)
//! 5. Emit: C AST -> String (via Emit trait)

use std::path::Path;

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::ir::api::Api;
use crate::ir::{codegen_module, compute_dispatch_sets, normalize_tree, Emit};
use crate::source::SourceTree;

/// The two generated texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    /// Definitions: stub functions and dispatch pointers.
    pub source: String,
    /// Declarations: typedefs, externs, macros and constants.
    pub header: String,
}

/// Load the declarations rooted at `root` into the API model.
pub fn load_api(root: &Path) -> Result<Api> {
    let tree = SourceTree::load(root)?;
    normalize_tree(&tree)
}

/// Generate both texts from a loaded API.
pub fn generate(api: &Api, config: &GeneratorConfig) -> Result<GeneratedCode> {
    let sets = compute_dispatch_sets(api, config)?;
    let module = codegen_module(api, &sets, config);
    let code = GeneratedCode {
        source: module.source.emit(),
        header: module.header.emit(),
    };
    debug!(
        source_len = code.source.len(),
        header_len = code.header.len(),
        "Generated dispatch code."
    );
    Ok(code)
}

/// Load `root` and generate both texts.
pub fn generate_from_path(root: &Path, config: &GeneratorConfig) -> Result<GeneratedCode> {
    let api = load_api(root)?;
    generate(&api, config)
}
