//! Intermediate representation for API declarations to C dispatch code.
//!
//! Layers, in pipeline order:
//! 1. API-level IR: categories, functions, enums and synonym classes
//! 2. Dispatch sets and the per-set stub resolution plan
//! 3. C AST IR: items, functions, statements, expressions
//! 4. Emission: AST to C code strings via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `api`: API model (Category, Function, Enum, Api)
//! - `synonyms`: union-find over function names
//! - `normalize`: declaration tree -> Api
//! - `dispatch`: synonym classes -> ordered DispatchSets
//! - `plan`: DispatchSet -> guarded binding branches
//! - `types`: C AST IR
//! - `codegen`: Api + DispatchSets -> C AST
//! - `emit`: C AST -> code strings (via Emit trait)

pub mod api;
pub mod codegen;
pub mod dispatch;
pub mod emit;
pub mod normalize;
pub mod plan;
pub mod synonyms;
pub mod types;

pub use codegen::{codegen_module, GeneratedModule};
pub use dispatch::{compute_dispatch_sets, DispatchSet};
pub use emit::Emit;
pub use normalize::normalize_tree;
