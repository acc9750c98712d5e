//! Declaration fragments: XML in, typed tree out.

mod reader;
mod tree;

pub use reader::{parse_fragment, SourceTree};
pub use tree::{
    CategoryNode, EnumNode, Entry, FunctionNode, IncludeNode, ParamNode, ReturnNode, TopLevel,
};
