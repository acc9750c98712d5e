//! Typed nodes for one declaration fragment.
//!
//! The tree mirrors the XML one-to-one but only admits the constructs the
//! generator understands; anything else is rejected while building it.

/// A top-level construct of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevel {
    /// `<category name="...">`
    Category(CategoryNode),
    /// `<xi:include href="..."/>`
    Include(IncludeNode),
}

/// A version or extension grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    /// Either a decimal version ("1.5") or an extension name.
    pub name: String,
    /// Declarations in textual order.
    pub entries: Vec<Entry>,
}

/// A declaration inside a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// `<function>`
    Function(FunctionNode),
    /// `<enum>`
    Enum(EnumNode),
}

/// `<function name="..." alias="...">`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionNode {
    /// Declared name, without the native prefix.
    pub name: String,
    /// Name of a function this one is synonymous with.
    pub alias: Option<String>,
    /// Parameters in declaration order, padding included.
    pub params: Vec<ParamNode>,
    /// Every `<return>` child; more than one is rejected by the loader.
    pub returns: Vec<ReturnNode>,
}

/// `<param name="..." type="..." padding="true"/>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamNode {
    /// Parameter name.
    pub name: String,
    /// C type text.
    pub ty: String,
    /// Layout-only parameter, left out of generated signatures.
    pub padding: bool,
}

/// `<return type="..."/>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnNode {
    /// C type text.
    pub ty: String,
}

/// `<enum name="..." value="..."/>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumNode {
    /// Declared name, without the native prefix.
    pub name: String,
    /// Literal value exactly as written.
    pub value: String,
}

/// `<xi:include href="..."/>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeNode {
    /// Target path, relative to the including fragment.
    pub href: String,
}
