//! C AST for the generated files.
//!
//! Only the handful of constructs the generator needs: preprocessor lines,
//! typedefs, extern/initialized pointer variables, comment blocks and simple
//! functions built from expression, return and if/else statements.

use super::api::Signature;

/// C expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CExpr {
    /// Identifier: `foo`
    Ident(String),
    /// String literal: `"foo"`
    Str(String),
    /// Unsigned integer literal: `15`
    Int(u32),
    /// Call: `foo(a, b)`
    Call {
        /// Called function name.
        callee: String,
        /// Arguments.
        args: Vec<CExpr>,
    },
    /// Cast: `(T) expr`
    Cast {
        /// Target type.
        ty: String,
        /// Casted expression.
        expr: Box<CExpr>,
    },
    /// Assignment: `target = value`
    Assign {
        /// Assigned variable.
        target: String,
        /// Assigned value.
        value: Box<CExpr>,
    },
}

impl CExpr {
    /// `callee(args...)`
    pub fn call(callee: &str, args: Vec<CExpr>) -> Self {
        Self::Call {
            callee: callee.to_string(),
            args,
        }
    }
}

/// C statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CStmt {
    /// Expression statement: `expr;`
    Expr(CExpr),
    /// `return expr;`
    Return(CExpr),
    /// `if (cond) then_branch else else_branch`. An `If` in the else branch
    /// is rendered as `else if`.
    If {
        /// Condition.
        cond: CExpr,
        /// Taken when the condition holds.
        then_branch: Box<CStmt>,
        /// Taken otherwise.
        else_branch: Option<Box<CStmt>>,
    },
}

/// `typedef RET (*NAME)(TYPES...);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CTypedef {
    /// Typedef name.
    pub name: String,
    /// Function type; parameter names are not rendered.
    pub signature: Signature,
}

/// Function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CFunction {
    /// Whether the definition has internal linkage.
    pub is_static: bool,
    /// Put the return type on its own line and render an empty parameter
    /// list as `()`.
    pub split_header: bool,
    /// Function name.
    pub name: String,
    /// Parameters (named) and return type.
    pub signature: Signature,
    /// Body statements.
    pub body: Vec<CStmt>,
}

/// Top-level item of a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CItem {
    /// "Generated file, do not edit" banner.
    Banner {
        /// Name of the generator.
        generator: String,
        /// Command that regenerates the file.
        regenerate: String,
    },
    /// A blank line followed by one `/* ... */` line per entry.
    CommentBlock(Vec<String>),
    /// Pointer typedef.
    Typedef(CTypedef),
    /// `extern TYPE NAME;`
    Extern {
        /// Variable type.
        ty: String,
        /// Variable name.
        name: String,
    },
    /// `TYPE NAME = INIT;`
    Variable {
        /// Variable type.
        ty: String,
        /// Variable name.
        name: String,
        /// Initializer.
        init: CExpr,
    },
    /// `#define NAME` or `#define NAME VALUE`
    Define {
        /// Macro name.
        name: String,
        /// Replacement text.
        value: Option<String>,
    },
    /// Function definition.
    Function(CFunction),
    /// Empty line.
    Blank,
}

/// A complete generated file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CFile {
    /// Items in output order.
    pub items: Vec<CItem>,
}
