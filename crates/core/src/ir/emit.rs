//! C code emission via the Emit trait.
//!
//! Pure string building over the C AST. Statements are indented with one tab
//! per level.

use super::api::Signature;
use super::types::{CExpr, CFile, CFunction, CItem, CStmt, CTypedef};

/// Trait for emitting C code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its C string representation.
    fn emit(&self) -> String;
}

/// Render `RET NAME(PARAMS)`. `anonymous` drops parameter names; an empty
/// parameter list renders as `void`.
pub fn c_form(signature: &Signature, name: &str, anonymous: bool) -> String {
    let params = if signature.params.is_empty() {
        "void".to_string()
    } else if anonymous {
        signature
            .params
            .iter()
            .map(|p| p.ty.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        signature
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let return_type = signature.return_type.as_deref().unwrap_or("void");
    format!("{return_type} {name}({params})")
}

fn escape_c_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for CExpr {
    fn emit(&self) -> String {
        match self {
            CExpr::Ident(name) => name.clone(),
            CExpr::Str(s) => format!("\"{}\"", escape_c_string(s)),
            CExpr::Int(i) => i.to_string(),
            CExpr::Call { callee, args } => {
                let args_str = args.iter().map(|a| a.emit()).collect::<Vec<_>>().join(", ");
                format!("{callee}({args_str})")
            }
            CExpr::Cast { ty, expr } => format!("({ty}) {}", expr.emit()),
            CExpr::Assign { target, value } => format!("{target} = {}", value.emit()),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for CStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl CStmt {
    /// Emit with specified indentation level (one tab per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = "\t".repeat(indent);
        match self {
            CStmt::Expr(expr) => format!("{prefix}{};\n", expr.emit()),
            CStmt::Return(expr) => format!("{prefix}return {};\n", expr.emit()),
            CStmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let mut output = format!("{prefix}if ({})\n", cond.emit());
                output.push_str(&then_branch.emit_indented(indent + 1));
                let mut next = else_branch.as_deref();
                while let Some(stmt) = next {
                    match stmt {
                        CStmt::If {
                            cond,
                            then_branch,
                            else_branch,
                        } => {
                            output.push_str(&format!("{prefix}else if ({})\n", cond.emit()));
                            output.push_str(&then_branch.emit_indented(indent + 1));
                            next = else_branch.as_deref();
                        }
                        other => {
                            output.push_str(&format!("{prefix}else\n"));
                            output.push_str(&other.emit_indented(indent + 1));
                            next = None;
                        }
                    }
                }
                output
            }
        }
    }
}

// =============================================================================
// Items
// =============================================================================

impl Emit for CTypedef {
    fn emit(&self) -> String {
        format!(
            "typedef {};\n",
            c_form(&self.signature, &format!("(*{})", self.name), true)
        )
    }
}

impl Emit for CFunction {
    fn emit(&self) -> String {
        let storage = if self.is_static { "static " } else { "" };
        let mut output = if self.split_header && self.signature.params.is_empty() {
            let return_type = self.signature.return_type.as_deref().unwrap_or("void");
            format!("{storage}{return_type}\n{}()\n{{\n", self.name)
        } else {
            format!(
                "{storage}{}\n{{\n",
                c_form(&self.signature, &self.name, false)
            )
        };
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(1));
        }
        output.push_str("}\n");
        output
    }
}

impl Emit for CItem {
    fn emit(&self) -> String {
        match self {
            CItem::Banner {
                generator,
                regenerate,
            } => format!(
                "/**\n * This file was automatically generated by the script '{generator}'.\n *\n * DO NOT EDIT!\n *\n * To regenerate, run \"{regenerate}\" from the toplevel directory.\n */\n"
            ),
            CItem::CommentBlock(lines) => {
                let mut output = String::from("\n");
                for line in lines {
                    output.push_str(&format!("/* {line} */\n"));
                }
                output
            }
            CItem::Typedef(typedef) => typedef.emit(),
            CItem::Extern { ty, name } => format!("extern {ty} {name};\n"),
            CItem::Variable { ty, name, init } => format!("{ty} {name} = {};\n", init.emit()),
            CItem::Define { name, value } => match value {
                Some(value) => format!("#define {name} {value}\n"),
                None => format!("#define {name}\n"),
            },
            CItem::Function(function) => function.emit(),
            CItem::Blank => "\n".to_string(),
        }
    }
}

impl Emit for CFile {
    fn emit(&self) -> String {
        self.items.iter().map(Emit::emit).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::api::Param;

    fn signature(return_type: Option<&str>, params: &[(&str, &str)]) -> Signature {
        Signature {
            return_type: return_type.map(Into::into),
            params: params
                .iter()
                .map(|(ty, name)| Param {
                    name: (*name).into(),
                    ty: (*ty).into(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_c_form() {
        let sig = signature(Some("GLvoid *"), &[("GLenum", "target"), ("GLenum", "access")]);
        assert_eq!(
            c_form(&sig, "stub_glMapBuffer", false),
            "GLvoid * stub_glMapBuffer(GLenum target, GLenum access)"
        );
        assert_eq!(c_form(&sig, "", true), "GLvoid * (GLenum, GLenum)");
        assert_eq!(c_form(&signature(None, &[]), "f", false), "void f(void)");
    }

    #[test]
    fn test_emit_typedef() {
        let typedef = CTypedef {
            name: "PFNGLMAPBUFFERPROC".into(),
            signature: signature(Some("GLvoid *"), &[("GLenum", "target"), ("GLenum", "access")]),
        };
        assert_eq!(
            typedef.emit(),
            "typedef GLvoid * (*PFNGLMAPBUFFERPROC)(GLenum, GLenum);\n"
        );
    }

    #[test]
    fn test_emit_expressions() {
        let bind = CExpr::Assign {
            target: "slot".into(),
            value: Box::new(CExpr::Cast {
                ty: "PFNGLFOOPROC".into(),
                expr: Box::new(CExpr::call("__get_core_proc", vec![CExpr::Str("glFoo".into())])),
            }),
        };
        assert_eq!(bind.emit(), "slot = (PFNGLFOOPROC) __get_core_proc(\"glFoo\")");
        assert_eq!(CExpr::call("f", vec![CExpr::Int(15), CExpr::Ident("x".into())]).emit(), "f(15, x)");
        assert_eq!(CExpr::Str("a\"b".into()).emit(), "\"a\\\"b\"");
    }

    #[test]
    fn test_emit_else_if_chain() {
        let call = |name: &str| Box::new(CStmt::Expr(CExpr::call(name, vec![])));
        let stmt = CStmt::If {
            cond: CExpr::Ident("a".into()),
            then_branch: call("one"),
            else_branch: Some(Box::new(CStmt::If {
                cond: CExpr::Ident("b".into()),
                then_branch: call("two"),
                else_branch: Some(call("three")),
            })),
        };
        assert_eq!(
            stmt.emit(),
            "\tif (a)\n\t\tone();\n\telse if (b)\n\t\ttwo();\n\telse\n\t\tthree();\n"
        );
    }

    #[test]
    fn test_emit_items() {
        assert_eq!(
            CItem::Define {
                name: "GL_FRONT".into(),
                value: Some("0x0404".into())
            }
            .emit(),
            "#define GL_FRONT 0x0404\n"
        );
        assert_eq!(
            CItem::Define {
                name: "GL_ARB_multitexture".into(),
                value: None
            }
            .emit(),
            "#define GL_ARB_multitexture\n"
        );
        assert_eq!(
            CItem::CommentBlock(vec!["glFoo (GL 1.0)".into(), "glFooEXT (GL_EXT_foo)".into()]).emit(),
            "\n/* glFoo (GL 1.0) */\n/* glFooEXT (GL_EXT_foo) */\n"
        );
        assert_eq!(
            CItem::Extern {
                ty: "PFNGLFOOPROC".into(),
                name: "__piglit_dispatch_glFoo".into()
            }
            .emit(),
            "extern PFNGLFOOPROC __piglit_dispatch_glFoo;\n"
        );
    }

    #[test]
    fn test_emit_function() {
        let function = CFunction {
            is_static: true,
            split_header: false,
            name: "stub_glFoo".into(),
            signature: signature(Some("GLint"), &[("GLint", "a")]),
            body: vec![CStmt::Return(CExpr::call("slot", vec![CExpr::Ident("a".into())]))],
        };
        assert_eq!(
            function.emit(),
            "static GLint stub_glFoo(GLint a)\n{\n\treturn slot(a);\n}\n"
        );
    }

    #[test]
    fn test_emit_banner() {
        let banner = CItem::Banner {
            generator: "gldispatch".into(),
            regenerate: "make piglit_dispatch_gen".into(),
        };
        assert_eq!(
            banner.emit(),
            "/**\n\
             \x20* This file was automatically generated by the script 'gldispatch'.\n\
             \x20*\n\
             \x20* DO NOT EDIT!\n\
             \x20*\n\
             \x20* To regenerate, run \"make piglit_dispatch_gen\" from the toplevel directory.\n\
             \x20*/\n"
        );
    }

    #[test]
    fn test_emit_split_header_function() {
        let function = CFunction {
            is_static: true,
            split_header: true,
            name: "reset".into(),
            signature: signature(None, &[]),
            body: vec![CStmt::Expr(CExpr::Assign {
                target: "slot".into(),
                value: Box::new(CExpr::Ident("stub".into())),
            })],
        };
        assert_eq!(function.emit(), "static void\nreset()\n{\n\tslot = stub;\n}\n");
    }
}
