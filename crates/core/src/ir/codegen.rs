//! Code generation from the API model to the C AST.
//!
//! Produces two files: the source (stubs, dispatch pointer definitions and
//! the pointer reset function) and the header (typedefs, extern
//! declarations, name -> pointer macros, enums and extension markers).

use super::api::{Api, Signature};
use super::dispatch::DispatchSet;
use super::plan::{plan_stub, Action, Branch, Guard, Resolver};
use super::types::{CExpr, CFile, CFunction, CItem, CStmt, CTypedef};
use crate::config::GeneratorConfig;

/// Generated source and header, as ASTs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Definitions: stubs and dispatch pointers.
    pub source: CFile,
    /// Declarations: typedefs, externs, macros and constants.
    pub header: CFile,
}

/// Generate both files for `api`. `sets` must come from
/// [`compute_dispatch_sets`](super::dispatch::compute_dispatch_sets).
pub fn codegen_module(
    api: &Api,
    sets: &[DispatchSet<'_>],
    config: &GeneratorConfig,
) -> GeneratedModule {
    let banner = CItem::Banner {
        generator: config.generator_name.to_string(),
        regenerate: config.regenerate_command.to_string(),
    };
    let mut source = vec![banner.clone()];
    let mut header = vec![banner];

    for function in api.unique_functions() {
        header.push(CItem::Typedef(CTypedef {
            name: config.typedef_name(&function.name),
            signature: function.signature.clone(),
        }));
    }

    for set in sets {
        let dispatch_name = set.dispatch_name(config);
        let typedef_name = set.typedef_name(config);

        let comments = codegen_member_comments(set, config);
        source.push(comments.clone());
        header.push(comments);

        header.push(CItem::Extern {
            ty: typedef_name.clone(),
            name: dispatch_name.clone(),
        });
        for function in set.functions() {
            header.push(CItem::Define {
                name: config.native_name(&function.name),
                value: Some(dispatch_name.clone()),
            });
        }

        source.push(CItem::Function(codegen_stub(set, config)));
        source.push(CItem::Variable {
            ty: typedef_name,
            name: dispatch_name,
            init: CExpr::Ident(set.stub_name(config)),
        });
    }

    source.push(CItem::Function(codegen_initializer(sets, config)));

    for value in api.enums() {
        header.push(CItem::Define {
            name: config.enum_name(&value.name),
            value: Some(value.value.clone()),
        });
    }

    header.push(CItem::Blank);
    for extension in api.extensions() {
        header.push(CItem::Define {
            name: extension.clone(),
            value: None,
        });
    }

    GeneratedModule {
        source: CFile { items: source },
        header: CFile { items: header },
    }
}

/// `/* glFoo (GL 1.5) */` for every member of the set.
fn codegen_member_comments(set: &DispatchSet<'_>, config: &GeneratorConfig) -> CItem {
    CItem::CommentBlock(
        set.functions()
            .iter()
            .map(|f| format!("{} ({})", config.native_name(&f.name), f.category))
            .collect(),
    )
}

/// The lazily binding stub for one dispatch set.
pub fn codegen_stub(set: &DispatchSet<'_>, config: &GeneratorConfig) -> CFunction {
    let primary = set.primary();
    let dispatch_name = set.dispatch_name(config);

    let mut body = vec![CStmt::Expr(CExpr::call(
        config.runtime.check_initialized,
        Vec::new(),
    ))];
    let branches = plan_stub(set, config);
    body.extend(lower_branches(&branches, &dispatch_name, config));

    let forward = CExpr::call(
        &dispatch_name,
        primary
            .signature
            .params
            .iter()
            .map(|p| CExpr::Ident(p.name.clone()))
            .collect(),
    );
    body.push(if primary.signature.return_type.is_some() {
        CStmt::Return(forward)
    } else {
        CStmt::Expr(forward)
    });

    CFunction {
        is_static: true,
        split_header: false,
        name: set.stub_name(config),
        signature: primary.signature.clone(),
        body,
    }
}

/// Turn the branch list into an if/else-if chain. A leading `Always` guard
/// becomes a bare statement; a later one becomes the final `else`. Branches
/// after an `Always` guard are unreachable and dropped.
fn lower_branches(branches: &[Branch], slot: &str, config: &GeneratorConfig) -> Option<CStmt> {
    let (first, rest) = branches.split_first()?;
    let action = lower_action(&first.action, slot, config);
    let cond = match &first.guard {
        Guard::Always => return Some(action),
        Guard::MinVersion(version) => {
            CExpr::call(config.runtime.check_version, vec![CExpr::Int(*version)])
        }
        Guard::Extension(name) => CExpr::call(
            config.runtime.check_extension,
            vec![CExpr::Str(name.clone())],
        ),
    };
    Some(CStmt::If {
        cond,
        then_branch: Box::new(action),
        else_branch: lower_branches(rest, slot, config).map(Box::new),
    })
}

fn lower_action(action: &Action, slot: &str, config: &GeneratorConfig) -> CStmt {
    match action {
        Action::Bind {
            resolver,
            symbol,
            typedef,
        } => {
            let getter = match resolver {
                Resolver::Core => config.runtime.get_core_proc,
                Resolver::Extension => config.runtime.get_ext_proc,
            };
            CStmt::Expr(CExpr::Assign {
                target: slot.to_string(),
                value: Box::new(CExpr::Cast {
                    ty: typedef.clone(),
                    expr: Box::new(CExpr::call(getter, vec![CExpr::Str(symbol.clone())])),
                }),
            })
        }
        Action::Unsupported { name } => CStmt::Expr(CExpr::call(
            config.runtime.unsupported,
            vec![CExpr::Str(name.clone())],
        )),
    }
}

/// Resets every dispatch pointer to its stub, in dispatch set order.
fn codegen_initializer(sets: &[DispatchSet<'_>], config: &GeneratorConfig) -> CFunction {
    CFunction {
        is_static: true,
        split_header: true,
        name: config.initializer_fn.to_string(),
        signature: Signature::default(),
        body: sets
            .iter()
            .map(|set| {
                CStmt::Expr(CExpr::Assign {
                    target: set.dispatch_name(config),
                    value: Box::new(CExpr::Ident(set.stub_name(config))),
                })
            })
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::api::{Category, Function, Param};
    use crate::ir::emit::Emit;

    fn function(name: &str, alias: Option<&str>, category: &str) -> Function {
        Function {
            name: name.into(),
            signature: Signature {
                return_type: Some("GLint".into()),
                params: vec![Param {
                    name: "a".into(),
                    ty: "GLint".into(),
                }],
            },
            alias: alias.map(Into::into),
            category: Category::decode(category),
        }
    }

    #[test]
    fn test_baseline_stub_collapses_to_single_statement() {
        let foo = function("Foo", None, "1.0");
        let ext = function("FooEXT", Some("Foo"), "EXT_foo");
        let set = DispatchSet::new(vec![&ext, &foo]).unwrap();

        let stub = codegen_stub(&set, &GeneratorConfig::default()).emit();
        assert_eq!(
            stub,
            "static GLint stub_glFoo(GLint a)\n\
             {\n\
             \t__check_initialized();\n\
             \t__piglit_dispatch_glFoo = (PFNGLFOOPROC) __get_core_proc(\"glFoo\");\n\
             \treturn __piglit_dispatch_glFoo(a);\n\
             }\n"
        );
        assert!(!stub.contains("else"));
        assert!(!stub.contains("if (true)"));
    }

    #[test]
    fn test_non_baseline_stub_has_three_branches() {
        let foo = function("Foo", None, "1.5");
        let ext = function("FooEXT", Some("Foo"), "EXT_foo");
        let set = DispatchSet::new(vec![&foo, &ext]).unwrap();

        let stub = codegen_stub(&set, &GeneratorConfig::default()).emit();
        assert_eq!(
            stub,
            "static GLint stub_glFoo(GLint a)\n\
             {\n\
             \t__check_initialized();\n\
             \tif (__check_version(15))\n\
             \t\t__piglit_dispatch_glFoo = (PFNGLFOOPROC) __get_core_proc(\"glFoo\");\n\
             \telse if (__check_extension(\"EXT_foo\"))\n\
             \t\t__piglit_dispatch_glFoo = (PFNGLFOOEXTPROC) __get_ext_proc(\"glFooEXT\");\n\
             \telse\n\
             \t\t__unsupported(\"Foo\");\n\
             \treturn __piglit_dispatch_glFoo(a);\n\
             }\n"
        );
    }

    #[test]
    fn test_void_stub_does_not_return() {
        let clear = Function {
            name: "Clear".into(),
            signature: Signature {
                return_type: None,
                params: vec![Param {
                    name: "mask".into(),
                    ty: "GLbitfield".into(),
                }],
            },
            alias: None,
            category: Category::decode("1.3"),
        };
        let set = DispatchSet::new(vec![&clear]).unwrap();
        let stub = codegen_stub(&set, &GeneratorConfig::default()).emit();
        assert!(stub.starts_with("static void stub_glClear(GLbitfield mask)\n"));
        assert!(stub.contains("\tif (__check_version(13))\n"));
        assert!(stub.contains("\telse\n\t\t__unsupported(\"Clear\");\n"));
        assert!(stub.ends_with("\t__piglit_dispatch_glClear(mask);\n}\n"));
    }

    #[test]
    fn test_every_stub_ends_with_unsupported_fallback() {
        let config = GeneratorConfig::default();
        for category in ["1.1", "2.0", "GL_ARB_foo"] {
            let f = function("Foo", None, category);
            let set = DispatchSet::new(vec![&f]).unwrap();
            let stub = codegen_stub(&set, &config);
            let chain = &stub.body[1];
            let mut tail = chain;
            while let CStmt::If {
                else_branch: Some(next),
                ..
            } = tail
            {
                tail = next.as_ref();
            }
            assert_eq!(
                tail,
                &CStmt::Expr(CExpr::call("__unsupported", vec![CExpr::Str("Foo".into())])),
                "category {category}"
            );
        }
    }

    #[test]
    fn test_initializer_resets_every_pointer() {
        let a = function("A", None, "1.0");
        let b = function("B", None, "1.1");
        let sets = vec![
            DispatchSet::new(vec![&a]).unwrap(),
            DispatchSet::new(vec![&b]).unwrap(),
        ];
        let init = codegen_initializer(&sets, &GeneratorConfig::default()).emit();
        assert_eq!(
            init,
            "static void\n\
             initialize_dispatch_pointers()\n\
             {\n\
             \t__piglit_dispatch_glA = stub_glA;\n\
             \t__piglit_dispatch_glB = stub_glB;\n\
             }\n"
        );
    }
}
