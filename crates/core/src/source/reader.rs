//! Fragment parsing and include expansion.
//!
//! `parse_fragment` turns one XML text into typed [`TopLevel`] items without
//! touching the filesystem. `SourceTree::load` drives it from a root path and
//! splices included fragments in place, depth first.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use super::tree::{
    CategoryNode, EnumNode, Entry, FunctionNode, IncludeNode, ParamNode, ReturnNode, TopLevel,
};
use crate::error::{GenError, Result};

const API_ROOT: &str = "OpenGLAPI";

/// Every category reachable from a root fragment, includes expanded.
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    /// Categories in textual order across all fragments.
    pub categories: Vec<CategoryNode>,
    /// Fragments that were read, in the order they were opened.
    pub fragments: Vec<PathBuf>,
}

impl SourceTree {
    /// Read `root` and every fragment it includes.
    pub fn load(root: &Path) -> Result<Self> {
        let mut tree = Self::default();
        let mut stack = Vec::new();
        tree.load_fragment(root, &mut stack)?;
        debug!(
            root = %root.display(),
            fragments = tree.fragments.len(),
            categories = tree.categories.len(),
            "Loaded declaration tree."
        );
        Ok(tree)
    }

    fn load_fragment(&mut self, path: &Path, stack: &mut Vec<PathBuf>) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|err| GenError::io(path, err))?;
        if stack.contains(&canonical) {
            return Err(GenError::IncludeCycle { path: canonical });
        }

        let text = fs::read_to_string(&canonical).map_err(|err| GenError::io(path, err))?;
        let items = parse_fragment(path, &text)?;
        debug!(path = %path.display(), items = items.len(), "Parsed fragment.");
        self.fragments.push(canonical.clone());

        stack.push(canonical);
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for item in items {
            match item {
                TopLevel::Category(category) => self.categories.push(category),
                TopLevel::Include(include) => {
                    let target = base.join(&include.href);
                    debug!(from = %path.display(), target = %target.display(), "Expanding include.");
                    self.load_fragment(&target, stack)?;
                }
            }
        }
        stack.pop();
        Ok(())
    }
}

/// Parse a single fragment. `path` is only used in diagnostics.
pub fn parse_fragment(path: &Path, text: &str) -> Result<Vec<TopLevel>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options).map_err(|source| GenError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let root = doc.root_element();
    match root.tag_name().name() {
        API_ROOT => elements(root)
            .filter_map(|node| parse_top_level(node).transpose())
            .collect(),
        "category" => Ok(vec![TopLevel::Category(parse_category(root)?)]),
        other => Err(GenError::unexpected(other, "document")),
    }
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

fn required(node: &Node<'_, '_>, attribute: &'static str) -> Result<String> {
    node.attribute(attribute)
        .map(str::to_string)
        .ok_or_else(|| GenError::missing(node.tag_name().name(), attribute))
}

/// `<type>` declarations describe GLX wire sizes and carry nothing the
/// dispatch code needs.
const IGNORED_TYPE: &str = "type";
/// `<glx>` carries GLX protocol opcodes.
const IGNORED_GLX: &str = "glx";

fn parse_top_level(node: Node<'_, '_>) -> Result<Option<TopLevel>> {
    match node.tag_name().name() {
        "category" => Ok(Some(TopLevel::Category(parse_category(node)?))),
        "include" => Ok(Some(TopLevel::Include(IncludeNode {
            href: required(&node, "href")?,
        }))),
        IGNORED_TYPE => Ok(None),
        other => Err(GenError::unexpected(other, API_ROOT)),
    }
}

fn parse_category(node: Node<'_, '_>) -> Result<CategoryNode> {
    let name = required(&node, "name")?;
    let entries = elements(node)
        .filter_map(|child| match child.tag_name().name() {
            "function" => Some(parse_function(child).map(Entry::Function)),
            "enum" => Some(parse_enum(child).map(Entry::Enum)),
            IGNORED_TYPE => None,
            other => Some(Err(GenError::unexpected(other, "category"))),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CategoryNode { name, entries })
}

fn parse_enum(node: Node<'_, '_>) -> Result<EnumNode> {
    Ok(EnumNode {
        name: required(&node, "name")?,
        value: required(&node, "value")?,
    })
}

fn parse_function(node: Node<'_, '_>) -> Result<FunctionNode> {
    let mut function = FunctionNode {
        name: required(&node, "name")?,
        alias: node.attribute("alias").map(str::to_string),
        params: Vec::new(),
        returns: Vec::new(),
    };
    for child in elements(node) {
        match child.tag_name().name() {
            "param" => function.params.push(ParamNode {
                name: required(&child, "name")?,
                ty: required(&child, "type")?,
                padding: child.attribute("padding") == Some("true"),
            }),
            "return" => function.returns.push(ReturnNode {
                ty: required(&child, "type")?,
            }),
            IGNORED_GLX => {}
            other => return Err(GenError::unexpected(other, "function")),
        }
    }
    Ok(function)
}
