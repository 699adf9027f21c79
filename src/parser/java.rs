//! Java parser using tree-sitter

use anyhow::{Context, Result};
use tree_sitter::{Language, Parser, Tree};

use crate::syntax::CompilationUnit;

/// Parser for Java files using tree-sitter
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    /// Create a new Java parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language: Language = tree_sitter_java::LANGUAGE.into();
        parser
            .set_language(&language)
            .context("Failed to set Java language")?;
        Ok(Self { parser })
    }

    /// Parse source code into a raw syntax tree
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .context("Failed to parse Java source")?;
        if tree.root_node().has_error() {
            anyhow::bail!("syntax error near line {}", first_error_line(&tree));
        }
        Ok(tree)
    }

    /// Parse source code and lower it into the analyzer-facing model.
    pub fn parse_unit(&mut self, source: &str) -> Result<CompilationUnit> {
        let tree = self.parse(source)?;
        Ok(super::lower::lower_unit(&tree, source))
    }

    /// Get the tree-sitter language for Java
    pub fn language() -> Language {
        tree_sitter_java::LANGUAGE.into()
    }
}

fn first_error_line(tree: &Tree) -> usize {
    let mut cursor = tree.walk();
    let mut line = tree.root_node().start_position().row + 1;
    'outer: loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            line = node.start_position().row + 1;
            break;
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                break 'outer;
            }
        }
    }
    line
}
