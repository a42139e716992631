use crate::tsx::errors::TsxError;
use crate::tsx::lang::tsx_language;
use tree_sitter::{Parser, Tree};

/// Tree-sitter parser wrapper for TSX source code.
pub struct TsxParser {
    parser: Parser,
}

impl TsxParser {
    pub fn new() -> Result<Self, TsxError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tsx_language())
            .map_err(|_| TsxError::LanguageSet)?;

        Ok(Self { parser })
    }

    /// Parse source code into a tree-sitter Tree.
    pub fn parse(&mut self, source: &str) -> Result<Tree, TsxError> {
        self.parser.parse(source, None).ok_or(TsxError::ParseFailed)
    }

    /// Parse source code and return the tree along with the source.
    pub fn parse_with_source<'a>(&mut self, source: &'a str) -> Result<ParsedSource<'a>, TsxError> {
        let tree = self.parse(source)?;
        Ok(ParsedSource { source, tree })
    }
}

impl Default for TsxParser {
    fn default() -> Self {
        Self::new().expect("failed to create default TsxParser")
    }
}

/// A parsed source unit with its tree-sitter tree.
pub struct ParsedSource<'a> {
    pub source: &'a str,
    pub tree: Tree,
}

impl<'a> ParsedSource<'a> {
    /// Get the root node of the tree.
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Check if the tree contains any ERROR or MISSING nodes.
    pub fn has_errors(&self) -> bool {
        has_error_nodes(self.tree.root_node())
    }

    /// Get all ERROR/MISSING nodes in the tree, in document order.
    pub fn error_nodes(&self) -> Vec<ErrorNode> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &mut errors);
        errors
    }

    /// Fail with a `SyntaxError` for the first ERROR/MISSING node, if any.
    ///
    /// Tree-sitter is error-tolerant, so a "successful" parse of malformed
    /// input still yields a tree; this gate is what makes malformed input a
    /// hard failure before any rewriting happens.
    pub fn check_syntax(&self) -> Result<(), TsxError> {
        match self.error_nodes().first() {
            None => Ok(()),
            Some(err) => Err(TsxError::SyntaxError {
                byte_start: err.byte_start,
                byte_end: err.byte_end,
                line: err.start_point.row + 1,
                column: err.start_point.column,
            }),
        }
    }

    /// Extract text for a node's byte range.
    pub fn node_text(&self, node: tree_sitter::Node<'_>) -> &'a str {
        &self.source[node.byte_range()]
    }
}

/// Information about an ERROR node in the parse tree.
#[derive(Debug, Clone)]
pub struct ErrorNode {
    pub byte_start: usize,
    pub byte_end: usize,
    pub start_point: tree_sitter::Point,
    pub end_point: tree_sitter::Point,
}

fn has_error_nodes(node: tree_sitter::Node<'_>) -> bool {
    if node.is_error() || node.is_missing() {
        return true;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if has_error_nodes(child) {
            return true;
        }
    }

    false
}

fn collect_error_nodes(node: tree_sitter::Node<'_>, errors: &mut Vec<ErrorNode>) {
    if node.is_error() || node.is_missing() {
        errors.push(ErrorNode {
            byte_start: node.start_byte(),
            byte_end: node.end_byte(),
            start_point: node.start_position(),
            end_point: node.end_position(),
        });
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, errors);
    }
}
