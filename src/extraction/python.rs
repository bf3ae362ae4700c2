//! Tree-sitter based extraction of documented Python classes and functions.

use crate::core::{BusinessStage, ParseError, SymbolKind, SymbolRecord, MAX_SNIPPET_LINES, MIN_DOC_CHARS};
use crate::extraction::docstring::{clean_doc, decode_concatenated, decode_literal};
use crate::extraction::stage::{KeywordStageClassifier, StageClassifier};
use tree_sitter::{Node, Parser, Tree};

/// Parse Python source into a tree-sitter tree, rejecting trees with errors.
pub fn parse_source(content: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ParseError::Grammar(e.to_string()))?;

    let tree = parser.parse(content, None).ok_or(ParseError::NoTree)?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(first_error(root).unwrap_or(ParseError::Syntax {
            line: node_line(&root),
            column: node_column(&root),
        }));
    }
    if let Some(stmt) = first_python2_statement(root) {
        return Err(ParseError::Syntax {
            line: node_line(&stmt),
            column: node_column(&stmt),
        });
    }
    Ok(tree)
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Get the column number for a tree-sitter node (1-indexed)
pub fn node_column(node: &Node) -> usize {
    node.start_position().column + 1
}

fn first_error(node: Node) -> Option<ParseError> {
    if node.is_missing() {
        return Some(ParseError::Missing {
            token: node.kind().to_string(),
            line: node_line(&node),
            column: node_column(&node),
        });
    }
    if node.is_error() {
        return Some(ParseError::Syntax {
            line: node_line(&node),
            column: node_column(&node),
        });
    }
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .filter(|child| child.has_error())
        .find_map(first_error)
}

/// `print x` and `exec code` statements are still accepted by the grammar but
/// are not Python 3.
fn first_python2_statement(node: Node) -> Option<Node> {
    if matches!(node.kind(), "print_statement" | "exec_statement") {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(first_python2_statement)
}

/// Turns one Python file into [`SymbolRecord`]s.
pub struct SymbolExtractor {
    classifier: Box<dyn StageClassifier>,
    max_snippet_lines: usize,
}

impl Default for SymbolExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolExtractor {
    pub fn new() -> Self {
        Self {
            classifier: Box::new(KeywordStageClassifier::default()),
            max_snippet_lines: MAX_SNIPPET_LINES,
        }
    }

    pub fn with_classifier(mut self, classifier: Box<dyn StageClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_max_snippet_lines(mut self, max_snippet_lines: usize) -> Self {
        self.max_snippet_lines = max_snippet_lines.max(1);
        self
    }

    pub fn classify(&self, rel_path: &str) -> BusinessStage {
        self.classifier.classify(rel_path)
    }

    /// Extract every qualifying definition from `content`, in breadth-first
    /// statement order (enclosing scopes before the definitions nested in
    /// them, source order within one nesting level).
    pub fn extract(&self, rel_path: &str, content: &str) -> Result<Vec<SymbolRecord>, ParseError> {
        let tree = parse_source(content)?;
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let stage = self.classify(rel_path);

        let mut definitions = Vec::new();
        collect_block(tree.root_node(), 1, &mut definitions);
        // Stable: same-depth definitions keep source order.
        definitions.sort_by_key(|(depth, _)| *depth);

        Ok(definitions
            .into_iter()
            .filter_map(|(_, node)| self.record_for(node, content, &lines, rel_path, stage))
            .collect())
    }

    fn record_for(
        &self,
        node: Node,
        source: &str,
        lines: &[&str],
        rel_path: &str,
        stage: BusinessStage,
    ) -> Option<SymbolRecord> {
        let symbol_kind = definition_kind(&node)?;

        let name = node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source))?;
        if name.is_empty() || name.starts_with('_') {
            return None;
        }

        let doc = docstring(node.child_by_field_name("body")?, source)?;
        let doc_summary = doc.trim();
        if doc_summary.chars().count() < MIN_DOC_CHARS {
            return None;
        }

        let start_line = node_line(&node);
        let end_line = end_line(&node).max(start_line);

        Some(SymbolRecord {
            path: rel_path.to_string(),
            symbol_kind,
            name: name.to_string(),
            start_line,
            end_line,
            doc_summary: doc_summary.to_string(),
            snippet: clip_snippet(lines, start_line, end_line, self.max_snippet_lines),
            business_stage: stage,
        })
    }
}

/// Statements of a `module` or `block`, each at `depth`.
fn collect_block<'t>(block: Node<'t>, depth: usize, out: &mut Vec<(usize, Node<'t>)>) {
    let mut cursor = block.walk();
    let statements: Vec<Node> = block.named_children(&mut cursor).collect();
    for statement in statements {
        collect_statement(statement, depth, out);
    }
}

fn blocks_of(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() == "block")
        .collect()
}

/// Record definitions found at or below `statement`, with the nesting depth
/// a Python syntax tree would give them. Clauses that Python models as their
/// own node (`except`, `case`, each `elif`) add a level.
fn collect_statement<'t>(statement: Node<'t>, depth: usize, out: &mut Vec<(usize, Node<'t>)>) {
    match statement.kind() {
        "decorated_definition" => {
            if let Some(definition) = statement.child_by_field_name("definition") {
                collect_statement(definition, depth, out);
            }
        }
        "function_definition" | "class_definition" => {
            out.push((depth, statement));
            if let Some(body) = statement.child_by_field_name("body") {
                collect_block(body, depth + 1, out);
            }
        }
        "if_statement" => {
            if let Some(body) = statement.child_by_field_name("consequence") {
                collect_block(body, depth + 1, out);
            }
            let mut orelse_depth = depth + 1;
            let mut cursor = statement.walk();
            let clauses: Vec<Node> = statement.named_children(&mut cursor).collect();
            for clause in clauses {
                match clause.kind() {
                    "elif_clause" => {
                        for body in blocks_of(clause) {
                            collect_block(body, orelse_depth + 1, out);
                        }
                        orelse_depth += 1;
                    }
                    "else_clause" => {
                        for body in blocks_of(clause) {
                            collect_block(body, orelse_depth, out);
                        }
                    }
                    _ => {}
                }
            }
        }
        "match_statement" => {
            for body in blocks_of(statement) {
                let mut cursor = body.walk();
                let cases: Vec<Node> = body.named_children(&mut cursor).collect();
                for case in cases.into_iter().filter(|c| c.kind() == "case_clause") {
                    for case_body in blocks_of(case) {
                        collect_block(case_body, depth + 2, out);
                    }
                }
            }
        }
        _ => {
            // for/while/with/try bodies, their `else`/`finally` clauses and
            // `except` handlers.
            let mut cursor = statement.walk();
            let children: Vec<Node> = statement.named_children(&mut cursor).collect();
            for child in children {
                match child.kind() {
                    "block" => collect_block(child, depth + 1, out),
                    "else_clause" | "finally_clause" => {
                        for body in blocks_of(child) {
                            collect_block(body, depth + 1, out);
                        }
                    }
                    "except_clause" | "except_group_clause" => {
                        for body in blocks_of(child) {
                            collect_block(body, depth + 2, out);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

fn definition_kind(node: &Node) -> Option<SymbolKind> {
    match node.kind() {
        "class_definition" => Some(SymbolKind::Class),
        // `async def` is a distinct definition kind and is not collected.
        "function_definition" if !is_async(node) => Some(SymbolKind::Function),
        _ => None,
    }
}

fn is_async(node: &Node) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

/// Last line of a definition. A node ending at column 0 stops before that line.
fn end_line(node: &Node) -> usize {
    let end = node.end_position();
    if end.column == 0 && end.row > node.start_position().row {
        end.row
    } else {
        end.row + 1
    }
}

/// Docstring of a class/function body: the first non-comment statement when
/// it is a bare string expression.
fn docstring(body: Node, source: &str) -> Option<String> {
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment")?;
    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }
    string_value(first.named_child(0)?, source).map(|raw| clean_doc(&raw))
}

fn string_value(expr: Node, source: &str) -> Option<String> {
    match expr.kind() {
        "string" => decode_literal(node_text(&expr, source)),
        "concatenated_string" => {
            let mut cursor = expr.walk();
            let pieces: Vec<&str> = expr
                .named_children(&mut cursor)
                .filter(|piece| piece.kind() == "string")
                .map(|piece| node_text(&piece, source))
                .collect();
            decode_concatenated(pieces)
        }
        "parenthesized_expression" => {
            let mut cursor = expr.walk();
            let inner = expr
                .named_children(&mut cursor)
                .find(|child| child.kind() != "comment")?;
            string_value(inner, source)
        }
        _ => None,
    }
}

/// Source lines `start_line..=end_line`, truncated to `max_lines` from the start.
pub fn clip_snippet(lines: &[&str], start_line: usize, end_line: usize, max_lines: usize) -> String {
    let start = start_line.saturating_sub(1);
    let mut end = end_line.min(lines.len());
    if end.saturating_sub(start) > max_lines {
        end = start + max_lines;
    }
    if start >= end {
        return String::new();
    }
    lines[start..end].concat().trim_end().to_string()
}
