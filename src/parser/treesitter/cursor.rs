//! Tree-sitter node helpers shared by the Go lowering pass.

/// Source text covered by a node.
pub fn node_text<'a>(node: &tree_sitter::Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// 1-based start line of a node.
pub fn span_start_line(node: &tree_sitter::Node) -> usize {
    node.start_position().row + 1
}

/// 1-based end line of a node.
pub fn span_end_line(node: &tree_sitter::Node) -> usize {
    node.end_position().row + 1
}

/// Whether only whitespace precedes `byte` on its line.
pub fn starts_own_line(source: &str, byte: usize) -> bool {
    let line_start = source[..byte].rfind('\n').map_or(0, |pos| pos + 1);
    source[line_start..byte].chars().all(char::is_whitespace)
}

/// First `ERROR` or missing node in pre-order, if the tree has any.
///
/// Subtrees without errors are skipped. Walks with a cursor, so arbitrarily
/// deep trees do not grow the call stack.
pub fn first_error<'t>(root: tree_sitter::Node<'t>) -> Option<tree_sitter::Node<'t>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
