//! Go parser module: Go source text to a lowered [`SyntaxFile`] via tree-sitter.
use tracing::trace;

use crate::error::ExtractError;
use crate::parser::syntax::SyntaxFile;
use crate::parser::treesitter::cursor::first_error;
use crate::parser::treesitter::{self, TsLanguage};

mod walker;

/// Parse Go source and lower it for comment association.
///
/// Tree-sitter recovers from syntax errors; any `ERROR` or missing node is
/// reported here as [`ExtractError::Parse`] so that no partial result escapes.
pub fn parse_go(source: &str, file: &str) -> Result<SyntaxFile, ExtractError> {
    let tree = treesitter::parse(source, TsLanguage::Go, file)?;
    let root = tree.root_node();

    if root.has_error() {
        let at = first_error(root).unwrap_or(root);
        let position = at.start_position();
        return Err(ExtractError::Parse {
            file: file.to_string(),
            line: position.row + 1,
            column: position.column + 1,
        });
    }

    let lowered = walker::walk_go_file(&tree, source);
    trace!(
        file,
        decls = lowered.decls.len(),
        nodes = lowered.nodes.len(),
        comments = lowered.comments.len(),
        "lowered go file"
    );
    Ok(lowered)
}
