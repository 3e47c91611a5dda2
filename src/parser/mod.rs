//! Parsing collaborator: source text to the owned syntax model.
//!
//! Only Go is supported. The tree-sitter tree is lowered immediately so that
//! nothing downstream depends on tree-sitter types.

pub mod go;
pub mod syntax;
pub mod treesitter;

pub use go::parse_go;
