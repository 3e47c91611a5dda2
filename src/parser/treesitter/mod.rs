//! Shared tree-sitter setup for the Go grammar.

pub mod cursor;

use crate::error::ExtractError;

/// Tree-sitter grammars the extractor can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsLanguage {
    Go,
}

impl TsLanguage {
    pub fn ts_language(&self) -> tree_sitter::Language {
        match self {
            TsLanguage::Go => tree_sitter_go::LANGUAGE.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TsLanguage::Go => "go",
        }
    }
}

/// Parse source text with the given grammar.
///
/// A `None` tree (cancelled parse) is reported as [`ExtractError::NoTree`].
pub fn parse(source: &str, lang: TsLanguage, file: &str) -> Result<tree_sitter::Tree, ExtractError> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&lang.ts_language())?;
    parser.parse(source, None).ok_or_else(|| ExtractError::NoTree {
        file: file.to_string(),
        language: lang.name(),
    })
}
