use std::path::PathBuf;

/// Errors that abort an extraction call. There is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The input path exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not valid for the grammar.
    #[error("failed to parse {file}: syntax error at line {line}, column {column}")]
    Parse {
        file: String,
        line: usize,
        column: usize,
    },

    #[error("{language} parser produced no tree for {file}")]
    NoTree { file: String, language: &'static str },

    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("failed to walk {}: {source}", root.display())]
    Discover {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
