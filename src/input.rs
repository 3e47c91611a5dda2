use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

/// Source handed to an extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Path to a Go file on disk.
    File(PathBuf),
    /// Go source text.
    Literal(String),
}

impl Input {
    /// Treat `arg` as a path when something exists there, otherwise as source text.
    pub fn detect(arg: &str) -> Self {
        let path = Path::new(arg);
        if !arg.contains('\n') && path.exists() {
            Input::File(path.to_path_buf())
        } else {
            Input::Literal(arg.to_string())
        }
    }

    /// Identifier used in output keys: the file's base name, or `literal_name`.
    pub fn file_id(&self, literal_name: &str) -> String {
        match self {
            Input::File(path) => path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| path.to_string_lossy().to_string()),
            Input::Literal(_) => literal_name.to_string(),
        }
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

/// Read a file as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, ExtractError> {
    fs::read_to_string(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let arg = file.path().to_string_lossy().to_string();
        assert_eq!(Input::detect(&arg), Input::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_detect_literal() {
        let input = Input::detect("package main\n\nfunc main() {}\n");
        assert!(matches!(input, Input::Literal(_)));
        assert_eq!(input.file_id("code.go"), "code.go");
    }

    #[test]
    fn test_detect_missing_path_is_literal() {
        let input = Input::detect("/definitely/not/here.go");
        assert_eq!(input, Input::Literal("/definitely/not/here.go".to_string()));
    }

    #[test]
    fn test_file_id_is_base_name() {
        let input = Input::File(PathBuf::from("pkg/getcomments/extract.go"));
        assert_eq!(input.file_id("code.go"), "extract.go");
    }

    #[test]
    fn test_read_source_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(dir.path()).unwrap_err();
        match err {
            ExtractError::Read { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("expected read error, got {other:?}"),
        }
    }
}
