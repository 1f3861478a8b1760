use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failures that abort an analysis run.
///
/// Per-file problems (unparseable source, unresolvable imports, calls to
/// names defined nowhere in the tree) are not errors; they only leave gaps
/// in the produced maps.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("project root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("project root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("failed to initialise parser: {0}")]
    Parser(#[from] tree_sitter::LanguageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
