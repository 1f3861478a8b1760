pub mod common;
pub mod python;

use crate::core::error::{AnalysisError, Result};
use crate::core::Definitions;

/// An import statement as written, before any filesystem resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    /// Dotted module path; empty for `from . import x`.
    pub module: String,
    /// Number of leading dots of a relative import, 0 for absolute imports.
    pub level: usize,
    /// Names listed after `import` in a `from` statement.
    pub names: Vec<String>,
}

impl RawImport {
    pub fn absolute(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            level: 0,
            names: Vec::new(),
        }
    }

    pub fn is_relative(&self) -> bool {
        self.level > 0
    }
}

/// Definitions and imports of one file, taken from a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSyntax {
    pub definitions: Definitions,
    pub imports: Vec<RawImport>,
}

/// Per-language syntax extraction. Every method works on the source text of
/// one file and never fails: unparseable input yields `None` or nothing.
pub trait LanguageParser {
    /// Top-level definitions and module-level imports, or `None` when the
    /// source does not parse.
    fn extract_module(&self, source: &str) -> Option<ModuleSyntax>;

    /// Identifiers in call position anywhere in the file, repeats included.
    fn extract_usages(&self, source: &str) -> Vec<String>;

    fn language_name(&self) -> &str;

    /// Top-level classes, functions and variables, or `None` when the source
    /// does not parse.
    fn extract_definitions(&self, source: &str) -> Option<Definitions> {
        self.extract_module(source).map(|module| module.definitions)
    }

    /// Module-level imports as written.
    fn extract_imports(&self, source: &str) -> Vec<RawImport> {
        self.extract_module(source)
            .map(|module| module.imports)
            .unwrap_or_default()
    }
}

pub struct ParserFactory;

impl ParserFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_parser(&self, language: &str) -> Result<Box<dyn LanguageParser + Send + Sync>> {
        match language {
            "python" => Ok(Box::new(python::PythonParser::new()?)),
            _ => Err(AnalysisError::UnsupportedLanguage(language.to_string())),
        }
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}
