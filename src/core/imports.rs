use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::parsers::RawImport;

/// Maps import statements onto module files inside the project root.
///
/// Only modules backed by a source file under the root are kept: standard
/// library and installed packages never resolve. Only direct imports are
/// considered.
pub struct ImportResolver {
    root: PathBuf,
    source_suffixes: Vec<String>,
}

impl ImportResolver {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            source_suffixes: vec!["py".to_string()],
        }
    }

    /// Suffixes a module file may carry, tried in order.
    pub fn with_source_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Dotted names of every import of `importer` that resolves to a file.
    pub fn resolve(&self, importer: &Path, imports: &[RawImport]) -> BTreeSet<String> {
        let mut resolved = BTreeSet::new();
        let Some(importer_dir) = importer.parent() else {
            return resolved;
        };

        for import in imports {
            if import.is_relative() {
                self.resolve_relative(importer_dir, import, &mut resolved);
            } else {
                self.resolve_absolute(importer_dir, import, &mut resolved);
            }
        }

        resolved
    }

    fn resolve_absolute(&self, importer_dir: &Path, import: &RawImport, out: &mut BTreeSet<String>) {
        let bases = [self.root.as_path(), importer_dir];
        let mut try_module = |dotted: &str| {
            if bases
                .iter()
                .any(|base| self.locate(base, dotted).is_some())
            {
                out.insert(dotted.to_string());
            }
        };

        try_module(&import.module);
        for name in &import.names {
            try_module(&format!("{}.{}", import.module, name));
        }
    }

    fn resolve_relative(&self, importer_dir: &Path, import: &RawImport, out: &mut BTreeSet<String>) {
        let mut base = importer_dir.to_path_buf();
        for _ in 1..import.level {
            if !base.pop() {
                return;
            }
        }
        if !base.starts_with(&self.root) {
            return;
        }

        let mut candidates = Vec::with_capacity(import.names.len() + 1);
        if !import.module.is_empty() {
            candidates.push(import.module.clone());
        }
        for name in &import.names {
            candidates.push(join_dotted(&import.module, name));
        }

        for dotted in candidates {
            if let Some(file) = self.locate(&base, &dotted) {
                if let Some(name) = self.module_name(&file) {
                    out.insert(name);
                }
            }
        }
    }

    /// `<base>/a/b.<suffix>` or `<base>/a/b/__init__.<suffix>` for any source
    /// suffix, if under the root. Module files win over packages.
    fn locate(&self, base: &Path, dotted: &str) -> Option<PathBuf> {
        if dotted.is_empty() || !base.starts_with(&self.root) {
            return None;
        }
        let mut module_dir = base.to_path_buf();
        module_dir.extend(dotted.split('.'));

        let as_file = self
            .source_suffixes
            .iter()
            .map(|suffix| module_dir.with_extension(suffix))
            .find(|path| path.is_file());
        as_file.or_else(|| {
            self.source_suffixes
                .iter()
                .map(|suffix| module_dir.join(format!("__init__.{suffix}")))
                .find(|path| path.is_file())
        })
    }

    /// Dotted module name of a file below the root: `pkg/__init__.py` is `pkg`.
    fn module_name(&self, file: &Path) -> Option<String> {
        let rel = file.strip_prefix(&self.root).ok()?.with_extension("");
        let mut parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.last().map(String::as_str) == Some("__init__") {
            parts.pop();
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("."))
        }
    }
}

fn join_dotted(module: &str, name: &str) -> String {
    if module.is_empty() {
        name.to_string()
    } else {
        format!("{module}.{name}")
    }
}
