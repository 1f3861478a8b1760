use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Kind of a definition a symbol name resolves to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
    Method,
    Variable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    /// Method names in source order.
    pub methods: Vec<String>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }
}

/// Top-level definitions of one source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Definitions {
    pub classes: Vec<ClassDef>,
    pub functions: BTreeSet<String>,
    pub variables: BTreeSet<String>,
}

impl Definitions {
    /// Every name this file defines: functions, variables, class names and
    /// method names. May contain repeats when a class and a method share a name.
    pub fn defined_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .functions
            .iter()
            .chain(self.variables.iter())
            .map(String::as_str)
            .collect();
        for class in &self.classes {
            names.push(&class.name);
            names.extend(class.methods.iter().map(String::as_str));
        }
        names
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty() && self.variables.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceRecord {
    pub imports: BTreeSet<String>,
    pub definitions: Definitions,
}

/// Relative path -> definitions and resolved imports of that file.
pub type ReferenceMap = BTreeMap<String, ReferenceRecord>;

/// Identifier -> files calling it.
pub type UsageMap = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OriginEntry {
    pub file: String,
    #[serde(rename = "type")]
    pub kind: SymbolKind,
}

impl OriginEntry {
    pub fn new(file: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            file: file.into(),
            kind,
        }
    }
}

/// Symbol name -> every place defining it, duplicates kept.
pub type OriginMap = BTreeMap<String, Vec<OriginEntry>>;

/// A call of `symbol` in `used_in` matched against a definition in `defined_in`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrossReferenceEdge {
    pub symbol: String,
    #[serde(rename = "symbol_type")]
    pub symbol_kind: SymbolKind,
    pub used_in: String,
    pub defined_in: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombinedEntry {
    pub imports: BTreeSet<String>,
    pub definitions: Definitions,
    pub usage: BTreeMap<String, Vec<String>>,
}

pub type CombinedView = BTreeMap<String, CombinedEntry>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryEntry {
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

pub type ContentInventory = BTreeMap<String, InventoryEntry>;

/// Every artifact of one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub reference_map: ReferenceMap,
    pub usage_map: UsageMap,
    pub origin_map: OriginMap,
    pub combined: CombinedView,
    pub cross_reference: Vec<CrossReferenceEdge>,
    pub inventory: ContentInventory,
}
