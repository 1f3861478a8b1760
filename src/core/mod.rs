pub mod analyzer;
pub mod combined;
pub mod config;
pub mod error;
pub mod graph;
pub mod imports;
pub mod inventory;
pub mod maps;
pub mod model;
pub mod origin;
pub mod resolver;
pub mod scanner;

pub use analyzer::ProjectAnalyzer;
pub use combined::build_combined_view;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use graph::{Coupling, CouplingGraph, CouplingGraphBuilder};
pub use imports::ImportResolver;
pub use inventory::build_inventory;
pub use maps::{build_reference_map, build_usage_map};
pub use model::{
    AnalysisReport, ClassDef, CombinedEntry, CombinedView, ContentInventory, CrossReferenceEdge,
    Definitions, InventoryEntry, OriginEntry, OriginMap, ReferenceMap, ReferenceRecord,
    SymbolKind, UsageMap,
};
pub use origin::build_origin_map;
pub use resolver::resolve_cross_references;
pub use scanner::{FileInfo, FileScanner};
