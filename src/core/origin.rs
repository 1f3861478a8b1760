use super::model::{OriginEntry, OriginMap, ReferenceMap, SymbolKind};

/// Invert the reference map: symbol name -> every (file, kind) defining it.
///
/// Files are visited in reference map order; within a file functions come
/// first, then variables, then each class followed by its methods.
/// Duplicates are kept.
pub fn build_origin_map(reference_map: &ReferenceMap) -> OriginMap {
    let mut origin_map = OriginMap::new();

    for (file, record) in reference_map {
        let defs = &record.definitions;
        let mut push = |name: &str, kind: SymbolKind| {
            origin_map
                .entry(name.to_string())
                .or_default()
                .push(OriginEntry::new(file.as_str(), kind));
        };

        for function in &defs.functions {
            push(function, SymbolKind::Function);
        }
        for variable in &defs.variables {
            push(variable, SymbolKind::Variable);
        }
        for class in &defs.classes {
            push(&class.name, SymbolKind::Class);
            for method in &class.methods {
                push(method, SymbolKind::Method);
            }
        }
    }

    origin_map
}
