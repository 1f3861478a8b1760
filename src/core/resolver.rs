use super::model::{CrossReferenceEdge, OriginMap, UsageMap};

/// Join call sites against definitions by name.
///
/// Every (calling file, origin) pair yields one edge unless both sides are
/// the same file. Names never defined in the tree produce nothing. No
/// attempt is made to pick one origin among several same-named ones.
pub fn resolve_cross_references(
    usage_map: &UsageMap,
    origin_map: &OriginMap,
) -> Vec<CrossReferenceEdge> {
    let mut edges = Vec::new();

    for (symbol, usage_files) in usage_map {
        let Some(origins) = origin_map.get(symbol) else {
            continue;
        };

        for used_in in usage_files {
            for origin in origins {
                if *used_in == origin.file {
                    continue;
                }
                edges.push(CrossReferenceEdge {
                    symbol: symbol.clone(),
                    symbol_kind: origin.kind,
                    used_in: used_in.clone(),
                    defined_in: origin.file.clone(),
                });
            }
        }
    }

    edges
}
