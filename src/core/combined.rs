use super::model::{CombinedEntry, CombinedView, ReferenceMap, UsageMap};

/// Per-file view: own definitions plus where each defined name is called.
pub fn build_combined_view(reference_map: &ReferenceMap, usage_map: &UsageMap) -> CombinedView {
    reference_map
        .iter()
        .map(|(file, record)| {
            let usage = record
                .definitions
                .defined_names()
                .into_iter()
                .map(|name| {
                    let callers = usage_map
                        .get(name)
                        .map(|files| files.iter().cloned().collect())
                        .unwrap_or_default();
                    (name.to_string(), callers)
                })
                .collect();

            let entry = CombinedEntry {
                imports: record.imports.clone(),
                definitions: record.definitions.clone(),
                usage,
            };
            (file.clone(), entry)
        })
        .collect()
}
