use dashmap::DashMap;
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

use super::imports::ImportResolver;
use super::model::{ReferenceMap, ReferenceRecord, UsageMap};
use super::scanner::FileInfo;
use crate::parsers::common::read_source;
use crate::parsers::LanguageParser;

pub type SharedParser = dyn LanguageParser + Send + Sync;

/// Definitions and resolved imports for every file that parses.
pub fn build_reference_map(
    files: &[FileInfo],
    parser: &SharedParser,
    resolver: &ImportResolver,
    parallel: bool,
) -> ReferenceMap {
    let extract = |file: &FileInfo| -> Option<(String, ReferenceRecord)> {
        let source = read_file(file)?;
        let Some(module) = parser.extract_module(&source) else {
            debug!(file = %file.relative_path, "no definitions: file does not parse");
            return None;
        };
        Some((
            file.relative_path.clone(),
            ReferenceRecord {
                imports: resolver.resolve(&file.path, &module.imports),
                definitions: module.definitions,
            },
        ))
    };

    let records: Vec<(String, ReferenceRecord)> = if parallel {
        files.par_iter().filter_map(extract).collect()
    } else {
        files.iter().filter_map(extract).collect()
    };

    records.into_iter().collect()
}

/// Identifier -> set of files calling it.
pub fn build_usage_map(files: &[FileInfo], parser: &SharedParser, parallel: bool) -> UsageMap {
    let usage_map: DashMap<String, BTreeSet<String>> = DashMap::new();

    let record = |file: &FileInfo| {
        let Some(source) = read_file(file) else {
            return;
        };
        let names: BTreeSet<String> = parser.extract_usages(&source).into_iter().collect();
        for name in names {
            usage_map
                .entry(name)
                .or_default()
                .insert(file.relative_path.clone());
        }
    };

    if parallel {
        files.par_iter().for_each(record);
    } else {
        files.iter().for_each(record);
    }

    usage_map.into_iter().collect()
}

fn read_file(file: &FileInfo) -> Option<String> {
    match read_source(&file.path) {
        Ok(source) => Some(source),
        Err(err) => {
            debug!(file = %file.relative_path, error = %err, "skipping unreadable file");
            None
        }
    }
}
