use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use super::combined::build_combined_view;
use super::config::AnalysisConfig;
use super::error::Result;
use super::imports::ImportResolver;
use super::inventory::build_inventory;
use super::maps::{build_reference_map, build_usage_map};
use super::model::AnalysisReport;
use super::origin::build_origin_map;
use super::resolver::resolve_cross_references;
use super::scanner::FileScanner;
use crate::parsers::{LanguageParser, ParserFactory};

pub struct ProjectAnalyzer {
    config: AnalysisConfig,
    file_scanner: FileScanner,
    parser: Box<dyn LanguageParser + Send + Sync>,
}

impl ProjectAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let parser = ParserFactory::new().get_parser(&config.language)?;
        Ok(Self {
            config,
            file_scanner: FileScanner::new(),
            parser,
        })
    }

    /// Run every stage over `root_path`. Only a missing or unreadable root
    /// fails the run.
    pub fn analyze(&self, root_path: &Path) -> Result<AnalysisReport> {
        let start = Instant::now();

        let files = self
            .file_scanner
            .scan_directory(root_path, &self.config.source_suffixes)?;
        info!(
            files = files.len(),
            language = self.parser.language_name(),
            root = %root_path.display(),
            "scanned source files"
        );

        let resolver = ImportResolver::new(root_path)
            .with_source_suffixes(self.config.source_suffixes.iter().cloned());

        let reference_map =
            build_reference_map(&files, self.parser.as_ref(), &resolver, self.config.parallel);
        let skipped = files.len() - reference_map.len();
        info!(
            parsed = reference_map.len(),
            skipped, "built reference map"
        );

        let usage_map = build_usage_map(&files, self.parser.as_ref(), self.config.parallel);
        info!(symbols = usage_map.len(), "built usage map");

        let combined = build_combined_view(&reference_map, &usage_map);

        let origin_map = build_origin_map(&reference_map);
        debug!(symbols = origin_map.len(), "built origin map");

        let cross_reference = resolve_cross_references(&usage_map, &origin_map);
        info!(edges = cross_reference.len(), "resolved cross references");

        let inventory = build_inventory(root_path, &self.config)?;
        debug!(entries = inventory.len(), "built content inventory");

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "analysis complete"
        );

        Ok(AnalysisReport {
            reference_map,
            usage_map,
            origin_map,
            combined,
            cross_reference,
            inventory,
        })
    }
}
