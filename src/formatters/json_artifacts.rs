use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::AnalysisReport;

pub const REFERENCE_MAP_FILE: &str = "reference_map.json";
pub const USAGE_MAP_FILE: &str = "usage_map.json";
pub const COMBINED_MAP_FILE: &str = "combined_map.json";
pub const CROSS_REFERENCE_FILE: &str = "cross_reference.json";
pub const INVENTORY_FILE: &str = "repo_summary.json";

/// Locations of the artifacts written for one run.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub reference_map: PathBuf,
    pub usage_map: PathBuf,
    pub combined_map: PathBuf,
    pub cross_reference: PathBuf,
    pub inventory: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            reference_map: dir.join(REFERENCE_MAP_FILE),
            usage_map: dir.join(USAGE_MAP_FILE),
            combined_map: dir.join(COMBINED_MAP_FILE),
            cross_reference: dir.join(CROSS_REFERENCE_FILE),
            inventory: dir.join(INVENTORY_FILE),
        }
    }

    pub fn all(&self) -> [&Path; 5] {
        [
            self.reference_map.as_path(),
            self.usage_map.as_path(),
            self.combined_map.as_path(),
            self.cross_reference.as_path(),
            self.inventory.as_path(),
        ]
    }
}

/// Writes each artifact of an [`AnalysisReport`] as its own JSON file.
pub struct JsonArtifactWriter {
    /// Pretty-print (default) or emit minimal JSON
    pretty: bool,
}

impl JsonArtifactWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn write_all(&self, report: &AnalysisReport, output_dir: &Path) -> Result<ArtifactPaths> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("creating output directory {}", output_dir.display()))?;
        let paths = ArtifactPaths::in_dir(output_dir);

        self.write_json(&report.reference_map, &paths.reference_map)?;
        self.write_json(&report.usage_map, &paths.usage_map)?;
        self.write_json(&report.combined, &paths.combined_map)?;
        self.write_json(&report.cross_reference, &paths.cross_reference)?;
        self.write_json(&report.inventory, &paths.inventory)?;

        Ok(paths)
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, value: &T, path: &Path) -> Result<()> {
        let content = self.render(value)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let content = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(content)
    }
}

impl Default for JsonArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}
