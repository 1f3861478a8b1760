use std::path::Path;
use tracing::warn;

use super::config::AnalysisConfig;
use super::error::Result;
use super::model::{ContentInventory, InventoryEntry};
use super::scanner::FileScanner;
use crate::parsers::common::read_source;

/// Path, name and type of every source and asset file; source files also
/// carry their text.
pub fn build_inventory(root: &Path, config: &AnalysisConfig) -> Result<ContentInventory> {
    let files = FileScanner::new().scan_directory(root, &config.inventory_suffixes())?;

    let mut inventory = ContentInventory::new();
    for file in files {
        let content = if config.source_suffixes.contains(&file.extension) {
            match read_source(&file.path) {
                Ok(content) => Some(content),
                Err(err) => {
                    warn!(file = %file.relative_path, error = %err, "listing file without content");
                    None
                }
            }
        } else {
            None
        };

        let entry = InventoryEntry {
            path: file.relative_path.clone(),
            name: file.file_name(),
            file_type: format!(".{}", file.extension),
            content,
        };
        inventory.insert(file.relative_path, entry);
    }

    Ok(inventory)
}
