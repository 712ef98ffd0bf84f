//! Bulk import and reset commands

use anyhow::{anyhow, Context, Result};
use libapp_core::{CatalogEntry, CatalogService};
use std::path::Path;

/// Replace the catalog with the books listed in a JSON file
pub fn import(service: &mut CatalogService, file: &Path) -> Result<()> {
    let data = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let entries: Vec<CatalogEntry> = serde_json::from_str(&data)
        .with_context(|| format!("{} is not a JSON array of books", file.display()))?;

    for (index, entry) in entries.iter().enumerate() {
        entry
            .validate()
            .map_err(|reason| anyhow!("Entry {} in {}: {}", index + 1, file.display(), reason))?;
    }

    let imported = service.import_catalog(entries)?;
    println!("Imported {} books.", imported.len());
    Ok(())
}

/// Clear the catalog
pub fn reset(service: &mut CatalogService) -> Result<()> {
    service.reset_catalog()?;
    println!("Catalog cleared.");
    Ok(())
}
