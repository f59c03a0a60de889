use anyhow::{Context, Result};
use arcadex_core::Platform;
use arcadex_etl::source::load_platform_source;
use arcadex_etl::{normalize_all, PlatformSets};
use std::path::Path;

pub fn run_reconcile(
    chunithm: &Path,
    maimai: &Path,
    ongeki: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let mut sets = PlatformSets::default();
    let mut skipped = Vec::new();

    // Snapshot every source before joining
    for (platform, path) in [
        (Platform::Chunithm, chunithm),
        (Platform::Maimai, maimai),
        (Platform::Ongeki, ongeki),
    ] {
        let records = load_platform_source(path)
            .with_context(|| format!("Failed to load {} export {}", platform, path.display()))?;
        let batch = normalize_all(records, platform);
        skipped.extend(batch.skipped);
        sets.extend(batch.songs);
    }

    let result = sets.reconcile();

    println!("\n{}\n", result.stats);

    let skipped_total = skipped.len() + result.skipped.len();
    if skipped_total > 0 {
        println!("Skipped records: {skipped_total}");
        for record in skipped.iter().chain(&result.skipped) {
            println!("  - {record}");
        }
    }

    if !result.duplicates.is_empty() {
        println!("Duplicate titles (first record kept): {}", result.duplicates.len());
        for dup in &result.duplicates {
            println!("  - [{}] {}", dup.platform, dup.title);
        }
    }

    if let Some(path) = output {
        result
            .write_json(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\n✓ Wrote {} entries to {}", result.entries.len(), path.display());
    }

    Ok(())
}
