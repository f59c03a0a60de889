use anyhow::{Context, Result};
use arcadex_core::{CatalogSong, Platform};
use arcadex_etl::list::load_list;
use arcadex_etl::{load_export_songs, CatalogClient, Config, Importer};
use std::path::Path;

/// What the input file holds.
#[derive(Debug, Clone, Copy)]
pub enum ImportSource {
    /// A flat `"title","artist"` list, with an optional category for every song.
    List { category_id: Option<i64> },
    /// A platform export, normalized before import.
    Export(Platform),
}

pub async fn run_import(
    config_path: &Path,
    input: &Path,
    source: ImportSource,
    api_url: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let config = Config::load_from(config_path)?;

    let songs = match source {
        ImportSource::List { category_id } => read_list(input, category_id)?,
        ImportSource::Export(platform) => {
            let export = load_export_songs(input, platform)
                .with_context(|| format!("Failed to read {} export {}", platform, input.display()))?;
            for record in &export.skipped {
                println!("  ✗ {record}");
            }
            export.songs
        }
    };

    if dry_run {
        for song in &songs {
            println!("  {} - {} (category {})", song.title, song.artist, song.category_id);
        }
        println!("\n{} songs would be imported", songs.len());
        return Ok(());
    }

    let client = CatalogClient::from_config(&config, api_url.as_deref())
        .context("Cannot create the catalog client; run 'arcadex keygen' first")?;
    let importer = Importer::new(client, config.request_delay());
    let report = importer.import_all(&songs).await;

    println!("\n✓ Import complete");
    println!("  Created: {}", report.created);
    println!("  Already present: {}", report.already_exists);
    println!("  Failed: {}", report.failures.len());

    for failure in &report.failures {
        let hint = if failure.transient { " (may succeed on retry)" } else { "" };
        println!("  ✗ #{} {}: {}{}", failure.index + 1, failure.title, failure.message, hint);
    }

    if !report.is_clean() {
        anyhow::bail!("{} of {} songs failed to import", report.failures.len(), report.total);
    }
    Ok(())
}

fn read_list(path: &Path, category_id: Option<i64>) -> Result<Vec<CatalogSong>> {
    let mut list = load_list(path).with_context(|| format!("Failed to read {}", path.display()))?;
    for line in &list.skipped {
        println!("  ✗ line {}: cannot read \"{}\"", line.line, line.content);
    }
    let repeated = list.dedup();
    if repeated > 0 {
        log::info!("Dropped {repeated} repeated entries");
    }

    Ok(list
        .entries
        .iter()
        .map(|e| {
            let song = e.to_catalog_song();
            match category_id {
                Some(id) => song.with_category_id(id),
                None => song,
            }
        })
        .collect())
}
