//! Sequential import into the catalog API.
//!
//! Requests go out strictly one at a time, in input order, with a fixed
//! courtesy delay between consecutive requests. A failed or conflicting
//! request is counted and the batch carries on.

use std::path::Path;
use std::time::Duration;

use arcadex_core::{CatalogSong, Platform};

use crate::catalog::{CatalogApi, CreateOutcome};
use crate::error::ImportResult;
use crate::normalize::{normalize_all, SkippedRecord};
use crate::source::load_platform_source;

/// Catalog payloads built from one platform export.
#[derive(Debug, Clone, Default)]
pub struct ExportSongs {
    pub songs: Vec<CatalogSong>,
    pub skipped: Vec<SkippedRecord>,
}

/// Load a platform export and turn its records into catalog payloads.
///
/// Records without a usable title are reported in `skipped`. Songs with no
/// category of their own get the platform's default category.
pub fn load_export_songs(path: &Path, platform: Platform) -> ImportResult<ExportSongs> {
    let records = load_platform_source(path)?;
    let batch = normalize_all(records, platform);

    Ok(ExportSongs {
        songs: batch.songs.iter().map(CatalogSong::from).collect(),
        skipped: batch.skipped,
    })
}

/// A song the catalog did not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    /// Zero-based position in the batch.
    pub index: usize,
    pub title: String,
    pub message: String,
    /// Whether issuing the request again later may succeed.
    pub transient: bool,
}

/// Aggregate outcome of one import batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub total: usize,
    pub created: usize,
    pub already_exists: usize,
    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Feeds songs to a [`CatalogApi`] one request at a time.
#[derive(Debug)]
pub struct Importer<C> {
    catalog: C,
    delay: Duration,
}

impl<C: CatalogApi> Importer<C> {
    #[must_use]
    pub fn new(catalog: C, delay: Duration) -> Self {
        Self { catalog, delay }
    }

    /// Import `songs` in order, sleeping between requests.
    pub async fn import_all(&self, songs: &[CatalogSong]) -> ImportReport {
        let mut report = ImportReport {
            total: songs.len(),
            ..ImportReport::default()
        };

        for (index, song) in songs.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            log::info!(
                "Importing {}/{}: {} - {}",
                index + 1,
                songs.len(),
                song.title,
                song.artist
            );

            match self.catalog.create_song(song).await {
                Ok(CreateOutcome::Created) => report.created += 1,
                Ok(CreateOutcome::AlreadyExists) => {
                    log::info!("Already cataloged: {}", song.title);
                    report.already_exists += 1;
                }
                Err(e) => {
                    log::warn!("Failed to import {}: {}", song.title, e);
                    report.failures.push(ImportFailure {
                        index,
                        title: song.title.clone(),
                        message: e.to_string(),
                        transient: e.is_transient(),
                    });
                }
            }
        }

        log::info!(
            "Import finished: {} created, {} already present, {} failed",
            report.created,
            report.already_exists,
            report.failures.len()
        );
        report
    }
}
