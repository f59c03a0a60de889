//! Catalog pipeline for arcadex.
//!
//! Loads per-platform song exports, normalizes them into typed records,
//! reconciles the three platforms into one title-keyed catalog, and imports
//! songs into the catalog API one request at a time.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod import;
pub mod list;
pub mod normalize;
pub mod reconcile;
pub mod source;

pub use catalog::{CatalogApi, CatalogClient, CreateOutcome};
pub use config::{Config, Credentials};
pub use error::{ImportError, ImportResult};
pub use import::{load_export_songs, ExportSongs, ImportFailure, ImportReport, Importer};
pub use normalize::{normalize, normalize_all, NormalizedBatch, SkipReason, SkippedRecord};
pub use reconcile::{reconcile, ArcadeSong, OverlapStats, PlatformSets, Reconciliation};
