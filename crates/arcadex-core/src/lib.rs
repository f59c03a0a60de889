//! Core domain model for arcadex.
//!
//! This crate defines the song records carried by the three arcade
//! platforms (Chunithm, maimai, Ongeki), the tagged [`PlatformSong`] that
//! lets them travel together, and the [`CatalogSong`] payload accepted by
//! the catalog API.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    CatalogSong, ChunithmSong, MaimaiSong, OngekiSong, Platform, PlatformSong, SongAttributes,
};
