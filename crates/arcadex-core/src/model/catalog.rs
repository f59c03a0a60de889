use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::platform_song::PlatformSong;

/// Category used for entries that arrive without one ("POPS & ANIME").
pub const DEFAULT_CATEGORY_ID: i64 = 1;

/// `FromPlatform` value for songs that do not come from a video or store
/// platform.
pub const PLATFORM_OTHER: i64 = 0;

/// The song payload accepted by the catalog API's create endpoint.
///
/// Field names follow the API's PascalCase JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogSong {
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_hiragana: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_katakana: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_romaji: Option<String>,
    pub category_id: i64,
    pub from_platform: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Unix timestamp (seconds) of when the entry was created.
    pub add_time: i64,
}

impl CatalogSong {
    #[must_use]
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            title_hiragana: None,
            title_katakana: None,
            title_romaji: None,
            category_id: DEFAULT_CATEGORY_ID,
            from_platform: PLATFORM_OTHER,
            image_url: None,
            add_time: Utc::now().timestamp(),
        }
    }

    #[must_use]
    pub fn with_category_id(mut self, category_id: i64) -> Self {
        self.category_id = category_id;
        self
    }
}

impl From<&PlatformSong> for CatalogSong {
    fn from(song: &PlatformSong) -> Self {
        let attrs = song.attributes();
        Self {
            title: attrs.title.clone(),
            artist: attrs.artist.clone().unwrap_or_default(),
            title_hiragana: attrs.title_hiragana.clone(),
            title_katakana: attrs
                .title_katakana
                .clone()
                .or_else(|| attrs.title_kana.clone()),
            title_romaji: attrs.title_romaji.clone(),
            category_id: attrs
                .category_id
                .unwrap_or_else(|| song.platform().default_category_id()),
            from_platform: attrs.platform_id.unwrap_or(PLATFORM_OTHER),
            image_url: attrs.image_ref().map(String::from),
            add_time: Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChunithmSong, SongAttributes};

    #[test]
    fn test_catalog_song_uses_pascal_case() {
        let song = CatalogSong::new("Title", "Artist");
        let json = serde_json::to_value(&song).unwrap();

        assert_eq!(json["Title"], "Title");
        assert_eq!(json["Artist"], "Artist");
        assert_eq!(json["CategoryId"], DEFAULT_CATEGORY_ID);
        assert_eq!(json["FromPlatform"], PLATFORM_OTHER);
        assert!(json.get("AddTime").is_some());
        assert!(json.get("ImageUrl").is_none());
    }

    #[test]
    fn test_from_platform_song_falls_back_to_platform_category() {
        let song: PlatformSong = ChunithmSong::new(
            SongAttributes::new("Aleph-0").with_image_url("https://example.com/a.png"),
        )
        .into();

        let catalog = CatalogSong::from(&song);
        assert_eq!(catalog.title, "Aleph-0");
        assert_eq!(catalog.artist, "");
        assert_eq!(catalog.category_id, 7);
        assert_eq!(catalog.image_url.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_from_platform_song_keeps_explicit_category() {
        let song: PlatformSong =
            ChunithmSong::new(SongAttributes::new("x").with_category_id(3)).into();
        assert_eq!(CatalogSong::from(&song).category_id, 3);
    }

    #[test]
    fn test_with_category_id_overrides_default() {
        let song = CatalogSong::new("Title", "Artist").with_category_id(4);
        assert_eq!(song.category_id, 4);
        assert_eq!(serde_json::to_value(&song).unwrap()["CategoryId"], 4);
    }
}
