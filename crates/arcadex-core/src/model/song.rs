use serde::{Deserialize, Serialize};

/// Attributes every platform's song record shares.
///
/// The platform-specific record types embed this and add their own
/// passthrough fields. `title` is the cross-platform join key and is
/// compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SongAttributes {
    /// Identifier assigned by the backing store, if any.
    pub id: Option<String>,
    pub title: String,
    pub artist: Option<String>,

    pub title_hiragana: Option<String>,
    pub title_kana: Option<String>,
    pub title_katakana: Option<String>,
    pub title_romaji: Option<String>,

    pub category_id: Option<i64>,
    pub platform_id: Option<i64>,

    pub image_url: Option<String>,
    pub image: Option<String>,
}

impl SongAttributes {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    #[must_use]
    pub fn with_category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// The best image reference available: the full URL if present,
    /// otherwise the bare image name.
    #[must_use]
    pub fn image_ref(&self) -> Option<&str> {
        self.image_url.as_deref().or(self.image.as_deref())
    }
}
