use serde::{Deserialize, Serialize};

use crate::model::chunithm::ChunithmSong;
use crate::model::maimai::MaimaiSong;
use crate::model::ongeki::OngekiSong;
use crate::model::platform::Platform;
use crate::model::song::SongAttributes;

/// A normalized song record from exactly one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum PlatformSong {
    Chunithm(ChunithmSong),
    Maimai(MaimaiSong),
    Ongeki(OngekiSong),
}

impl PlatformSong {
    #[must_use]
    pub const fn platform(&self) -> Platform {
        match self {
            Self::Chunithm(_) => Platform::Chunithm,
            Self::Maimai(_) => Platform::Maimai,
            Self::Ongeki(_) => Platform::Ongeki,
        }
    }

    #[must_use]
    pub const fn attributes(&self) -> &SongAttributes {
        match self {
            Self::Chunithm(s) => &s.song,
            Self::Maimai(s) => &s.song,
            Self::Ongeki(s) => &s.song,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.attributes().title
    }
}

impl From<ChunithmSong> for PlatformSong {
    fn from(song: ChunithmSong) -> Self {
        Self::Chunithm(song)
    }
}

impl From<MaimaiSong> for PlatformSong {
    fn from(song: MaimaiSong) -> Self {
        Self::Maimai(song)
    }
}

impl From<OngekiSong> for PlatformSong {
    fn from(song: OngekiSong) -> Self {
        Self::Ongeki(song)
    }
}
