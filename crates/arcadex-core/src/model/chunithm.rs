use serde::{Deserialize, Serialize};

use crate::model::song::SongAttributes;

/// A song as exported by the Chunithm official music list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChunithmSong {
    #[serde(flatten)]
    pub song: SongAttributes,

    /// Genre label (e.g. "POPS & ANIME").
    pub catname: Option<String>,
    pub newflag: Option<String>,
    /// Kana reading used for in-game sorting.
    pub reading: Option<String>,

    pub lev_bas: Option<String>,
    pub lev_adv: Option<String>,
    pub lev_exp: Option<String>,
    pub lev_mas: Option<String>,
    pub lev_ult: Option<String>,

    /// World's End kanji marker and star rating.
    pub we_kanji: Option<String>,
    pub we_star: Option<String>,
}

impl ChunithmSong {
    #[must_use]
    pub fn new(song: SongAttributes) -> Self {
        Self {
            song,
            ..Self::default()
        }
    }
}
