use serde::{Deserialize, Serialize};

use crate::model::song::SongAttributes;

/// A song as exported by the Ongeki official music list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OngekiSong {
    #[serde(flatten)]
    pub song: SongAttributes,

    pub title_sort: Option<String>,
    pub new: Option<String>,
    pub date: Option<String>,

    pub chap_id: Option<String>,
    pub chapter: Option<String>,
    pub character: Option<String>,
    pub chara_id: Option<String>,

    pub category: Option<String>,
    /// Ongeki's own category code. The export reuses the `category_id` key
    /// for this, so it is kept as text next to the numeric catalog id.
    pub category_code: Option<String>,

    pub lunatic: Option<String>,
    pub bonus: Option<String>,
    pub copyright1: Option<String>,

    pub lev_bas: Option<String>,
    pub lev_adv: Option<String>,
    pub lev_exc: Option<String>,
    pub lev_mas: Option<String>,
    pub lev_lnt: Option<String>,
}

impl OngekiSong {
    #[must_use]
    pub fn new(song: SongAttributes) -> Self {
        Self {
            song,
            ..Self::default()
        }
    }
}

