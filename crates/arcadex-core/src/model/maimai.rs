use serde::{Deserialize, Serialize};

use crate::model::song::SongAttributes;

/// A song as exported by the maimai DX official music list.
///
/// Standard and DX charts of the same song share one record; the `dx_`
/// prefixed levels belong to the DX chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaimaiSong {
    #[serde(flatten)]
    pub song: SongAttributes,

    pub kanji: Option<String>,
    pub catcode: Option<String>,
    pub release: Option<String>,
    pub sort: Option<String>,
    pub version: Option<String>,

    pub lev_bas: Option<String>,
    pub lev_adv: Option<String>,
    pub lev_exp: Option<String>,
    pub lev_mas: Option<String>,
    pub lev_remas: Option<String>,
    pub lev_utage: Option<String>,

    pub dx_lev_bas: Option<String>,
    pub dx_lev_adv: Option<String>,
    pub dx_lev_exp: Option<String>,
    pub dx_lev_mas: Option<String>,
    pub dx_lev_remas: Option<String>,

    pub key: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,
    pub buddy: Option<String>,
}

impl MaimaiSong {
    #[must_use]
    pub fn new(song: SongAttributes) -> Self {
        Self {
            song,
            ..Self::default()
        }
    }
}

