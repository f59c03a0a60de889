//! Platform song normalizer.
//!
//! Maps a raw export record (an arbitrary JSON object) onto the typed record
//! for its platform. Known keys are copied into the typed fields; unknown
//! keys are dropped. A record must carry a non-empty `title`; records that
//! do not are reported as [`SkippedRecord`]s rather than discarded silently.
//!
//! Records are not de-duplicated here. Two records with the same title on
//! one platform both come out of the normalizer; the reconciler decides
//! which one joins the catalog.

use serde_json::{Map, Value};
use thiserror::Error;

use arcadex_core::{
    ChunithmSong, MaimaiSong, OngekiSong, Platform, PlatformSong, SongAttributes,
};

/// A raw record from a platform export.
pub type RawRecord = Map<String, Value>;

/// Why a record was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SkipReason {
    #[error("record has no title")]
    MissingTitle,
    #[error("record title is empty")]
    EmptyTitle,
    #[error("record is not a JSON object")]
    NotAnObject,
}

/// A record the pipeline did not use, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{platform} record #{index} skipped: {reason}")]
pub struct SkippedRecord {
    pub platform: Platform,
    /// Zero-based position in the platform's source.
    pub index: usize,
    pub reason: SkipReason,
}

/// Normalized records of one platform plus everything that was skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub songs: Vec<PlatformSong>,
    pub skipped: Vec<SkippedRecord>,
}

/// Typed view over the scalar fields of a raw record.
struct Fields<'a>(&'a RawRecord);

impl Fields<'_> {
    /// Text value of `key`. Numbers and booleans are rendered as text;
    /// `null`, arrays and objects count as absent.
    fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Integer value of `key`, from a JSON integer or a numeric string.
    fn integer(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn title(&self) -> Result<String, SkipReason> {
        let title = self.text("title").ok_or(SkipReason::MissingTitle)?;
        if title.trim().is_empty() {
            return Err(SkipReason::EmptyTitle);
        }
        Ok(title)
    }

    fn attributes(&self) -> Result<SongAttributes, SkipReason> {
        Ok(SongAttributes {
            id: self.text("id"),
            title: self.title()?,
            artist: self.text("artist"),
            title_hiragana: self.text("title_hiragana"),
            title_kana: self.text("title_kana"),
            title_katakana: self.text("title_katakana"),
            title_romaji: self.text("title_romaji"),
            category_id: self.integer("category_id"),
            platform_id: self.integer("platform_id"),
            image_url: self.text("image_url"),
            image: self.text("image"),
        })
    }
}

/// Normalize one raw record according to `platform`'s schema.
pub fn normalize(raw: &RawRecord, platform: Platform) -> Result<PlatformSong, SkipReason> {
    let fields = Fields(raw);
    let song = fields.attributes()?;

    let normalized = match platform {
        Platform::Chunithm => PlatformSong::Chunithm(chunithm(&fields, song)),
        Platform::Maimai => PlatformSong::Maimai(maimai(&fields, song)),
        Platform::Ongeki => PlatformSong::Ongeki(ongeki(&fields, song)),
    };
    Ok(normalized)
}

/// Normalize every entry of a platform export, collecting skips.
pub fn normalize_all(
    records: impl IntoIterator<Item = Value>,
    platform: Platform,
) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for (index, record) in records.into_iter().enumerate() {
        let result = match &record {
            Value::Object(raw) => normalize(raw, platform),
            _ => Err(SkipReason::NotAnObject),
        };

        match result {
            Ok(song) => batch.songs.push(song),
            Err(reason) => {
                let skipped = SkippedRecord {
                    platform,
                    index,
                    reason,
                };
                log::warn!("{skipped}");
                batch.skipped.push(skipped);
            }
        }
    }

    log::info!(
        "Normalized {} {} records ({} skipped)",
        batch.songs.len(),
        platform,
        batch.skipped.len()
    );
    batch
}

fn chunithm(f: &Fields<'_>, song: SongAttributes) -> ChunithmSong {
    ChunithmSong {
        song,
        catname: f.text("catname"),
        newflag: f.text("newflag"),
        reading: f.text("reading"),
        lev_bas: f.text("lev_bas"),
        lev_adv: f.text("lev_adv"),
        lev_exp: f.text("lev_exp"),
        lev_mas: f.text("lev_mas"),
        lev_ult: f.text("lev_ult"),
        we_kanji: f.text("we_kanji"),
        we_star: f.text("we_star"),
    }
}

fn maimai(f: &Fields<'_>, song: SongAttributes) -> MaimaiSong {
    MaimaiSong {
        song,
        kanji: f.text("kanji"),
        catcode: f.text("catcode"),
        release: f.text("release"),
        sort: f.text("sort"),
        version: f.text("version"),
        lev_bas: f.text("lev_bas"),
        lev_adv: f.text("lev_adv"),
        lev_exp: f.text("lev_exp"),
        lev_mas: f.text("lev_mas"),
        lev_remas: f.text("lev_remas"),
        lev_utage: f.text("lev_utage"),
        dx_lev_bas: f.text("dx_lev_bas"),
        dx_lev_adv: f.text("dx_lev_adv"),
        dx_lev_exp: f.text("dx_lev_exp"),
        dx_lev_mas: f.text("dx_lev_mas"),
        dx_lev_remas: f.text("dx_lev_remas"),
        key: f.text("key"),
        date: f.text("date"),
        comment: f.text("comment"),
        buddy: f.text("buddy"),
    }
}

fn ongeki(f: &Fields<'_>, song: SongAttributes) -> OngekiSong {
    OngekiSong {
        song,
        title_sort: f.text("title_sort"),
        new: f.text("new"),
        date: f.text("date"),
        chap_id: f.text("chap_id"),
        chapter: f.text("chapter"),
        character: f.text("character"),
        chara_id: f.text("chara_id"),
        category: f.text("category"),
        category_code: f.text("category_id"),
        lunatic: f.text("lunatic"),
        bonus: f.text("bonus"),
        copyright1: f.text("copyright1"),
        lev_bas: f.text("lev_bas"),
        lev_adv: f.text("lev_adv"),
        lev_exc: f.text("lev_exc"),
        lev_mas: f.text("lev_mas"),
        lev_lnt: f.text("lev_lnt"),
    }
}
