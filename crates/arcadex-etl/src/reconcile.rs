//! Catalog reconciler: joins the three platforms' records by title.
//!
//! The join key is the title exactly as exported. No case folding, trimming
//! or Unicode normalization is applied, so `"Link"` and `"Link "` are two
//! different songs.
//!
//! When one platform lists the same title more than once, the first record
//! is attached and the later ones are reported in
//! [`Reconciliation::duplicates`].

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::Serialize;

use arcadex_core::{ChunithmSong, MaimaiSong, OngekiSong, Platform, PlatformSong};

use crate::normalize::{SkipReason, SkippedRecord};

/// One song across all platforms: the title plus each platform's record,
/// if that platform carries it.
///
/// Built only by [`reconcile`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArcadeSong {
    title: String,
    chunithm: Option<ChunithmSong>,
    maimai: Option<MaimaiSong>,
    ongeki: Option<OngekiSong>,
}

impl ArcadeSong {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn chunithm(&self) -> Option<&ChunithmSong> {
        self.chunithm.as_ref()
    }

    #[must_use]
    pub const fn maimai(&self) -> Option<&MaimaiSong> {
        self.maimai.as_ref()
    }

    #[must_use]
    pub const fn ongeki(&self) -> Option<&OngekiSong> {
        self.ongeki.as_ref()
    }

    /// `true` when `platform` carries this title.
    #[must_use]
    pub const fn on(&self, platform: Platform) -> bool {
        match platform {
            Platform::Chunithm => self.chunithm.is_some(),
            Platform::Maimai => self.maimai.is_some(),
            Platform::Ongeki => self.ongeki.is_some(),
        }
    }

    /// Platforms carrying this title, in reporting order.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        Platform::ALL.into_iter().filter(|p| self.on(*p))
    }
}

/// How the platforms' catalogs overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverlapStats {
    /// Distinct titles across all platforms.
    pub total: usize,

    pub chunithm: usize,
    pub maimai: usize,
    pub ongeki: usize,

    pub chunithm_maimai: usize,
    pub chunithm_ongeki: usize,
    pub maimai_ongeki: usize,

    /// Titles present on all three platforms.
    pub all_three: usize,
}

impl OverlapStats {
    #[must_use]
    pub fn from_entries(entries: &[ArcadeSong]) -> Self {
        let mut stats = Self {
            total: entries.len(),
            ..Self::default()
        };

        for entry in entries {
            let (c, m, o) = (
                entry.on(Platform::Chunithm),
                entry.on(Platform::Maimai),
                entry.on(Platform::Ongeki),
            );
            stats.chunithm += usize::from(c);
            stats.maimai += usize::from(m);
            stats.ongeki += usize::from(o);
            stats.chunithm_maimai += usize::from(c && m);
            stats.chunithm_ongeki += usize::from(c && o);
            stats.maimai_ongeki += usize::from(m && o);
            stats.all_three += usize::from(c && m && o);
        }

        stats
    }

    /// Number of titles carried by `platform`.
    #[must_use]
    pub const fn coverage(&self, platform: Platform) -> usize {
        match platform {
            Platform::Chunithm => self.chunithm,
            Platform::Maimai => self.maimai,
            Platform::Ongeki => self.ongeki,
        }
    }
}

impl fmt::Display for OverlapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total songs: {}", self.total)?;
        writeln!(f)?;
        writeln!(f, "Per platform:")?;
        for platform in Platform::ALL {
            let label = format!("{platform}:");
            writeln!(f, "  {label:<10}{}", self.coverage(platform))?;
        }
        writeln!(f)?;
        writeln!(f, "Shared:")?;
        writeln!(f, "  Chunithm & maimai: {}", self.chunithm_maimai)?;
        writeln!(f, "  Chunithm & Ongeki: {}", self.chunithm_ongeki)?;
        writeln!(f, "  maimai & Ongeki:   {}", self.maimai_ongeki)?;
        write!(f, "  All three:         {}", self.all_three)
    }
}

/// A record that lost to an earlier record with the same title on the same
/// platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateTitle {
    pub platform: Platform,
    pub title: String,
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// One entry per distinct title. Callers must not rely on the order.
    pub entries: Vec<ArcadeSong>,
    pub stats: OverlapStats,
    pub duplicates: Vec<DuplicateTitle>,
    /// Records excluded because their title was empty.
    pub skipped: Vec<SkippedRecord>,
}

impl Reconciliation {
    /// Write the entries as a pretty-printed JSON array.
    pub fn write_json(&self, path: &Path) -> arcadex_core::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Per-platform record sets, as fed to [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSets {
    pub chunithm: Vec<ChunithmSong>,
    pub maimai: Vec<MaimaiSong>,
    pub ongeki: Vec<OngekiSong>,
}

impl PlatformSets {
    #[must_use]
    pub fn reconcile(self) -> Reconciliation {
        reconcile(self.chunithm, self.maimai, self.ongeki)
    }
}

impl FromIterator<PlatformSong> for PlatformSets {
    fn from_iter<I: IntoIterator<Item = PlatformSong>>(iter: I) -> Self {
        let mut sets = Self::default();
        sets.extend(iter);
        sets
    }
}

impl Extend<PlatformSong> for PlatformSets {
    fn extend<I: IntoIterator<Item = PlatformSong>>(&mut self, iter: I) {
        for song in iter {
            match song {
                PlatformSong::Chunithm(s) => self.chunithm.push(s),
                PlatformSong::Maimai(s) => self.maimai.push(s),
                PlatformSong::Ongeki(s) => self.ongeki.push(s),
            }
        }
    }
}

/// Join the three platforms' records into one entry per distinct title.
///
/// Pure function of its inputs: reconciling the same sets twice gives the
/// same entries.
#[must_use]
pub fn reconcile(
    chunithm: Vec<ChunithmSong>,
    maimai: Vec<MaimaiSong>,
    ongeki: Vec<OngekiSong>,
) -> Reconciliation {
    let mut duplicates = Vec::new();
    let mut skipped = Vec::new();

    let mut chunithm = index_by_title(
        chunithm,
        Platform::Chunithm,
        |s| s.song.title.as_str(),
        &mut duplicates,
        &mut skipped,
    );
    let mut maimai = index_by_title(
        maimai,
        Platform::Maimai,
        |s| s.song.title.as_str(),
        &mut duplicates,
        &mut skipped,
    );
    let mut ongeki = index_by_title(
        ongeki,
        Platform::Ongeki,
        |s| s.song.title.as_str(),
        &mut duplicates,
        &mut skipped,
    );

    let titles: BTreeSet<String> = chunithm
        .keys()
        .chain(maimai.keys())
        .chain(ongeki.keys())
        .cloned()
        .collect();

    let entries: Vec<ArcadeSong> = titles
        .into_iter()
        .map(|title| ArcadeSong {
            chunithm: chunithm.remove(&title),
            maimai: maimai.remove(&title),
            ongeki: ongeki.remove(&title),
            title,
        })
        .collect();

    let stats = OverlapStats::from_entries(&entries);

    log::info!(
        "Reconciled {} titles ({} on all three platforms, {} duplicates dropped)",
        stats.total,
        stats.all_three,
        duplicates.len()
    );

    Reconciliation {
        entries,
        stats,
        duplicates,
        skipped,
    }
}

/// Key `records` by title, keeping the first record for each title.
fn index_by_title<T>(
    records: Vec<T>,
    platform: Platform,
    title: impl Fn(&T) -> &str,
    duplicates: &mut Vec<DuplicateTitle>,
    skipped: &mut Vec<SkippedRecord>,
) -> BTreeMap<String, T> {
    let mut by_title = BTreeMap::new();

    for (index, record) in records.into_iter().enumerate() {
        let key = title(&record);
        if key.trim().is_empty() {
            skipped.push(SkippedRecord {
                platform,
                index,
                reason: SkipReason::EmptyTitle,
            });
            continue;
        }

        match by_title.entry(key.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(slot) => {
                log::warn!("Duplicate {} title {:?}; keeping the first", platform, slot.key());
                duplicates.push(DuplicateTitle {
                    platform,
                    title: slot.key().clone(),
                });
            }
        }
    }

    by_title
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcadex_core::SongAttributes;

    fn chunithm(title: &str) -> ChunithmSong {
        ChunithmSong::new(SongAttributes::new(title))
    }

    fn maimai(title: &str) -> MaimaiSong {
        MaimaiSong::new(SongAttributes::new(title))
    }

    fn ongeki(title: &str) -> OngekiSong {
        OngekiSong::new(SongAttributes::new(title))
    }

    fn find<'a>(r: &'a Reconciliation, title: &str) -> &'a ArcadeSong {
        r.entries.iter().find(|e| e.title() == title).unwrap()
    }

    #[test]
    fn test_reconcile_worked_example() {
        let r = reconcile(
            vec![chunithm("A"), chunithm("B")],
            vec![maimai("B"), maimai("C")],
            Vec::new(),
        );

        assert_eq!(r.entries.len(), 3);

        let a = find(&r, "A");
        assert_eq!(a.platforms().collect::<Vec<_>>(), vec![Platform::Chunithm]);

        let b = find(&r, "B");
        assert_eq!(
            b.platforms().collect::<Vec<_>>(),
            vec![Platform::Chunithm, Platform::Maimai]
        );

        let c = find(&r, "C");
        assert_eq!(c.platforms().collect::<Vec<_>>(), vec![Platform::Maimai]);

        assert_eq!(
            r.stats,
            OverlapStats {
                total: 3,
                chunithm: 2,
                maimai: 2,
                ongeki: 0,
                chunithm_maimai: 1,
                chunithm_ongeki: 0,
                maimai_ongeki: 0,
                all_three: 0,
            }
        );
    }

    #[test]
    fn test_reconcile_all_three() {
        let r = reconcile(
            vec![chunithm("X"), chunithm("Y")],
            vec![maimai("X")],
            vec![ongeki("X"), ongeki("Y")],
        );

        let x = find(&r, "X");
        assert!(x.chunithm().is_some() && x.maimai().is_some() && x.ongeki().is_some());
        assert_eq!(r.stats.all_three, 1);
        assert_eq!(r.stats.chunithm_ongeki, 2);
        assert_eq!(r.stats.maimai_ongeki, 1);
    }

    #[test]
    fn test_titles_are_compared_exactly() {
        let r = reconcile(
            vec![chunithm("Link")],
            vec![maimai("Link ")],
            vec![ongeki("link")],
        );

        assert_eq!(r.entries.len(), 3);
        assert_eq!(r.stats.chunithm_maimai, 0);
        assert_eq!(r.stats.chunithm_ongeki, 0);
    }

    #[test]
    fn test_duplicate_titles_keep_first() {
        let mut first = maimai("Dup");
        first.version = Some("first".to_string());
        let mut second = maimai("Dup");
        second.version = Some("second".to_string());

        let r = reconcile(Vec::new(), vec![first, second], Vec::new());

        assert_eq!(r.entries.len(), 1);
        assert_eq!(
            r.entries[0].maimai().unwrap().version.as_deref(),
            Some("first")
        );
        assert_eq!(
            r.duplicates,
            vec![DuplicateTitle {
                platform: Platform::Maimai,
                title: "Dup".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_titles_are_skipped_not_merged() {
        let r = reconcile(vec![chunithm("")], vec![maimai("  ")], vec![ongeki("A")]);

        assert_eq!(r.entries.len(), 1);
        assert_eq!(r.entries[0].title(), "A");
        assert_eq!(r.skipped.len(), 2);
        assert!(r.skipped.iter().all(|s| s.reason == SkipReason::EmptyTitle));
    }

    #[test]
    fn test_reconcile_empty_inputs() {
        let r = reconcile(Vec::new(), Vec::new(), Vec::new());
        assert!(r.entries.is_empty());
        assert_eq!(r.stats, OverlapStats::default());
    }

    #[test]
    fn test_platform_sets_from_platform_songs() {
        let songs: Vec<PlatformSong> = vec![
            chunithm("A").into(),
            maimai("A").into(),
            ongeki("B").into(),
        ];
        let sets: PlatformSets = songs.into_iter().collect();

        assert_eq!(sets.chunithm.len(), 1);
        assert_eq!(sets.maimai.len(), 1);
        assert_eq!(sets.ongeki.len(), 1);

        let r = sets.reconcile();
        assert_eq!(r.stats.chunithm_maimai, 1);
    }

    #[test]
    fn test_stats_display() {
        let r = reconcile(vec![chunithm("A")], vec![maimai("A")], Vec::new());
        let text = r.stats.to_string();
        assert!(text.contains("Total songs: 1"));
        assert!(text.contains("Chunithm & maimai: 1"));
        assert!(text.contains("  Chunithm: 1\n"));
        assert!(text.contains("  maimai:   1\n"));
        assert!(text.contains("  Ongeki:   0\n"));
    }

    #[test]
    fn test_entries_serialize_with_absent_platforms_as_null() {
        let r = reconcile(vec![chunithm("A")], Vec::new(), Vec::new());
        let json = serde_json::to_value(&r.entries).unwrap();

        assert_eq!(json[0]["title"], "A");
        assert_eq!(json[0]["chunithm"]["title"], "A");
        assert!(json[0]["maimai"].is_null());
        assert!(json[0]["ongeki"].is_null());
    }
}
