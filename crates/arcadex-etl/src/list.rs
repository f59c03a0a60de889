//! Flat song list parsing.
//!
//! One song per line, either `"title","artist"` or `title,artist`. In the
//! unquoted form everything after the first comma is the artist. Blank lines
//! and lines starting with `#` are ignored.

use std::collections::HashSet;
use std::path::Path;

use arcadex_core::CatalogSong;

/// A song read from a list file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListEntry {
    pub title: String,
    pub artist: String,
}

impl ListEntry {
    #[must_use]
    pub fn to_catalog_song(&self) -> CatalogSong {
        CatalogSong::new(self.title.clone(), self.artist.clone())
    }
}

/// A line that could not be read as a song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// One-based line number.
    pub line: usize,
    pub content: String,
}

/// Entries and rejected lines of one list file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongList {
    pub entries: Vec<ListEntry>,
    pub skipped: Vec<SkippedLine>,
}

impl SongList {
    /// Drop repeated `(title, artist)` pairs, keeping the first occurrence.
    /// Returns the number of entries removed.
    pub fn dedup(&mut self) -> usize {
        let before = self.entries.len();
        let mut seen = HashSet::new();
        self.entries.retain(|e| seen.insert((e.title.clone(), e.artist.clone())));
        before - self.entries.len()
    }
}

/// Read a list file from `path`.
pub fn load_list(path: &Path) -> arcadex_core::Result<SongList> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_list(&contents))
}

/// Parse the text of a list file.
#[must_use]
pub fn parse_list(contents: &str) -> SongList {
    let mut list = SongList::default();

    for (number, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Some(entry) => list.entries.push(entry),
            None => list.skipped.push(SkippedLine {
                line: number + 1,
                content: line.to_string(),
            }),
        }
    }

    list
}

fn parse_line(line: &str) -> Option<ListEntry> {
    let (title, artist) = if let Some(quoted) = line.strip_prefix('"') {
        let (title, rest) = quoted.split_once("\",\"")?;
        // Everything up to the last quote; tolerate a missing closing quote.
        let artist = rest.rsplit_once('"').map_or(rest, |(artist, _)| artist);
        (title, artist)
    } else {
        line.split_once(',')?
    };

    let title = title.trim();
    if title.is_empty() {
        return None;
    }

    Some(ListEntry {
        title: title.to_string(),
        artist: artist.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unquoted_line() {
        let list = parse_list("Bad Apple!!,Alstroemeria Records\n");
        assert_eq!(
            list.entries,
            vec![ListEntry {
                title: "Bad Apple!!".to_string(),
                artist: "Alstroemeria Records".to_string(),
            }]
        );
    }

    #[test]
    fn test_unquoted_artist_keeps_extra_commas() {
        let list = parse_list("Song, Artist A, Artist B");
        assert_eq!(list.entries[0].title, "Song");
        assert_eq!(list.entries[0].artist, "Artist A, Artist B");
    }

    #[test]
    fn test_parse_quoted_line() {
        let list = parse_list(r#""Hello, World","Artist, Inc.""#);
        assert_eq!(list.entries[0].title, "Hello, World");
        assert_eq!(list.entries[0].artist, "Artist, Inc.");
    }

    #[test]
    fn test_quoted_line_without_closing_quote() {
        let list = parse_list(r#""Title","Artist"#);
        assert_eq!(list.entries[0].artist, "Artist");
    }

    #[test]
    fn test_comments_and_blank_lines_are_ignored() {
        let list = parse_list("# header\n\n   \nA,B\n");
        assert_eq!(list.entries.len(), 1);
        assert!(list.skipped.is_empty());
    }

    #[test]
    fn test_malformed_lines_are_reported_with_line_numbers() {
        let list = parse_list("A,B\nno comma here\n\"only title\"\n,artist only\n");
        assert_eq!(list.entries.len(), 1);
        let lines: Vec<usize> = list.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert_eq!(list.skipped[0].content, "no comma here");
    }

    #[test]
    fn test_dedup_keeps_first() {
        let mut list = parse_list("A,X\nA,Y\nA,X\nB,X\n");
        assert_eq!(list.dedup(), 1);
        let pairs: Vec<(&str, &str)> = list
            .entries
            .iter()
            .map(|e| (e.title.as_str(), e.artist.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "X"), ("A", "Y"), ("B", "X")]);
    }

    #[test]
    fn test_to_catalog_song() {
        let entry = ListEntry {
            title: "T".to_string(),
            artist: "A".to_string(),
        };
        let song = entry.to_catalog_song();
        assert_eq!(song.title, "T");
        assert_eq!(song.artist, "A");
    }
}
