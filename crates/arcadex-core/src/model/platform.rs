use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One of the three arcade platforms whose song lists are cataloged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Chunithm,
    Maimai,
    Ongeki,
}

impl Platform {
    /// Every platform, in reporting order.
    pub const ALL: [Self; 3] = [Self::Chunithm, Self::Maimai, Self::Ongeki];

    /// Canonical lowercase name, as used in config keys and CLI flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chunithm => "chunithm",
            Self::Maimai => "maimai",
            Self::Ongeki => "ongeki",
        }
    }

    /// Catalog category the platform's own songs are filed under when a
    /// record does not carry an explicit category.
    #[must_use]
    pub const fn default_category_id(self) -> i64 {
        match self {
            Self::Maimai => 5,
            Self::Ongeki => 6,
            Self::Chunithm => 7,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Chunithm => "Chunithm",
            Self::Maimai => "maimai",
            Self::Ongeki => "Ongeki",
        };
        f.write_str(label)
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidData(format!("unknown platform: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str_is_case_insensitive() {
        assert_eq!("CHUNITHM".parse::<Platform>().unwrap(), Platform::Chunithm);
        assert_eq!(" maimai ".parse::<Platform>().unwrap(), Platform::Maimai);
        assert_eq!("Ongeki".parse::<Platform>().unwrap(), Platform::Ongeki);
        assert!("sdvx".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_serializes_lowercase() {
        let json = serde_json::to_string(&Platform::Ongeki).unwrap();
        assert_eq!(json, "\"ongeki\"");
    }

    #[test]
    fn test_default_categories_are_distinct() {
        let mut ids: Vec<i64> = Platform::ALL
            .iter()
            .map(|p| p.default_category_id())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
