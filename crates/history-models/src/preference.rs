use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keys of the toggles exposed on the browse settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceKey {
    /// Hide browse results that are already in the anime library
    HideInAnimeLibraryItems,
    /// Hide browse results that are already in the manga library
    HideInMangaLibraryItems,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 2] = [
        PreferenceKey::HideInAnimeLibraryItems,
        PreferenceKey::HideInMangaLibraryItems,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::HideInAnimeLibraryItems => "hide_in_anime_library_items",
            PreferenceKey::HideInMangaLibraryItems => "hide_in_manga_library_items",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PreferenceKey::HideInAnimeLibraryItems => "Hide entries already in anime library",
            PreferenceKey::HideInMangaLibraryItems => "Hide entries already in manga library",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        PreferenceKey::ALL
            .iter()
            .find(|key| key.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown preference: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreferenceItem {
    Switch {
        key: PreferenceKey,
        title: String,
        value: bool,
    },
}

impl PreferenceItem {
    pub fn switch(key: PreferenceKey, value: bool) -> Self {
        PreferenceItem::Switch {
            key,
            title: key.title().to_string(),
            value,
        }
    }
}

/// A titled section of a settings screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceGroup {
    pub title: String,
    pub items: Vec<PreferenceItem>,
}
