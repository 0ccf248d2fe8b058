use crate::config::BrowseConfig;
use history_models::{PreferenceGroup, PreferenceItem, PreferenceKey};

pub const BROWSE_TITLE: &str = "Browse";

/// Preferences of the browse settings screen with their current values
pub fn browse_preferences(browse: &BrowseConfig) -> Vec<PreferenceGroup> {
    vec![PreferenceGroup {
        title: "Sources".to_string(),
        items: PreferenceKey::ALL
            .iter()
            .map(|key| PreferenceItem::switch(*key, browse.get(*key)))
            .collect(),
    }]
}
