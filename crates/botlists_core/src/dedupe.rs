use std::collections::HashSet;

use crate::BotProfile;

/// Keeps the first profile seen for each handle, preserving order.
pub fn dedupe_by_handle(profiles: impl IntoIterator<Item = BotProfile>) -> Vec<BotProfile> {
    let mut seen = HashSet::new();
    profiles
        .into_iter()
        .filter(|profile| seen.insert(profile.handle.clone()))
        .collect()
}
