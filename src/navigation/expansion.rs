use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// ExpansionState
///
/// Which composite entries of one menu instance are open, keyed by node key.
/// Keys are independent of each other: opening one branch never closes another.
/// Nothing here is persisted; a fresh state has every node collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState(HashMap<String, bool>);

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `key` and returns its new value. An unknown key counts as collapsed,
    /// so the first toggle expands it.
    pub fn toggle(&mut self, key: &str) -> bool {
        let expanded = self.0.entry(key.to_string()).or_insert(false);
        *expanded = !*expanded;
        tracing::trace!(key, expanded = *expanded, "menu entry toggled");
        *expanded
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    /// Keys currently expanded, sorted for stable output.
    pub fn expanded_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .0
            .iter()
            .filter(|(_, expanded)| **expanded)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}

impl<K: Into<String>> FromIterator<K> for ExpansionState {
    /// Builds a state where exactly the given keys are expanded.
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self(keys.into_iter().map(|key| (key.into(), true)).collect())
    }
}
