// src/services/preferences.rs

use std::sync::Arc;

use dashmap::DashMap;

/// Per-user dashboard preferences. In memory only; last write wins.
#[derive(Clone, Default)]
pub struct PreferenceStore {
    default_organization: Arc<DashMap<String, String>>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_organization(&self, user_id: &str) -> Option<String> {
        self.default_organization
            .get(user_id)
            .map(|entry| entry.value().clone())
    }

    pub fn set_default_organization(&self, user_id: &str, organization_id: &str) {
        self.default_organization
            .insert(user_id.to_string(), organization_id.to_string());
    }

    pub fn clear_organization(&self, organization_id: &str) {
        self.default_organization
            .retain(|_, selected| selected != organization_id);
    }
}
