use std::collections::HashMap;

use super::profile::ProviderProfile;
use super::providers;
use crate::error::{ConvertError, Result};

/// Registry of provider profiles, keyed by lowercase identifier
pub struct ProviderRegistry {
    profiles: HashMap<String, ProviderProfile>,
}

impl ProviderRegistry {
    /// Create a registry holding every built-in provider
    pub fn new() -> Self {
        let mut registry = Self {
            profiles: HashMap::new(),
        };

        registry.register(providers::vodafone::profile());
        registry.register(providers::tmobile::profile());
        registry.register(providers::sprint::profile());

        registry
    }

    /// Register (or replace) a profile under its own name
    pub fn register(&mut self, profile: ProviderProfile) {
        self.profiles.insert(profile.name.to_lowercase(), profile);
    }

    /// Case-insensitive lookup
    pub fn lookup(&self, identifier: &str) -> Result<&ProviderProfile> {
        self.profiles
            .get(&identifier.trim().to_lowercase())
            .ok_or_else(|| ConvertError::UnknownProvider {
                name: identifier.to_string(),
                supported: self.list_providers().join(" | "),
            })
    }

    /// All registered identifiers, sorted
    pub fn list_providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
