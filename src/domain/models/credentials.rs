#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;

use std::collections::HashMap;

use super::ModelDescriptor;
use super::ModelRegistry;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

const PLACEHOLDER_MARKERS: [&str; 2] = ["your_", "_key_here"];

/// Provider credentials snapshotted once at startup, keyed by the
/// descriptor's credential reference. Values are never re-read from the
/// environment afterwards.
pub struct CredentialStore {
    values: HashMap<String, String>,
}

impl CredentialStore {
    pub fn from_config(registry: &ModelRegistry) -> CredentialStore {
        let mut values = HashMap::new();
        for descriptor in registry.list() {
            values.insert(
                descriptor.credential_key.to_string(),
                Config::get(descriptor.credential_key),
            );
        }

        return CredentialStore { values };
    }

    pub fn with_values(pairs: &[(ConfigKey, &str)]) -> CredentialStore {
        let mut values = HashMap::new();
        for (key, value) in pairs {
            values.insert(key.to_string(), value.to_string());
        }

        return CredentialStore { values };
    }

    pub fn get(&self, key: ConfigKey) -> &str {
        return self
            .values
            .get(&key.to_string())
            .map(|value| return value.as_str())
            .unwrap_or("");
    }
}

pub struct CredentialValidator {}

impl CredentialValidator {
    /// Total and side-effect free so menus may call it per entry. A missing
    /// credential reads as an empty string and fails the usability check.
    pub fn is_configured(store: &CredentialStore, descriptor: &ModelDescriptor) -> bool {
        return CredentialValidator::is_usable(store.get(descriptor.credential_key));
    }

    pub fn is_usable(value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }

        return !PLACEHOLDER_MARKERS
            .iter()
            .any(|marker| return trimmed.contains(marker));
    }
}
