use crate::error::AppError;
use serde::Deserialize;
use std::collections::HashMap;

/// Alias and display-name tables for hero identifiers.
///
/// Loaded once from the bundled asset and read-only afterwards. The alias
/// table maps raw log spellings (legacy internal names, shorthand) to
/// canonical keys; the display table maps canonical keys to labels.
#[derive(Debug, Deserialize)]
pub struct HeroDirectory {
    aliases: HashMap<String, String>,
    names: HashMap<String, String>,
}

impl HeroDirectory {
    pub fn bundled() -> Result<Self, AppError> {
        serde_json::from_str(include_str!("../assets/heroes.json"))
            .map_err(|e| AppError::JsonError(format!("Failed to parse hero table: {}", e)))
    }

    /// Canonical key for a raw hero string: trim, lowercase, alias lookup.
    /// Unknown spellings pass through unchanged so they still aggregate
    /// under their raw key.
    pub fn canonical(&self, raw: &str) -> String {
        let key = raw.trim().to_lowercase();
        self.aliases.get(&key).cloned().unwrap_or(key)
    }

    pub fn display_name(&self, key: &str) -> String {
        self.names
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
