use crate::error::AppError;
use crate::source::models::{PlayerDirectory, RawMatchRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Cached copy of the last fetch: raw rows and directory entries, nothing
/// derived. Every pipeline run still recomputes aggregates from scratch.
#[derive(Debug, Serialize, Deserialize)]
pub struct RowCache {
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub rows: Vec<RawMatchRow>,
    pub players: HashMap<String, String>,
}

impl RowCache {
    pub fn new(source_url: &str) -> Self {
        RowCache {
            source_url: source_url.to_string(),
            fetched_at: Utc::now(),
            rows: Vec::new(),
            players: HashMap::new(),
        }
    }

    pub fn default_path() -> PathBuf {
        let cache_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".dota_stats");

        let _ = fs::create_dir_all(&cache_dir);

        cache_dir.join("rows.json")
    }

    pub fn load(source_url: &str) -> Result<Self, AppError> {
        Self::load_from(&Self::default_path(), source_url)
    }

    pub fn load_from(path: &Path, source_url: &str) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| AppError::JsonError(format!("Failed to parse row cache: {}", e))),
            // No cache yet, start empty.
            Err(_) => Ok(RowCache::new(source_url)),
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize row cache: {}", e)))?;

        fs::write(path, json)
            .map_err(|e| AppError::JsonError(format!("Failed to write row cache: {}", e)))?;

        Ok(())
    }

    pub fn replace(&mut self, rows: Vec<RawMatchRow>, directory: &PlayerDirectory) {
        self.rows = rows;
        self.players = directory.entries().clone();
        self.fetched_at = Utc::now();
    }

    pub fn directory(&self) -> PlayerDirectory {
        PlayerDirectory::from_entries(self.players.clone())
    }

    pub fn is_stale(&self, max_age_mins: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.fetched_at);
        age.num_minutes() > max_age_mins as i64
    }

    pub fn age_minutes(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.fetched_at)
            .num_minutes()
    }

    pub fn is_usable(&self, source_url: &str, max_age_mins: u64) -> bool {
        !self.rows.is_empty() && self.source_url == source_url && !self.is_stale(max_age_mins)
    }
}
