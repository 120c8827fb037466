use crate::error::AppError;
use std::env;

const DEFAULT_MATCH_LOG_URL: &str =
    "https://gosuenesy.github.io/dota2-stats-app/whatthefuck_5.1-1.csv";
const DEFAULT_PLAYER_DIRECTORY_URL: &str =
    "https://gosuenesy.github.io/dota2-stats-app/players_202505071018.csv";
const DEFAULT_CACHE_MAX_AGE_MINS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub match_log_url: String,
    pub player_directory_url: String,
    pub cache_max_age_mins: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let match_log_url =
            env::var("MATCH_LOG_URL").unwrap_or_else(|_| DEFAULT_MATCH_LOG_URL.to_string());
        let player_directory_url = env::var("PLAYER_DIRECTORY_URL")
            .unwrap_or_else(|_| DEFAULT_PLAYER_DIRECTORY_URL.to_string());

        let cache_max_age_mins = match env::var("CACHE_MAX_AGE_MINS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::ConfigError(format!("CACHE_MAX_AGE_MINS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_CACHE_MAX_AGE_MINS,
        };

        for url in [&match_log_url, &player_directory_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::ConfigError(format!(
                    "Data source URL must be http(s): {}",
                    url
                )));
            }
        }

        Ok(Config {
            match_log_url,
            player_directory_url,
            cache_max_age_mins,
        })
    }
}
