use crate::config::Config;
use crate::error::AppError;
use std::thread;
use std::time::Duration;

use super::models::{read_match_rows, PlayerDirectory, RawMatchRow};

pub struct DataSourceClient {
    config: Config,
}

impl DataSourceClient {
    pub fn new(config: Config) -> Self {
        DataSourceClient { config }
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let mut retry_count = 0;
        const MAX_RETRIES: u32 = 3;

        loop {
            let response = ureq::get(url)
                .set("User-Agent", "dota_stats/0.1.0")
                .call();

            match response {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    println!("⏳ Rate limited, waiting {}ms before retry...", wait_ms);
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    pub fn fetch_match_rows(&self) -> Result<Vec<RawMatchRow>, AppError> {
        let body = self.execute_request(&self.config.match_log_url)?;
        Ok(read_match_rows(body.as_bytes()))
    }

    pub fn fetch_player_directory(&self) -> Result<PlayerDirectory, AppError> {
        let body = self.execute_request(&self.config.player_directory_url)?;
        Ok(PlayerDirectory::read(body.as_bytes()))
    }
}
