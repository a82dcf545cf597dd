//! Disk cache for the holiday calendar.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::HolidayDivision;
use super::error::HolidayError;

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct CachedDivision {
    /// Unix timestamp when the cache was written.
    cached_at_secs: u64,
    division: HolidayDivision,
}

/// Configuration for the holiday disk cache.
#[derive(Debug, Clone)]
pub struct HolidayCacheConfig {
    pub path: PathBuf,
    pub ttl: Duration,
}

impl HolidayCacheConfig {
    /// Cache at `path` with the default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for HolidayCacheConfig {
    fn default() -> Self {
        Self::new("holidays_cache.json")
    }
}

/// Disk cache for one holiday division.
#[derive(Debug, Clone)]
pub struct HolidayCache {
    config: HolidayCacheConfig,
}

impl HolidayCache {
    pub fn new(config: HolidayCacheConfig) -> Self {
        Self { config }
    }

    /// Load the cached division if present and fresh.
    pub fn load(&self) -> Option<HolidayDivision> {
        let cached = self.read()?;
        let age_secs = unix_now().ok()?.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }
        Some(cached.division)
    }

    /// Load the cached division regardless of age.
    pub fn load_stale(&self) -> Option<HolidayDivision> {
        self.read().map(|c| c.division)
    }

    fn read(&self) -> Option<CachedDivision> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Write the division to disk, creating parent directories as needed.
    pub fn save(&self, division: &HolidayDivision) -> Result<(), HolidayError> {
        let cached = CachedDivision {
            cached_at_secs: unix_now()?,
            division: division.clone(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| HolidayError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(&cached).map_err(|e| HolidayError::Cache {
            message: format!("failed to serialize cache: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| HolidayError::Cache {
            message: format!("failed to write cache file: {}", e),
        })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

fn unix_now() -> Result<u64, HolidayError> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| HolidayError::Cache {
            message: "system time before unix epoch".to_string(),
        })
}
