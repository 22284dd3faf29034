//! Disk-based cache for extracted schedules.
//!
//! Schedule pages change a few times a year, so an extraction result is
//! kept on disk per route, service day and direction and reused until it
//! expires.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ServiceDay;
use crate::extract::{ScheduleResult, Variant};

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Errors writing to the cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Creating the directory or writing the file failed
    #[error("cache io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The result couldn't be serialized
    #[error("failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The system clock is before the unix epoch
    #[error("system time before unix epoch")]
    Clock,
}

/// What a cached result was extracted for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub route: String,
    pub day: ServiceDay,
    pub direction: Option<String>,
    pub variant: Variant,
}

impl CacheKey {
    pub fn new(
        route: impl Into<String>,
        day: ServiceDay,
        direction: Option<String>,
        variant: Variant,
    ) -> Self {
        Self {
            route: route.into(),
            day,
            direction,
            variant,
        }
    }

    /// File name for this key.
    ///
    /// Free-text parts are escaped into `[A-Za-z0-9_]` and joined with `.`;
    /// a missing direction is written as `-`, which no escaped part can be.
    /// Distinct keys therefore never share a file.
    fn file_name(&self) -> String {
        let direction = self.direction.as_deref().map_or_else(|| "-".to_string(), escape);
        format!(
            "{}.{}.{}.{}.json",
            escape(&self.route),
            self.day.name(),
            self.variant.name(),
            direction
        )
    }
}

/// Keep ASCII letters and digits; write every other byte, `_` included, as
/// `_XX` hex.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() {
            out.push(b as char);
        } else {
            out.push_str(&format!("_{b:02X}"));
        }
    }
    out
}

/// A cached result with its write time.
#[derive(Debug, Serialize, Deserialize)]
struct CachedSchedule {
    /// Unix timestamp when the entry was written.
    cached_at_secs: u64,
    schedule: ScheduleResult,
}

/// Configuration for the schedule disk cache.
#[derive(Debug, Clone)]
pub struct ScheduleCacheConfig {
    /// Directory holding one file per key.
    pub dir: PathBuf,
    /// How long an entry remains valid.
    pub ttl: Duration,
}

impl ScheduleCacheConfig {
    /// Create a config with the given directory and default TTL (24 hours).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for ScheduleCacheConfig {
    fn default() -> Self {
        Self::new("schedule_cache")
    }
}

/// Disk cache for extraction results.
#[derive(Debug, Clone)]
pub struct ScheduleCache {
    config: ScheduleCacheConfig,
}

impl ScheduleCache {
    pub fn new(config: ScheduleCacheConfig) -> Self {
        Self { config }
    }

    /// Path of the file backing a key.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.config.dir.join(key.file_name())
    }

    /// Try to load a result from the cache.
    ///
    /// Returns `None` if the entry doesn't exist, is unreadable, or has
    /// expired.
    pub fn load(&self, key: &CacheKey) -> Option<ScheduleResult> {
        let path = self.path_for(key);
        let contents = std::fs::read_to_string(&path).ok()?;
        let cached: CachedSchedule = match serde_json::from_str(&contents) {
            Ok(cached) => cached,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring unreadable cache entry");
                return None;
            }
        };

        let age_secs = unix_now().ok()?.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            debug!(path = %path.display(), age_secs, "cache entry expired");
            return None;
        }

        Some(cached.schedule)
    }

    /// Like [`ScheduleCache::load`], but also treats an entry whose schedule
    /// isn't in effect yet on `day` as a miss.
    pub fn load_effective(&self, key: &CacheKey, day: NaiveDate) -> Option<ScheduleResult> {
        let result = self.load(key)?;
        if !result.valid_as_of.is_effective_on(day) {
            debug!(valid_as_of = %result.valid_as_of, %day, "cached schedule not in effect yet");
            return None;
        }
        Some(result)
    }

    /// Save a result to the cache, creating the directory if needed.
    pub fn save(&self, key: &CacheKey, schedule: &ScheduleResult) -> Result<(), CacheError> {
        let cached = CachedSchedule {
            cached_at_secs: unix_now()?,
            schedule: schedule.clone(),
        };

        let dir = &self.config.dir;
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|source| CacheError::Io {
                path: dir.clone(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(&cached)?;
        let path = self.path_for(key);
        std::fs::write(&path, json).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "cached schedule");
        Ok(())
    }

    /// Get the cache directory.
    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Get the cache TTL.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}

fn unix_now() -> Result<u64, CacheError> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| CacheError::Clock)
}
