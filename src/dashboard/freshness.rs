//! Data freshness
//!
//! The pipeline rewrites its data directory on every refresh, so the
//! directory's modification time tells readers how stale the charts are.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use std::path::Path;

use super::error::FreshnessError;

/// Display format, e.g. `Monday October 19, 2026 at 14:05:09`.
/// chrono names days and months in English regardless of the process locale.
pub const FRESHNESS_FORMAT: &str = "%A %B %d, %Y at %H:%M:%S";

#[async_trait]
pub trait FreshnessSource: Send + Sync {
    async fn last_modified(&self, path: &Path) -> Result<DateTime<Local>, FreshnessError>;
}

/// Reads the modification time from filesystem metadata
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFreshnessSource;

#[async_trait]
impl FreshnessSource for FsFreshnessSource {
    async fn last_modified(&self, path: &Path) -> Result<DateTime<Local>, FreshnessError> {
        let unavailable = |reason: String| FreshnessError::Unavailable {
            path: path.display().to_string(),
            reason,
        };

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        let modified = metadata
            .modified()
            .map_err(|e| unavailable(e.to_string()))?;
        Ok(DateTime::<Local>::from(modified))
    }
}

/// Fixed answer, independent of the path asked about
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FixedFreshnessSource(pub Option<DateTime<Local>>);

#[cfg(test)]
#[async_trait]
impl FreshnessSource for FixedFreshnessSource {
    async fn last_modified(&self, path: &Path) -> Result<DateTime<Local>, FreshnessError> {
        self.0.ok_or_else(|| FreshnessError::Unavailable {
            path: path.display().to_string(),
            reason: "fixed failure".to_string(),
        })
    }
}

/// Freshness shown on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    Known {
        at: DateTime<Local>,
        display: String,
    },
    Unknown,
}

impl Freshness {
    pub fn known(at: DateTime<Local>) -> Self {
        Self::Known {
            display: format_timestamp(&at),
            at,
        }
    }

    #[cfg(test)]
    pub fn display(&self) -> Option<&str> {
        match self {
            Self::Known { display, .. } => Some(display),
            Self::Unknown => None,
        }
    }
}

pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(FRESHNESS_FORMAT).to_string()
}
