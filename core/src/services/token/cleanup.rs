//! Revocation ledger cleanup for periodic maintenance
//!
//! Ledger entries whose credential has expired can never match a verification
//! again, because expiry is checked before the ledger. This service deletes
//! them in the background.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::RevocationRepository;

/// Configuration for the ledger cleanup service
#[derive(Debug, Clone)]
pub struct RevocationCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl RevocationCleanupConfig {
    /// Build from the configured purge interval; 0 disables the task
    pub fn from_interval(interval_seconds: u64) -> Self {
        Self {
            interval_seconds,
            enabled: interval_seconds > 0,
        }
    }
}

impl Default for RevocationCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Service for purging inert revocation entries
pub struct RevocationCleanupService<R: RevocationRepository + 'static> {
    ledger: Arc<R>,
    config: RevocationCleanupConfig,
}

impl<R: RevocationRepository> RevocationCleanupService<R> {
    /// Create a new cleanup service
    pub fn new(ledger: Arc<R>, config: RevocationCleanupConfig) -> Self {
        Self { ledger, config }
    }

    /// Run a single cleanup cycle at the current time
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        self.run_cleanup_at(Utc::now()).await
    }

    /// Run a single cleanup cycle as of `now`
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of the cycle
    /// * `Err(DomainError)` - The ledger store failed
    pub async fn run_cleanup_at(&self, now: DateTime<Utc>) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let purged = self.ledger.purge_expired(now).await?;
        info!(purged, "Revocation ledger cleanup completed");

        Ok(CleanupResult {
            entries_purged: purged,
        })
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation ledger cleanup is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Revocation ledger cleanup started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!(error = %e, "Revocation ledger cleanup cycle failed");
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of inert ledger entries deleted
    pub entries_purged: usize,
}
