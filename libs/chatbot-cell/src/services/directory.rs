use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use shared_backend::BackendClient;
use shared_config::AppConfig;

use crate::error::ChatbotError;
use crate::models::{DoctorRecord, RefreshOutcome};
use crate::services::guard::InFlightGuard;

/// Where the directory cache gets its doctor list from.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn fetch_doctors(&self) -> Result<Vec<DoctorRecord>, ChatbotError>;
}

/// Reads the doctor list from the hospital backend.
pub struct BackendDirectorySource {
    client: BackendClient,
}

impl BackendDirectorySource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: BackendClient::new(config),
        }
    }
}

#[async_trait]
impl DirectorySource for BackendDirectorySource {
    async fn fetch_doctors(&self) -> Result<Vec<DoctorRecord>, ChatbotError> {
        self.client
            .list_doctors()
            .await
            .map_err(|e| ChatbotError::DirectoryUnavailable(e.to_string()))
    }
}

/// Fixed doctor list, for running without a backend.
pub struct StaticDirectorySource {
    doctors: Vec<DoctorRecord>,
}

impl StaticDirectorySource {
    pub fn new(doctors: Vec<DoctorRecord>) -> Self {
        Self { doctors }
    }
}

#[async_trait]
impl DirectorySource for StaticDirectorySource {
    async fn fetch_doctors(&self) -> Result<Vec<DoctorRecord>, ChatbotError> {
        Ok(self.doctors.clone())
    }
}

/// Read-only snapshot of the doctor directory.
///
/// The snapshot is replaced wholesale on every successful refresh and left
/// untouched when the fetch fails. Readers get an `Arc` to the snapshot that
/// was current when they asked, so classification never observes a
/// half-applied refresh.
pub struct DoctorDirectoryCache {
    source: Arc<dyn DirectorySource>,
    snapshot: RwLock<Arc<Vec<DoctorRecord>>>,
    last_refreshed: RwLock<Option<DateTime<Utc>>>,
    refreshing: Arc<AtomicBool>,
}

impl DoctorDirectoryCache {
    pub fn new(source: Arc<dyn DirectorySource>) -> Self {
        Self {
            source,
            snapshot: RwLock::new(Arc::new(Vec::new())),
            last_refreshed: RwLock::new(None),
            refreshing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Cache pre-filled with `doctors` whose refreshes re-serve the same list.
    pub fn with_doctors(doctors: Vec<DoctorRecord>) -> Self {
        let cache = Self::new(Arc::new(StaticDirectorySource::new(doctors.clone())));
        cache.replace(doctors);
        cache
    }

    /// Current snapshot; empty until the first refresh succeeds.
    pub fn all(&self) -> Arc<Vec<DoctorRecord>> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        *self.last_refreshed.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    /// Fetch the full list and swap it in. Failures are logged and swallowed.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(_guard) = InFlightGuard::try_acquire(&self.refreshing) else {
            debug!("Directory refresh already in flight, skipping");
            return RefreshOutcome::InFlight;
        };

        match self.source.fetch_doctors().await {
            Ok(doctors) => {
                let count = doctors.len();
                self.replace(doctors);
                info!("Doctor directory refreshed with {} doctors", count);
                RefreshOutcome::Refreshed(count)
            }
            Err(e) => {
                warn!("Keeping previous doctor directory ({} doctors): {}", self.len(), e);
                RefreshOutcome::Unavailable
            }
        }
    }

    /// Fire-and-forget refresh on the runtime.
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<RefreshOutcome> {
        let cache = Arc::clone(self);
        tokio::spawn(async move { cache.refresh().await })
    }

    /// Refresh immediately, then every `interval`, until the task is aborted.
    pub fn spawn_polling(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        info!("Polling doctor directory every {:?}", interval);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                cache.refresh().await;
            }
        })
    }

    fn replace(&self, doctors: Vec<DoctorRecord>) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(doctors);
        *self.last_refreshed.write().unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());
    }
}
