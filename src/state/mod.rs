use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{config::AppConfig, dao::entity_store::EntityStore, error::ServiceError};

/// Cheaply clonable handle to the shared application state.
pub type SharedState = Arc<AppState>;

/// Central application state: the storage slot, the runtime configuration
/// and the per-tournament serialization gates.
pub struct AppState {
    store: RwLock<Option<Arc<dyn EntityStore>>>,
    config: AppConfig,
    tournament_gates: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned
    /// cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is
    /// installed.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            store: RwLock::new(None),
            config,
            tournament_gates: DashMap::new(),
        })
    }

    /// Runtime configuration the application was started with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current storage backend, if one is installed.
    pub async fn store(&self) -> Option<Arc<dyn EntityStore>> {
        let guard = self.store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the storage backend or fail with the degraded-mode error.
    pub async fn require_store(&self) -> Result<Arc<dyn EntityStore>, ServiceError> {
        self.store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a storage backend and leave degraded mode.
    pub async fn install_store(&self, store: Arc<dyn EntityStore>) {
        let mut guard = self.store.write().await;
        *guard = Some(store);
    }

    /// Remove the current storage backend and enter degraded mode.
    pub async fn clear_store(&self) {
        let mut guard = self.store.write().await;
        guard.take();
    }

    /// Gate serializing roster mutations for one tournament.
    ///
    /// Membership operations read the roster, decide, then write; two
    /// concurrent requests for the same tournament must not interleave those
    /// steps. Gates are tiny and kept for the lifetime of the process.
    pub fn tournament_gate(&self, id: Uuid) -> Arc<Mutex<()>> {
        self.tournament_gates.entry(id).or_default().clone()
    }
}
