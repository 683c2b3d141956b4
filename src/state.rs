//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::{ServiceKind, Settings, StoreBackend};
use crate::db::{establish_async_connection_pool, AsyncDbPool};
use crate::error::AppResult;
use crate::external::RemoteEnrichment;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap; services, the peer client and the pool are shared.
#[derive(Clone)]
pub struct AppState {
    /// Aggregation services for every entity kind
    pub services: Services,
    /// Service whose routes this process mounts
    pub service: ServiceKind,
    /// Connection pool, present for the postgres backend only
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// Builds stores for the configured backend and wires every service to `peers`.
    pub async fn from_settings(
        settings: &Settings,
        peers: Arc<dyn RemoteEnrichment>,
    ) -> AppResult<Self> {
        let (repos, db_pool) = match settings.database.backend {
            StoreBackend::Postgres => {
                let pool = establish_async_connection_pool(&settings.database).await?;
                (Repositories::postgres(pool.clone()), Some(pool))
            }
            StoreBackend::Memory => (Repositories::memory(), None),
        };

        Ok(Self {
            services: Services::new(repos, peers, &settings.policies),
            service: settings.service.name,
            db_pool,
        })
    }

    /// State over empty in-memory stores with default policies.
    pub fn in_memory(service: ServiceKind, peers: Arc<dyn RemoteEnrichment>) -> Self {
        Self::with_repositories(service, Repositories::memory(), peers)
    }

    pub fn with_repositories(
        service: ServiceKind,
        repos: Repositories,
        peers: Arc<dyn RemoteEnrichment>,
    ) -> Self {
        Self {
            services: Services::new(repos, peers, &Default::default()),
            service,
            db_pool: None,
        }
    }
}
